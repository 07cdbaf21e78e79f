use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::types::Rate;

/// Transfer tax applied when a region cannot be resolved.
pub const DEFAULT_TAX_RATE: Rate = dec!(0.08);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of the transfer-tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateEntry {
    /// Normalized short key (lowercase, no surrounding whitespace)
    pub key: String,
    /// Display name, also used for substring matching
    pub full_name: String,
    /// Transfer tax as a fraction of purchase price
    pub rate: Rate,
    /// Administrative region the entry belongs to
    pub region_group: String,
}

/// How a region identifier was turned into a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Input equals a table key
    ExactKey,
    /// Input and a full region name contain one another
    NameMatch,
    /// Nothing matched, or no input was given
    Default,
}

/// The table row a resolution landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRegion {
    pub key: String,
    pub full_name: String,
    pub region_group: String,
}

/// Outcome of resolving a region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateResolution {
    pub rate: Rate,
    pub method: ResolutionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<ResolvedRegion>,
}

impl TaxRateResolution {
    fn default_rate() -> Self {
        Self {
            rate: DEFAULT_TAX_RATE,
            method: ResolutionMethod::Default,
            region: None,
        }
    }

    fn matched(entry: &TaxRateEntry, method: ResolutionMethod) -> Self {
        Self {
            rate: entry.rate,
            method,
            region: Some(ResolvedRegion {
                key: entry.key.clone(),
                full_name: entry.full_name.clone(),
                region_group: entry.region_group.clone(),
            }),
        }
    }

    pub fn is_default(&self) -> bool {
        self.method == ResolutionMethod::Default
    }
}

/// Immutable region → transfer tax table, kept sorted by key so the
/// fallback scan has a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TaxRateEntry>", into = "Vec<TaxRateEntry>")]
pub struct TaxRateTable {
    entries: Vec<TaxRateEntry>,
}

impl From<Vec<TaxRateEntry>> for TaxRateTable {
    fn from(entries: Vec<TaxRateEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<TaxRateTable> for Vec<TaxRateEntry> {
    fn from(table: TaxRateTable) -> Self {
        table.entries
    }
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

/// (key, full name, rate, region group). General transfer tax (ITP) rate per
/// province.
const BUILTIN_RATES: &[(&str, &str, Decimal, &str)] = &[
    ("a coruna", "A Coruña", dec!(0.08), "Galicia"),
    ("alava", "Álava", dec!(0.04), "País Vasco"),
    ("albacete", "Albacete", dec!(0.09), "Castilla-La Mancha"),
    ("alicante", "Alicante", dec!(0.10), "Comunitat Valenciana"),
    ("almeria", "Almería", dec!(0.07), "Andalucía"),
    ("asturias", "Asturias", dec!(0.08), "Principado de Asturias"),
    ("avila", "Ávila", dec!(0.08), "Castilla y León"),
    ("badajoz", "Badajoz", dec!(0.08), "Extremadura"),
    ("baleares", "Illes Balears", dec!(0.08), "Illes Balears"),
    ("barcelona", "Barcelona", dec!(0.10), "Cataluña"),
    ("bizkaia", "Bizkaia", dec!(0.04), "País Vasco"),
    ("burgos", "Burgos", dec!(0.08), "Castilla y León"),
    ("caceres", "Cáceres", dec!(0.08), "Extremadura"),
    ("cadiz", "Cádiz", dec!(0.07), "Andalucía"),
    ("cantabria", "Cantabria", dec!(0.09), "Cantabria"),
    ("castellon", "Castellón", dec!(0.10), "Comunitat Valenciana"),
    ("ceuta", "Ceuta", dec!(0.06), "Ceuta"),
    ("ciudad real", "Ciudad Real", dec!(0.09), "Castilla-La Mancha"),
    ("cordoba", "Córdoba", dec!(0.07), "Andalucía"),
    ("cuenca", "Cuenca", dec!(0.09), "Castilla-La Mancha"),
    ("gipuzkoa", "Gipuzkoa", dec!(0.04), "País Vasco"),
    ("girona", "Girona", dec!(0.10), "Cataluña"),
    ("granada", "Granada", dec!(0.07), "Andalucía"),
    ("guadalajara", "Guadalajara", dec!(0.09), "Castilla-La Mancha"),
    ("huelva", "Huelva", dec!(0.07), "Andalucía"),
    ("huesca", "Huesca", dec!(0.08), "Aragón"),
    ("jaen", "Jaén", dec!(0.07), "Andalucía"),
    ("la rioja", "La Rioja", dec!(0.07), "La Rioja"),
    ("las palmas", "Las Palmas", dec!(0.065), "Canarias"),
    ("leon", "León", dec!(0.08), "Castilla y León"),
    ("lleida", "Lleida", dec!(0.10), "Cataluña"),
    ("lugo", "Lugo", dec!(0.08), "Galicia"),
    ("madrid", "Madrid", dec!(0.06), "Comunidad de Madrid"),
    ("malaga", "Málaga", dec!(0.07), "Andalucía"),
    ("melilla", "Melilla", dec!(0.06), "Melilla"),
    ("murcia", "Murcia", dec!(0.0775), "Región de Murcia"),
    ("navarra", "Navarra", dec!(0.06), "Comunidad Foral de Navarra"),
    ("ourense", "Ourense", dec!(0.08), "Galicia"),
    ("palencia", "Palencia", dec!(0.08), "Castilla y León"),
    ("pontevedra", "Pontevedra", dec!(0.08), "Galicia"),
    ("salamanca", "Salamanca", dec!(0.08), "Castilla y León"),
    ("santa cruz de tenerife", "Santa Cruz de Tenerife", dec!(0.065), "Canarias"),
    ("segovia", "Segovia", dec!(0.08), "Castilla y León"),
    ("sevilla", "Sevilla", dec!(0.07), "Andalucía"),
    ("soria", "Soria", dec!(0.08), "Castilla y León"),
    ("tarragona", "Tarragona", dec!(0.10), "Cataluña"),
    ("teruel", "Teruel", dec!(0.08), "Aragón"),
    ("toledo", "Toledo", dec!(0.09), "Castilla-La Mancha"),
    ("valencia", "Valencia", dec!(0.10), "Comunitat Valenciana"),
    ("valladolid", "Valladolid", dec!(0.08), "Castilla y León"),
    ("zamora", "Zamora", dec!(0.08), "Castilla y León"),
    ("zaragoza", "Zaragoza", dec!(0.08), "Aragón"),
];

static BUILTIN_TABLE: OnceLock<TaxRateTable> = OnceLock::new();

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl TaxRateTable {
    /// The province table shipped with the engine.
    pub fn builtin() -> &'static TaxRateTable {
        BUILTIN_TABLE.get_or_init(|| {
            Self::from_entries(
                BUILTIN_RATES
                    .iter()
                    .map(|(key, full_name, rate, group)| TaxRateEntry {
                        key: (*key).to_string(),
                        full_name: (*full_name).to_string(),
                        rate: *rate,
                        region_group: (*group).to_string(),
                    })
                    .collect(),
            )
        })
    }

    /// Build a table from arbitrary rows. Keys are normalized, rows sorted
    /// by key, and duplicate keys keep their first occurrence.
    pub fn from_entries(entries: Vec<TaxRateEntry>) -> Self {
        let mut entries: Vec<TaxRateEntry> = entries
            .into_iter()
            .map(|mut e| {
                e.key = normalize_region(&e.key);
                e
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries.dedup_by(|later, first| later.key == first.key);
        Self { entries }
    }

    pub fn entries(&self) -> &[TaxRateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text region to a transfer tax rate.
    ///
    /// Exact key match first, then the first entry (in key order) whose
    /// full name contains the input or is contained in it, then
    /// [`DEFAULT_TAX_RATE`]. Never fails.
    pub fn resolve(&self, region: Option<&str>) -> TaxRateResolution {
        let needle = match region.map(normalize_region) {
            Some(n) if !n.is_empty() => n,
            _ => {
                debug!("no region supplied, using default transfer tax {DEFAULT_TAX_RATE}");
                return TaxRateResolution::default_rate();
            }
        };

        if let Ok(idx) = self
            .entries
            .binary_search_by(|e| e.key.as_str().cmp(needle.as_str()))
        {
            let entry = &self.entries[idx];
            debug!("region '{needle}' matched key '{}' exactly", entry.key);
            return TaxRateResolution::matched(entry, ResolutionMethod::ExactKey);
        }

        let by_name = self.entries.iter().find(|e| {
            let name = e.full_name.to_lowercase();
            name.contains(needle.as_str()) || needle.contains(name.as_str())
        });

        match by_name {
            Some(entry) => {
                debug!("region '{needle}' matched '{}' by name", entry.full_name);
                TaxRateResolution::matched(entry, ResolutionMethod::NameMatch)
            }
            None => {
                debug!("region '{needle}' not found, using default transfer tax {DEFAULT_TAX_RATE}");
                TaxRateResolution::default_rate()
            }
        }
    }
}

/// Resolve against the built-in table and return only the rate.
pub fn resolve_tax_rate(region: Option<&str>) -> Rate {
    TaxRateTable::builtin().resolve(region).rate
}

/// Trim and lowercase. Diacritics are kept.
fn normalize_region(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
