use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use serde_json::Value;

use property_yield_core::investment::property_record::PropertyRecord;
use property_yield_core::investment::types::{
    AcquisitionParameters, FinancingParameters, InvestmentInput, PropertyContext,
    ScenarioDrivers,
};
use property_yield_core::investment::{self, TaxRateTable};

use crate::input;

/// Arguments for a full profitability analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Purchase price of the property
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Notary, registry and other closing costs
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Expected monthly rent before scenario adjustments
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Management plan: basic or premium
    #[arg(long, default_value = "basic")]
    pub management_plan: String,

    /// Financing type: fixed-rate, variable-rate or mixed
    #[arg(long, default_value = "fixed-rate")]
    pub financing_type: String,

    /// Loan-to-value in percent (e.g. 80 for 80%)
    #[arg(long, alias = "ltv")]
    pub loan_to_value: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub loan_term_years: u32,

    /// Annual interest rate in percent (e.g. 3.5)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Rental variation for the conservative scenario, in percent
    #[arg(long)]
    pub rental_variation_conservative: Option<Decimal>,

    /// Rental variation for the favorable scenario, in percent
    #[arg(long)]
    pub rental_variation_favorable: Option<Decimal>,

    /// Occupancy for the conservative scenario, in percent
    #[arg(long)]
    pub occupancy_conservative: Option<Decimal>,

    /// Occupancy for the favorable scenario, in percent
    #[arg(long)]
    pub occupancy_favorable: Option<Decimal>,

    /// Monthly community (HOA) fees
    #[arg(long)]
    pub community_fees: Option<Decimal>,

    /// Annual municipal property tax (IBI)
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Province or region used to look up the transfer tax
    #[arg(long)]
    pub region: Option<String>,

    /// Number of bedrooms
    #[arg(long)]
    pub bedrooms: Option<u32>,

    /// Renovation budget
    #[arg(long)]
    pub renovation_cost: Option<Decimal>,

    /// Minimum net yield in percent (default 5.50)
    #[arg(long)]
    pub threshold: Option<Decimal>,

    /// JSON file with a property record used to fill blank fields
    #[arg(long)]
    pub record: Option<String>,

    /// JSON file with a transfer tax table replacing the built-in one
    #[arg(long)]
    pub tax_table: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for transfer tax lookup
#[derive(Args)]
pub struct TaxRateArgs {
    /// Province or region to resolve
    #[arg(long)]
    pub region: Option<String>,

    /// JSON file with a transfer tax table replacing the built-in one
    #[arg(long)]
    pub tax_table: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut inv_input: InvestmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(&args)?
    };

    if let Some(threshold) = args.threshold {
        inv_input.viability_threshold = Some(threshold);
    }
    if let Some(ref path) = args.record {
        let record: PropertyRecord = input::file::read_json(path)?;
        inv_input = record.apply_defaults(inv_input);
    }

    let result = match args.tax_table {
        Some(ref path) => {
            let table = load_tax_table(path)?;
            investment::analyze_investment_with_table(&inv_input, &table)?
        }
        None => investment::analyze_investment(&inv_input)?,
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_tax_rate(args: TaxRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let resolution = match args.tax_table {
        Some(ref path) => load_tax_table(path)?.resolve(args.region.as_deref()),
        None => TaxRateTable::builtin().resolve(args.region.as_deref()),
    };
    Ok(serde_json::to_value(resolution)?)
}

fn input_from_flags(args: &AnalyzeArgs) -> Result<InvestmentInput, Box<dyn std::error::Error>> {
    Ok(InvestmentInput {
        acquisition: AcquisitionParameters {
            // Zero lets --record supply the price through apply_defaults
            purchase_price: match (args.purchase_price, &args.record) {
                (Some(price), _) => price,
                (None, Some(_)) => Decimal::ZERO,
                (None, None) => {
                    return Err("--purchase-price is required (or provide --input or --record)".into())
                }
            },
            closing_costs: args.closing_costs.unwrap_or(Decimal::ZERO),
            monthly_rent: args
                .monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
            management_plan: parse_choice("--management-plan", &args.management_plan)?,
        },
        financing: FinancingParameters {
            financing_type: parse_choice("--financing-type", &args.financing_type)?,
            loan_to_value: args.loan_to_value.unwrap_or(Decimal::ZERO),
            loan_term_years: args.loan_term_years,
            interest_rate: args.interest_rate.unwrap_or(Decimal::ZERO),
        },
        scenarios: ScenarioDrivers {
            rental_variation_conservative: args
                .rental_variation_conservative
                .unwrap_or(Decimal::ZERO),
            rental_variation_favorable: args.rental_variation_favorable.unwrap_or(Decimal::ZERO),
            occupancy_rate_conservative: args.occupancy_conservative.unwrap_or(dec!(100)),
            occupancy_rate_favorable: args.occupancy_favorable.unwrap_or(dec!(100)),
        },
        property: PropertyContext {
            community_fees_monthly: args.community_fees.unwrap_or(Decimal::ZERO),
            annual_property_tax: args.property_tax.unwrap_or(Decimal::ZERO),
            region: args.region.clone(),
            bedroom_count: args.bedrooms,
            renovation_cost: args.renovation_cost,
        },
        viability_threshold: None,
    })
}

fn load_tax_table(path: &str) -> Result<TaxRateTable, Box<dyn std::error::Error>> {
    let table: TaxRateTable = input::file::read_json(path)?;
    if table.is_empty() {
        return Err(format!("Tax table '{}' has no entries", path).into());
    }
    Ok(table)
}

/// Parse a kebab- or snake-case flag value into one of the core enums.
fn parse_choice<T: DeserializeOwned>(flag: &str, raw: &str) -> Result<T, Box<dyn std::error::Error>> {
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(Value::String(normalized))
        .map_err(|_| format!("Invalid value '{}' for {}", raw, flag).into())
}
