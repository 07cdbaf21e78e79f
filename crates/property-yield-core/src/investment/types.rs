use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate};

/// Viability threshold applied when the caller does not supply one.
pub const DEFAULT_VIABILITY_THRESHOLD: Percent = dec!(5.50);

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// The two forward-looking projections every run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Conservative,
    Favorable,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Conservative, Scenario::Favorable];
}

/// One value per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPair<T> {
    pub conservative: T,
    pub favorable: T,
}

impl<T> ScenarioPair<T> {
    pub fn new(conservative: T, favorable: T) -> Self {
        Self {
            conservative,
            favorable,
        }
    }

    /// Build a pair by evaluating `f` once per scenario.
    pub fn from_fn(mut f: impl FnMut(Scenario) -> T) -> Self {
        Self {
            conservative: f(Scenario::Conservative),
            favorable: f(Scenario::Favorable),
        }
    }

    pub fn get(&self, scenario: Scenario) -> &T {
        match scenario {
            Scenario::Conservative => &self.conservative,
            Scenario::Favorable => &self.favorable,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ScenarioPair<U> {
        ScenarioPair {
            conservative: f(&self.conservative),
            favorable: f(&self.favorable),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &T)> {
        [
            (Scenario::Conservative, &self.conservative),
            (Scenario::Favorable, &self.favorable),
        ]
        .into_iter()
    }
}

// ---------------------------------------------------------------------------
// Management plan
// ---------------------------------------------------------------------------

/// Property management service tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementPlan {
    #[default]
    Basic,
    Premium,
}

impl ManagementPlan {
    pub const ALL: [ManagementPlan; 2] = [ManagementPlan::Basic, ManagementPlan::Premium];

    /// Fraction of purchase price (one-off) and of gross rent (monthly)
    /// charged by the manager.
    pub fn percentage(self) -> Rate {
        match self {
            ManagementPlan::Basic => dec!(0.05),
            ManagementPlan::Premium => dec!(0.07),
        }
    }
}

/// Loan product. Carried for reporting; no formula depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingType {
    #[default]
    FixedRate,
    VariableRate,
    Mixed,
}

// ---------------------------------------------------------------------------
// Input contract
// ---------------------------------------------------------------------------

/// Purchase terms and expected rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionParameters {
    /// Agreed purchase price; must be positive for a meaningful run
    pub purchase_price: Money,
    /// Notary, registry and other closing costs
    #[serde(default)]
    pub closing_costs: Money,
    /// Expected monthly rent before scenario adjustments
    pub monthly_rent: Money,
    #[serde(default)]
    pub management_plan: ManagementPlan,
}

/// Mortgage terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingParameters {
    #[serde(default)]
    pub financing_type: FinancingType,
    /// Loan-to-value in percent (0-100)
    pub loan_to_value: Percent,
    /// Loan term in years (reported only)
    #[serde(default)]
    pub loan_term_years: u32,
    /// Annual interest rate in percent
    pub interest_rate: Percent,
}

/// Rent variation and occupancy, one value per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDrivers {
    /// Signed percent change applied to rent and sale price
    pub rental_variation_conservative: Percent,
    pub rental_variation_favorable: Percent,
    /// Occupancy in percent (0-100)
    pub occupancy_rate_conservative: Percent,
    pub occupancy_rate_favorable: Percent,
}

impl ScenarioDrivers {
    pub fn rental_variation(&self) -> ScenarioPair<Percent> {
        ScenarioPair::new(
            self.rental_variation_conservative,
            self.rental_variation_favorable,
        )
    }

    pub fn occupancy_rate(&self) -> ScenarioPair<Percent> {
        ScenarioPair::new(
            self.occupancy_rate_conservative,
            self.occupancy_rate_favorable,
        )
    }
}

/// Facts about the property itself. Missing amounts count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyContext {
    #[serde(default)]
    pub community_fees_monthly: Money,
    /// Annual municipal property tax (IBI)
    #[serde(default)]
    pub annual_property_tax: Money,
    /// Free-text locality or province name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedroom_count: Option<u32>,
    /// Estimate from the renovation budget, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renovation_cost: Option<Money>,
}

/// Everything one engine run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub acquisition: AcquisitionParameters,
    pub financing: FinancingParameters,
    pub scenarios: ScenarioDrivers,
    #[serde(default)]
    pub property: PropertyContext,
    /// Minimum yield (percent) for a positive verdict; defaults to 5.50
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viability_threshold: Option<Percent>,
}

impl InvestmentInput {
    pub fn threshold(&self) -> Percent {
        self.viability_threshold
            .unwrap_or(DEFAULT_VIABILITY_THRESHOLD)
    }
}
