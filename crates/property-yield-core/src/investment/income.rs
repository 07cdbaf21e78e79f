use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::acquisition::AcquisitionCosts;
use super::types::{AcquisitionParameters, ScenarioDrivers, ScenarioPair};
use crate::types::{percent_of, Money, Percent};

pub(crate) const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rent projected per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProjection {
    /// rent * (1 + variation) * occupancy
    pub gross_monthly_rent: ScenarioPair<Money>,
    pub gross_annual_rent: ScenarioPair<Money>,
    /// Gross annual rent over scenario sale price, in percent
    pub gross_yield: ScenarioPair<Percent>,
}

pub fn project_income(
    acquisition: &AcquisitionParameters,
    drivers: &ScenarioDrivers,
    costs: &AcquisitionCosts,
) -> IncomeProjection {
    let variation = drivers.rental_variation();
    let occupancy = drivers.occupancy_rate();

    let gross_monthly_rent = ScenarioPair::from_fn(|s| {
        acquisition.monthly_rent
            * (Decimal::ONE + *variation.get(s) / Decimal::ONE_HUNDRED)
            * (*occupancy.get(s) / Decimal::ONE_HUNDRED)
    });
    let gross_annual_rent = gross_monthly_rent.map(|m| *m * MONTHS_PER_YEAR);
    let gross_yield = ScenarioPair::from_fn(|s| {
        percent_of(*gross_annual_rent.get(s), *costs.sale_price.get(s))
    });

    IncomeProjection {
        gross_monthly_rent,
        gross_annual_rent,
        gross_yield,
    }
}
