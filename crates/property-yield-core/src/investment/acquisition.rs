use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::tax_rates::TaxRateResolution;
use super::types::{AcquisitionParameters, FinancingParameters, ScenarioDrivers, ScenarioPair};
use crate::types::{Money, Rate};

/// Deposit share assumed before financing terms are known.
pub const PROVISIONAL_DEPOSIT_RATE: Rate = dec!(0.20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Cash deposit after the LTV correction.
///
/// Only [`apply_financing`] can produce one, so any stage that takes a
/// `Deposit` necessarily runs after the financing terms were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Deposit(Money);

impl Deposit {
    pub fn amount(self) -> Money {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

/// Acquisition figures before financing is known. The deposit here is the
/// flat 20% placeholder and is not exposed to later stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalAcquisition {
    purchase_price: Money,
    closing_costs: Money,
    sale_price: ScenarioPair<Money>,
    tax_resolution: TaxRateResolution,
    taxes: Money,
    provisional_deposit: Money,
}

impl ProvisionalAcquisition {
    pub fn provisional_deposit(&self) -> Money {
        self.provisional_deposit
    }
}

/// Acquisition costs with the LTV-corrected deposit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionCosts {
    pub purchase_price: Money,
    pub closing_costs: Money,
    /// Purchase price moved by each scenario's rental variation
    pub sale_price: ScenarioPair<Money>,
    /// Transfer tax resolution used for `taxes`
    pub tax_resolution: TaxRateResolution,
    /// Transfer tax = purchase price * resolved rate
    pub taxes: Money,
    /// Equity put down = purchase price * (1 - LTV)
    pub deposit: Deposit,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// First pass: sale prices, transfer tax and a provisional deposit.
///
/// sale_price(s) = purchase_price * (1 + rental_variation(s) / 100)
pub fn estimate_acquisition(
    acquisition: &AcquisitionParameters,
    drivers: &ScenarioDrivers,
    tax_resolution: &TaxRateResolution,
) -> ProvisionalAcquisition {
    let purchase_price = acquisition.purchase_price;

    let sale_price = drivers
        .rental_variation()
        .map(|variation| purchase_price * (Decimal::ONE + *variation / Decimal::ONE_HUNDRED));

    ProvisionalAcquisition {
        purchase_price,
        closing_costs: acquisition.closing_costs,
        sale_price,
        tax_resolution: tax_resolution.clone(),
        taxes: purchase_price * tax_resolution.rate,
        provisional_deposit: purchase_price * PROVISIONAL_DEPOSIT_RATE,
    }
}

/// Second pass: replace the provisional deposit with
/// `purchase_price * (1 - LTV / 100)`. A negative LTV counts as zero.
pub fn apply_financing(
    provisional: ProvisionalAcquisition,
    financing: &FinancingParameters,
) -> AcquisitionCosts {
    let ltv = financing.loan_to_value.max(Decimal::ZERO);
    let deposit = provisional.purchase_price * (Decimal::ONE - ltv / Decimal::ONE_HUNDRED);

    AcquisitionCosts {
        purchase_price: provisional.purchase_price,
        closing_costs: provisional.closing_costs,
        sale_price: provisional.sale_price,
        tax_resolution: provisional.tax_resolution,
        taxes: provisional.taxes,
        deposit: Deposit(deposit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::tax_rates::TaxRateTable;
    use crate::investment::types::{FinancingType, ManagementPlan};

    fn params() -> AcquisitionParameters {
        AcquisitionParameters {
            purchase_price: dec!(100000),
            closing_costs: dec!(1500),
            monthly_rent: dec!(500),
            management_plan: ManagementPlan::Basic,
        }
    }

    fn drivers() -> ScenarioDrivers {
        ScenarioDrivers {
            rental_variation_conservative: dec!(-10),
            rental_variation_favorable: dec!(5),
            occupancy_rate_conservative: dec!(90),
            occupancy_rate_favorable: dec!(95),
        }
    }

    fn financing(ltv: Decimal) -> FinancingParameters {
        FinancingParameters {
            financing_type: FinancingType::FixedRate,
            loan_to_value: ltv,
            loan_term_years: 25,
            interest_rate: dec!(3.5),
        }
    }

    #[test]
    fn test_sale_price_follows_rental_variation() {
        let res = TaxRateTable::builtin().resolve(None);
        let prov = estimate_acquisition(&params(), &drivers(), &res);
        let costs = apply_financing(prov, &financing(dec!(55)));
        assert_eq!(costs.sale_price.conservative, dec!(90000));
        assert_eq!(costs.sale_price.favorable, dec!(105000));
    }

    #[test]
    fn test_taxes_use_resolved_rate() {
        let res = TaxRateTable::builtin().resolve(Some("madrid"));
        let prov = estimate_acquisition(&params(), &drivers(), &res);
        let costs = apply_financing(prov, &financing(dec!(55)));
        assert_eq!(costs.taxes, dec!(6000));
        assert_eq!(costs.tax_resolution.rate, dec!(0.06));
    }

    #[test]
    fn test_provisional_deposit_is_overwritten() {
        let res = TaxRateTable::builtin().resolve(None);
        let prov = estimate_acquisition(&params(), &drivers(), &res);
        assert_eq!(prov.provisional_deposit(), dec!(20000));

        let costs = apply_financing(prov, &financing(dec!(55)));
        assert_eq!(costs.deposit.amount(), dec!(45000));
    }

    #[test]
    fn test_full_ltv_leaves_no_deposit() {
        let res = TaxRateTable::builtin().resolve(None);
        let prov = estimate_acquisition(&params(), &drivers(), &res);
        let costs = apply_financing(prov, &financing(dec!(100)));
        assert_eq!(costs.deposit.amount(), Decimal::ZERO);
        assert!(!costs.deposit.is_positive());
    }

    #[test]
    fn test_negative_ltv_counts_as_zero() {
        let res = TaxRateTable::builtin().resolve(None);
        let prov = estimate_acquisition(&params(), &drivers(), &res);
        let costs = apply_financing(prov, &financing(dec!(-20)));
        assert_eq!(costs.deposit.amount(), dec!(100000));
    }
}
