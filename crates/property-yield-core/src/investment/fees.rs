use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{AcquisitionParameters, PropertyContext};
use crate::types::{Money, Rate};

/// Furnishing budget for a one-bedroom unit (also the default).
pub const FURNISHING_BASE_COST: Money = dec!(3738.17);
/// Per-bedroom multiplier applied on top of the base cost above one bedroom.
pub const FURNISHING_BEDROOM_MULTIPLIER: Decimal = dec!(420.2);
/// Tenant search fee as a multiple of one month's rent (one month + 21% VAT).
pub const TENANT_SEARCH_RENT_MULTIPLE: Decimal = dec!(1.21);
/// Buyer's agent commission on the purchase price.
pub const AGENT_FEE_RATE: Rate = dec!(0.025);

/// One-off fees and capital expenditure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeesAndCapex {
    pub renovation_cost: Money,
    pub furnishing_cost: Money,
    pub tenant_searching_fee: Money,
    pub real_estate_agent_fee: Money,
    pub property_management_fee: Money,
    /// Plan percentage used for the management fee (fraction)
    pub management_percentage: Rate,
}

/// Furnishing budget by bedroom count.
///
/// Units with more than one bedroom use `base * 420.2 * bedrooms`, which is
/// two orders of magnitude above the one-bedroom figure. The formula is kept
/// as-is because changing it moves viability verdicts.
pub fn furnishing_cost(bedroom_count: Option<u32>) -> Money {
    match bedroom_count {
        Some(n) if n > 1 => {
            FURNISHING_BASE_COST * FURNISHING_BEDROOM_MULTIPLIER * Decimal::from(n)
        }
        _ => FURNISHING_BASE_COST,
    }
}

pub fn compute_fees(acquisition: &AcquisitionParameters, property: &PropertyContext) -> FeesAndCapex {
    let management_percentage = acquisition.management_plan.percentage();

    FeesAndCapex {
        renovation_cost: property.renovation_cost.unwrap_or(Decimal::ZERO),
        furnishing_cost: furnishing_cost(property.bedroom_count),
        tenant_searching_fee: acquisition.monthly_rent * TENANT_SEARCH_RENT_MULTIPLE,
        real_estate_agent_fee: acquisition.purchase_price * AGENT_FEE_RATE,
        property_management_fee: acquisition.purchase_price * management_percentage,
        management_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::types::ManagementPlan;

    fn params(plan: ManagementPlan) -> AcquisitionParameters {
        AcquisitionParameters {
            purchase_price: dec!(200000),
            closing_costs: dec!(2000),
            monthly_rent: dec!(800),
            management_plan: plan,
        }
    }

    #[test]
    fn test_furnishing_by_bedrooms() {
        assert_eq!(furnishing_cost(None), dec!(3738.17));
        assert_eq!(furnishing_cost(Some(1)), dec!(3738.17));
        assert_eq!(furnishing_cost(Some(0)), dec!(3738.17));
        // 3738.17 * 420.2 * 2
        assert_eq!(furnishing_cost(Some(2)), dec!(3141558.068));
    }

    #[test]
    fn test_basic_plan_fees() {
        let fees = compute_fees(&params(ManagementPlan::Basic), &PropertyContext::default());
        assert_eq!(fees.renovation_cost, Decimal::ZERO);
        assert_eq!(fees.tenant_searching_fee, dec!(968));
        assert_eq!(fees.real_estate_agent_fee, dec!(5000));
        assert_eq!(fees.property_management_fee, dec!(10000));
        assert_eq!(fees.management_percentage, dec!(0.05));
    }

    #[test]
    fn test_premium_plan_and_renovation() {
        let property = PropertyContext {
            renovation_cost: Some(dec!(12500)),
            bedroom_count: Some(1),
            ..PropertyContext::default()
        };
        let fees = compute_fees(&params(ManagementPlan::Premium), &property);
        assert_eq!(fees.renovation_cost, dec!(12500));
        assert_eq!(fees.property_management_fee, dec!(14000));
    }
}
