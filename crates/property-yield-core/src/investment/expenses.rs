use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::income::{IncomeProjection, MONTHS_PER_YEAR};
use super::totals::InvestmentTotals;
use super::types::{AcquisitionParameters, FinancingParameters, PropertyContext, ScenarioPair};
use crate::types::{Money, Rate};

/// Annual home insurance premium as a fraction of purchase price.
pub const HOME_INSURANCE_RATE: Rate = dec!(0.001);

/// Recurring costs. Monthly unless the name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub community_fees_monthly: Money,
    pub home_insurance_monthly: Money,
    /// Municipal property tax (IBI) spread over twelve months
    pub ibi_monthly: Money,
    /// Manager's cut of gross monthly rent
    pub management_monthly: ScenarioPair<Money>,
    /// Same for both scenarios: the loan does not depend on rent drivers
    pub loan_interest_annual: Money,
}

pub fn compute_operating_expenses(
    acquisition: &AcquisitionParameters,
    property: &PropertyContext,
    income: &IncomeProjection,
    totals: &InvestmentTotals,
    financing: &FinancingParameters,
) -> OperatingExpenses {
    let management_percentage = acquisition.management_plan.percentage();

    OperatingExpenses {
        community_fees_monthly: property.community_fees_monthly,
        home_insurance_monthly: acquisition.purchase_price * HOME_INSURANCE_RATE / MONTHS_PER_YEAR,
        ibi_monthly: property.annual_property_tax / MONTHS_PER_YEAR,
        management_monthly: income
            .gross_monthly_rent
            .map(|rent| *rent * management_percentage),
        loan_interest_annual: totals.loan_amount * financing.interest_rate / Decimal::ONE_HUNDRED,
    }
}
