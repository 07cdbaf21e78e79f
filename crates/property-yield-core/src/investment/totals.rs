use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::acquisition::AcquisitionCosts;
use super::fees::FeesAndCapex;
use super::types::FinancingParameters;
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentTotals {
    /// Price, closing costs, taxes, capex and fees
    pub total_investment_unlevered: Money,
    /// purchase_price * LTV / 100
    pub loan_amount: Money,
    /// Unlevered total plus the loan: gross capital moved, not equity
    pub total_investment_levered: Money,
}

pub fn aggregate_totals(
    acquisition: &AcquisitionCosts,
    fees: &FeesAndCapex,
    financing: &FinancingParameters,
) -> InvestmentTotals {
    let total_investment_unlevered = acquisition.purchase_price
        + acquisition.closing_costs
        + acquisition.taxes
        + fees.renovation_cost
        + fees.furnishing_cost
        + fees.tenant_searching_fee
        + fees.real_estate_agent_fee
        + fees.property_management_fee;

    let loan_amount = acquisition.purchase_price * financing.loan_to_value / Decimal::ONE_HUNDRED;

    InvestmentTotals {
        total_investment_unlevered,
        loan_amount,
        total_investment_levered: total_investment_unlevered + loan_amount,
    }
}
