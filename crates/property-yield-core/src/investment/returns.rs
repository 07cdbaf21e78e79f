use serde::{Deserialize, Serialize};

use super::acquisition::Deposit;
use super::expenses::OperatingExpenses;
use super::income::{IncomeProjection, MONTHS_PER_YEAR};
use super::totals::InvestmentTotals;
use super::types::ScenarioPair;
use crate::types::{percent_of, Money, Percent};

/// Net rent and yields, before and after financing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsAndYields {
    pub net_monthly_rent_unlevered: ScenarioPair<Money>,
    pub net_annual_rent_unlevered: ScenarioPair<Money>,
    /// Net annual rent over total unlevered investment, in percent
    pub net_yield_unlevered: ScenarioPair<Percent>,
    pub net_monthly_rent_levered: ScenarioPair<Money>,
    pub net_annual_rent_levered: ScenarioPair<Money>,
    /// Return on capital employed: levered net annual rent over the deposit
    pub net_yield_levered: ScenarioPair<Percent>,
}

/// Net rent and yields for both scenarios.
///
/// Every ratio is guarded: a denominator at or below zero produces a 0%
/// yield, so an all-loan purchase reports levered yields of zero.
pub fn compute_returns(
    income: &IncomeProjection,
    expenses: &OperatingExpenses,
    totals: &InvestmentTotals,
    deposit: Deposit,
) -> ReturnsAndYields {
    let net_monthly_rent_unlevered = ScenarioPair::from_fn(|s| {
        *income.gross_monthly_rent.get(s)
            - expenses.community_fees_monthly
            - expenses.home_insurance_monthly
            - expenses.ibi_monthly
            - *expenses.management_monthly.get(s)
    });
    let net_annual_rent_unlevered = net_monthly_rent_unlevered.map(|m| *m * MONTHS_PER_YEAR);
    let net_yield_unlevered = net_annual_rent_unlevered
        .map(|annual| percent_of(*annual, totals.total_investment_unlevered));

    let monthly_interest = expenses.loan_interest_annual / MONTHS_PER_YEAR;
    let net_monthly_rent_levered = net_monthly_rent_unlevered.map(|m| *m - monthly_interest);
    let net_annual_rent_levered = net_monthly_rent_levered.map(|m| *m * MONTHS_PER_YEAR);
    let net_yield_levered =
        net_annual_rent_levered.map(|annual| percent_of(*annual, deposit.amount()));

    ReturnsAndYields {
        net_monthly_rent_unlevered,
        net_annual_rent_unlevered,
        net_yield_unlevered,
        net_monthly_rent_levered,
        net_annual_rent_levered,
        net_yield_levered,
    }
}
