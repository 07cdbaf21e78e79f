use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::time::Instant;

use super::acquisition::{apply_financing, estimate_acquisition, AcquisitionCosts};
use super::expenses::{compute_operating_expenses, OperatingExpenses};
use super::fees::{compute_fees, FeesAndCapex};
use super::income::{project_income, IncomeProjection};
use super::returns::{compute_returns, ReturnsAndYields};
use super::tax_rates::TaxRateTable;
use super::totals::{aggregate_totals, InvestmentTotals};
use super::types::{InvestmentInput, Scenario, ScenarioPair};
use super::viability::{assess_viability, ViabilityDecision};
use crate::error::PropertyYieldError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PropertyYieldResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row per scenario: the drivers and the figures they produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioTrace {
    pub scenario: Scenario,
    pub rental_variation: Percent,
    pub occupancy_rate: Percent,
    pub sale_price: Money,
    pub gross_monthly_rent: Money,
    pub management_monthly: Money,
    pub net_monthly_rent_unlevered: Money,
    pub net_monthly_rent_levered: Money,
    pub gross_yield: Percent,
    pub net_yield_unlevered: Percent,
    pub net_yield_levered: Percent,
}

/// Complete result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialResult {
    pub acquisition_costs: AcquisitionCosts,
    pub fees_and_capex: FeesAndCapex,
    pub investment_totals: InvestmentTotals,
    pub income: IncomeProjection,
    pub operating_expenses: OperatingExpenses,
    pub returns_and_yields: ReturnsAndYields,
    pub scenarios: ScenarioPair<ScenarioTrace>,
    /// Verdict, threshold applied and the qualifying yields
    #[serde(flatten)]
    pub viability: ViabilityDecision,
}

impl FinancialResult {
    pub fn meets_threshold(&self) -> bool {
        self.viability.meets_threshold
    }

    pub fn threshold(&self) -> Percent {
        self.viability.threshold
    }
}

// ---------------------------------------------------------------------------
// Pure engine
// ---------------------------------------------------------------------------

/// Run every stage against the built-in tax table.
///
/// Total and side-effect free: the same input always yields the same result,
/// and degenerate input degrades (default tax rate, zero yields) instead of
/// failing. Callers must make sure `purchase_price > 0`; see
/// [`analyze_investment`] for the validating entry point.
pub fn evaluate(input: &InvestmentInput) -> FinancialResult {
    evaluate_with_table(input, TaxRateTable::builtin())
}

/// Run every stage against a caller-supplied tax table.
pub fn evaluate_with_table(input: &InvestmentInput, table: &TaxRateTable) -> FinancialResult {
    let tax_resolution = table.resolve(input.property.region.as_deref());

    let provisional = estimate_acquisition(&input.acquisition, &input.scenarios, &tax_resolution);
    let acquisition_costs = apply_financing(provisional, &input.financing);

    let fees_and_capex = compute_fees(&input.acquisition, &input.property);
    let investment_totals = aggregate_totals(&acquisition_costs, &fees_and_capex, &input.financing);
    debug!(
        "totals: unlevered {}, loan {}, deposit {}",
        investment_totals.total_investment_unlevered,
        investment_totals.loan_amount,
        acquisition_costs.deposit.amount()
    );

    let income = project_income(&input.acquisition, &input.scenarios, &acquisition_costs);
    let operating_expenses = compute_operating_expenses(
        &input.acquisition,
        &input.property,
        &income,
        &investment_totals,
        &input.financing,
    );
    let returns_and_yields = compute_returns(
        &income,
        &operating_expenses,
        &investment_totals,
        acquisition_costs.deposit,
    );

    let viability = assess_viability(&returns_and_yields, input.threshold());
    debug!(
        "viability: best {:?} at {}% vs threshold {}% -> {}",
        viability.best_measure, viability.best_yield, viability.threshold, viability.meets_threshold
    );

    let scenarios = ScenarioPair::from_fn(|s| ScenarioTrace {
        scenario: s,
        rental_variation: *input.scenarios.rental_variation().get(s),
        occupancy_rate: *input.scenarios.occupancy_rate().get(s),
        sale_price: *acquisition_costs.sale_price.get(s),
        gross_monthly_rent: *income.gross_monthly_rent.get(s),
        management_monthly: *operating_expenses.management_monthly.get(s),
        net_monthly_rent_unlevered: *returns_and_yields.net_monthly_rent_unlevered.get(s),
        net_monthly_rent_levered: *returns_and_yields.net_monthly_rent_levered.get(s),
        gross_yield: *income.gross_yield.get(s),
        net_yield_unlevered: *returns_and_yields.net_yield_unlevered.get(s),
        net_yield_levered: *returns_and_yields.net_yield_levered.get(s),
    });

    FinancialResult {
        acquisition_costs,
        fees_and_capex,
        investment_totals,
        income,
        operating_expenses,
        returns_and_yields,
        scenarios,
        viability,
    }
}

// ---------------------------------------------------------------------------
// Validated entry point
// ---------------------------------------------------------------------------

/// Validate the input, run the engine against the built-in tax table and
/// wrap the result with warnings and metadata.
pub fn analyze_investment(
    input: &InvestmentInput,
) -> PropertyYieldResult<ComputationOutput<FinancialResult>> {
    analyze_investment_with_table(input, TaxRateTable::builtin())
}

/// [`analyze_investment`] with a configured tax table.
pub fn analyze_investment_with_table(
    input: &InvestmentInput,
    table: &TaxRateTable,
) -> PropertyYieldResult<ComputationOutput<FinancialResult>> {
    let start = Instant::now();

    validate_input(input)?;

    let result = evaluate_with_table(input, table);
    let warnings = collect_warnings(input, &result);
    for w in &warnings {
        warn!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property Investment Profitability (Two-Scenario Net Yield)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: &str) -> PropertyYieldError {
    PropertyYieldError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn require_non_negative(field: &str, value: Decimal) -> PropertyYieldResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "Must not be negative"));
    }
    Ok(())
}

fn require_percent_range(field: &str, value: Percent) -> PropertyYieldResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(invalid(field, "Must be between 0 and 100"));
    }
    Ok(())
}

pub(crate) fn validate_input(input: &InvestmentInput) -> PropertyYieldResult<()> {
    let acq = &input.acquisition;
    if acq.purchase_price <= Decimal::ZERO {
        return Err(invalid(
            "acquisition.purchase_price",
            "Purchase price must be positive",
        ));
    }
    require_non_negative("acquisition.closing_costs", acq.closing_costs)?;
    require_non_negative("acquisition.monthly_rent", acq.monthly_rent)?;

    require_percent_range("financing.loan_to_value", input.financing.loan_to_value)?;
    require_non_negative("financing.interest_rate", input.financing.interest_rate)?;

    let drivers = &input.scenarios;
    require_percent_range(
        "scenarios.occupancy_rate_conservative",
        drivers.occupancy_rate_conservative,
    )?;
    require_percent_range(
        "scenarios.occupancy_rate_favorable",
        drivers.occupancy_rate_favorable,
    )?;
    for (field, variation) in [
        (
            "scenarios.rental_variation_conservative",
            drivers.rental_variation_conservative,
        ),
        (
            "scenarios.rental_variation_favorable",
            drivers.rental_variation_favorable,
        ),
    ] {
        if variation <= dec!(-100) {
            return Err(invalid(field, "Rental variation must be above -100%"));
        }
    }

    let property = &input.property;
    require_non_negative(
        "property.community_fees_monthly",
        property.community_fees_monthly,
    )?;
    require_non_negative("property.annual_property_tax", property.annual_property_tax)?;
    if let Some(renovation) = property.renovation_cost {
        require_non_negative("property.renovation_cost", renovation)?;
    }

    if let Some(threshold) = input.viability_threshold {
        require_non_negative("viability_threshold", threshold)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(input: &InvestmentInput, result: &FinancialResult) -> Vec<String> {
    let mut warnings = Vec::new();

    let resolution = &result.acquisition_costs.tax_resolution;
    if resolution.is_default() {
        match input.property.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => warnings.push(format!(
                "Region '{region}' not found in the tax table; default transfer tax of {}% applied",
                resolution.rate * Decimal::ONE_HUNDRED
            )),
            _ => warnings.push(format!(
                "No region supplied; default transfer tax of {}% applied",
                resolution.rate * Decimal::ONE_HUNDRED
            )),
        }
    }

    if let Some(bedrooms) = input.property.bedroom_count.filter(|n| *n > 1) {
        warnings.push(format!(
            "Furnishing cost for {bedrooms} bedrooms is {} (base x 420.2 x bedrooms), far above the one-bedroom figure; verify before relying on the verdict",
            result.fees_and_capex.furnishing_cost.round_dp(2)
        ));
    }

    if !result.acquisition_costs.deposit.is_positive() {
        warnings.push(format!(
            "Deposit is zero at {}% LTV; levered yields reported as 0",
            input.financing.loan_to_value
        ));
    } else if input.financing.loan_to_value > dec!(80) {
        warnings.push(format!(
            "LTV of {}% exceeds 80%: high leverage",
            input.financing.loan_to_value
        ));
    }

    for (scenario, net) in result.returns_and_yields.net_monthly_rent_unlevered.iter() {
        if *net < Decimal::ZERO {
            warnings.push(format!(
                "Net monthly rent is negative in the {scenario:?} scenario ({})",
                net.round_dp(2)
            ));
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
