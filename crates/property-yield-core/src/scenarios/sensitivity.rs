use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropertyYieldError;
use crate::investment::analysis::{evaluate, validate_input, FinancialResult};
use crate::investment::types::InvestmentInput;
use crate::types::*;
use crate::PropertyYieldResult;

/// Upper bound on sweep points per axis.
pub const MAX_SWEEP_POINTS: usize = 101;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input fields a sensitivity axis can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentDriver {
    PurchasePrice,
    ClosingCosts,
    MonthlyRent,
    LoanToValue,
    InterestRate,
    OccupancyRateConservative,
    OccupancyRateFavorable,
    RentalVariationConservative,
    RentalVariationFavorable,
}

impl InvestmentDriver {
    const NAMES: [(&'static str, InvestmentDriver); 9] = [
        ("purchase_price", InvestmentDriver::PurchasePrice),
        ("closing_costs", InvestmentDriver::ClosingCosts),
        ("monthly_rent", InvestmentDriver::MonthlyRent),
        ("loan_to_value", InvestmentDriver::LoanToValue),
        ("interest_rate", InvestmentDriver::InterestRate),
        (
            "occupancy_rate_conservative",
            InvestmentDriver::OccupancyRateConservative,
        ),
        (
            "occupancy_rate_favorable",
            InvestmentDriver::OccupancyRateFavorable,
        ),
        (
            "rental_variation_conservative",
            InvestmentDriver::RentalVariationConservative,
        ),
        (
            "rental_variation_favorable",
            InvestmentDriver::RentalVariationFavorable,
        ),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
    }

    fn slot(self, input: &mut InvestmentInput) -> &mut Decimal {
        match self {
            InvestmentDriver::PurchasePrice => &mut input.acquisition.purchase_price,
            InvestmentDriver::ClosingCosts => &mut input.acquisition.closing_costs,
            InvestmentDriver::MonthlyRent => &mut input.acquisition.monthly_rent,
            InvestmentDriver::LoanToValue => &mut input.financing.loan_to_value,
            InvestmentDriver::InterestRate => &mut input.financing.interest_rate,
            InvestmentDriver::OccupancyRateConservative => {
                &mut input.scenarios.occupancy_rate_conservative
            }
            InvestmentDriver::OccupancyRateFavorable => &mut input.scenarios.occupancy_rate_favorable,
            InvestmentDriver::RentalVariationConservative => {
                &mut input.scenarios.rental_variation_conservative
            }
            InvestmentDriver::RentalVariationFavorable => {
                &mut input.scenarios.rental_variation_favorable
            }
        }
    }

    /// Current value of this driver in `input`.
    pub fn get(self, input: &InvestmentInput) -> Decimal {
        let mut copy = input.clone();
        *self.slot(&mut copy)
    }

    /// Copy of `input` with this driver set to `value`.
    pub fn with_value(self, input: &InvestmentInput, value: Decimal) -> InvestmentInput {
        let mut copy = input.clone();
        *self.slot(&mut copy) = value;
        copy
    }
}

/// Which yield a sensitivity grid reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldMetric {
    GrossYieldConservative,
    GrossYieldFavorable,
    NetYieldUnleveredConservative,
    NetYieldUnleveredFavorable,
    NetYieldLeveredConservative,
    NetYieldLeveredFavorable,
}

impl YieldMetric {
    pub fn read(self, result: &FinancialResult) -> Percent {
        let r = &result.returns_and_yields;
        match self {
            YieldMetric::GrossYieldConservative => result.income.gross_yield.conservative,
            YieldMetric::GrossYieldFavorable => result.income.gross_yield.favorable,
            YieldMetric::NetYieldUnleveredConservative => r.net_yield_unlevered.conservative,
            YieldMetric::NetYieldUnleveredFavorable => r.net_yield_unlevered.favorable,
            YieldMetric::NetYieldLeveredConservative => r.net_yield_levered.conservative,
            YieldMetric::NetYieldLeveredFavorable => r.net_yield_levered.favorable,
        }
    }
}

/// Input for 2-way sensitivity analysis on an investment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSensitivityInput {
    /// Base case the sweeps are applied to
    pub base_inputs: InvestmentInput,
    /// First variable to sweep (rows); name must be an investment driver
    pub variable_1: SensitivityVariable,
    /// Second variable to sweep (columns)
    pub variable_2: SensitivityVariable,
    pub output_metric: YieldMetric,
}

/// Output of 2-way sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable_1_name: String,
    pub variable_2_name: String,
    pub variable_1_values: Vec<Decimal>,
    pub variable_2_values: Vec<Decimal>,
    pub output_metric: YieldMetric,
    /// Matrix[i][j] = output when variable_1 = variable_1_values[i], variable_2 = variable_2_values[j]
    pub matrix: Vec<Vec<Decimal>>,
    /// Matrix[i][j] = whether that cell meets the viability threshold
    pub viable: Vec<Vec<bool>>,
    /// Output for the unmodified base inputs
    pub base_case_value: Decimal,
    /// Cell nearest to the base inputs (row, col)
    pub base_case_position: (usize, usize),
}

// ---------------------------------------------------------------------------
// Sweep helpers
// ---------------------------------------------------------------------------

/// Generate the sweep values for a sensitivity variable from min to max with step.
fn generate_sweep_values(var: &SensitivityVariable) -> PropertyYieldResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(PropertyYieldError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(PropertyYieldError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Min must be <= max".into(),
        });
    }

    let too_many = || PropertyYieldError::InvalidInput {
        field: format!("variable:{}", var.name),
        reason: format!("Sweep exceeds {MAX_SWEEP_POINTS} points; use a larger step"),
    };

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        if values.len() == MAX_SWEEP_POINTS {
            return Err(too_many());
        }
        values.push(current);
        current += var.step;
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }
    if values.len() > MAX_SWEEP_POINTS {
        return Err(too_many());
    }

    Ok(values)
}

/// Find the closest index to a target value in a sorted list.
fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| (**v - target).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn parse_driver(var: &SensitivityVariable) -> PropertyYieldResult<InvestmentDriver> {
    InvestmentDriver::from_name(&var.name).ok_or_else(|| PropertyYieldError::InvalidInput {
        field: format!("variable:{}", var.name),
        reason: "Not an investment driver".into(),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sweep two investment drivers and report one yield per combination.
///
/// Cells whose modified input fails validation (e.g. a zero purchase price)
/// are reported as 0 and listed in the warnings.
pub fn run_investment_sensitivity(
    input: &InvestmentSensitivityInput,
) -> PropertyYieldResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(&input.base_inputs)?;
    let driver_1 = parse_driver(&input.variable_1)?;
    let driver_2 = parse_driver(&input.variable_2)?;
    if driver_1 == driver_2 {
        return Err(PropertyYieldError::InvalidInput {
            field: "variable_2".into(),
            reason: "Sensitivity variables must differ".into(),
        });
    }

    let v1_values = generate_sweep_values(&input.variable_1)?;
    let v2_values = generate_sweep_values(&input.variable_2)?;

    let mut matrix = Vec::with_capacity(v1_values.len());
    let mut viable = Vec::with_capacity(v1_values.len());

    for v1 in &v1_values {
        let mut row = Vec::with_capacity(v2_values.len());
        let mut viable_row = Vec::with_capacity(v2_values.len());
        for v2 in &v2_values {
            let cell = driver_2.with_value(&driver_1.with_value(&input.base_inputs, *v1), *v2);
            match validate_input(&cell) {
                Ok(()) => {
                    let result = evaluate(&cell);
                    row.push(input.output_metric.read(&result));
                    viable_row.push(result.meets_threshold());
                }
                Err(e) => {
                    warnings.push(format!("Evaluation skipped at ({v1}, {v2}): {e}"));
                    row.push(Decimal::ZERO);
                    viable_row.push(false);
                }
            }
        }
        matrix.push(row);
        viable.push(viable_row);
    }

    let base_case_value = input.output_metric.read(&evaluate(&input.base_inputs));
    let base_row = closest_index(&v1_values, driver_1.get(&input.base_inputs));
    let base_col = closest_index(&v2_values, driver_2.get(&input.base_inputs));

    let output = SensitivityOutput {
        variable_1_name: input.variable_1.name.clone(),
        variable_2_name: input.variable_2.name.clone(),
        variable_1_values: v1_values,
        variable_2_values: v2_values,
        output_metric: input.output_metric,
        matrix,
        viable,
        base_case_value,
        base_case_position: (base_row, base_col),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Investment Yield Sensitivity",
        &serde_json::json!({
            "variable_1": input.variable_1.name,
            "variable_2": input.variable_2.name,
            "output_metric": input.output_metric,
            "threshold": input.base_inputs.threshold(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
