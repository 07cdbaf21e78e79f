use napi::Result as NapiResult;
use napi_derive::napi;

use property_yield_core::investment::{self, InvestmentInput, TaxRateTable};
use property_yield_core::scenarios::sensitivity::{self, InvestmentSensitivityInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_tax_table(tax_table_json: Option<String>) -> NapiResult<Option<TaxRateTable>> {
    tax_table_json
        .map(|json| serde_json::from_str::<TaxRateTable>(&json).map_err(to_napi_error))
        .transpose()
}

// ---------------------------------------------------------------------------
// Investment analysis
// ---------------------------------------------------------------------------

/// Validated analysis wrapped in the output envelope. `tax_table_json`, when
/// given, replaces the built-in transfer tax table.
#[napi]
pub fn analyze_investment(input_json: String, tax_table_json: Option<String>) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = match parse_tax_table(tax_table_json)? {
        Some(table) => investment::analyze_investment_with_table(&input, &table),
        None => investment::analyze_investment(&input),
    }
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare `FinancialResult`: no validation, warnings or metadata.
#[napi]
pub fn evaluate_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = investment::evaluate(&input);
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn resolve_tax_rate(region: Option<String>, tax_table_json: Option<String>) -> NapiResult<String> {
    let resolution = match parse_tax_table(tax_table_json)? {
        Some(table) => table.resolve(region.as_deref()),
        None => TaxRateTable::builtin().resolve(region.as_deref()),
    };
    serde_json::to_string(&resolution).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn investment_sensitivity(input_json: String) -> NapiResult<String> {
    let input: InvestmentSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::run_investment_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
