use clap::Args;
use serde_json::Value;

use property_yield_core::scenarios::sensitivity::{self, InvestmentSensitivityInput};

use crate::input;

/// Arguments for two-way yield sensitivity
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON file with base inputs, the two variables and the metric
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input: InvestmentSensitivityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for sensitivity analysis".into());
    };
    let result = sensitivity::run_investment_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}
