mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::{AnalyzeArgs, TaxRateArgs};
use commands::scenarios::SensitivityArgs;

/// Rental property profitability analysis
#[derive(Parser)]
#[command(
    name = "pyield",
    version,
    about = "Rental property profitability analysis",
    long_about = "Estimates acquisition costs, fees, financing and net rental yields \
                  for a residential purchase under conservative and favorable \
                  scenarios, and decides whether it clears a target yield. \
                  Set RUST_LOG=debug to trace the calculation on stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full two-scenario profitability analysis
    Analyze(AnalyzeArgs),
    /// Resolve the transfer tax rate for a region
    TaxRate(TaxRateArgs),
    /// Sweep two investment drivers and tabulate a yield
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::investment::run_analyze(args),
        Commands::TaxRate(args) => commands::investment::run_tax_rate(args),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args),
        Commands::Version => {
            println!("pyield {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
