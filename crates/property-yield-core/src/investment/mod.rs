pub mod acquisition;
pub mod analysis;
pub mod expenses;
pub mod fees;
pub mod income;
pub mod property_record;
pub mod returns;
pub mod tax_rates;
pub mod totals;
pub mod types;
pub mod viability;

pub use analysis::{
    analyze_investment, analyze_investment_with_table, evaluate, evaluate_with_table,
    FinancialResult, ScenarioTrace,
};
pub use tax_rates::{resolve_tax_rate, TaxRateTable};
pub use types::{InvestmentInput, Scenario, ScenarioPair};
