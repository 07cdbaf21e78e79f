pub mod investment;
pub mod scenarios;
