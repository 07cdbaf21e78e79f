pub mod error;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::PropertyYieldError;
pub use types::*;

/// Standard result type for all property-yield operations
pub type PropertyYieldResult<T> = Result<T, PropertyYieldError>;
