pub mod cost_model;
pub mod error;
pub mod feasibility;
pub mod types;

#[cfg(feature = "narrative")]
pub mod narrative;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::FeasibilityError;
pub use types::*;

/// Standard result type for all feasibility operations
pub type CalcResult<T> = Result<T, FeasibilityError>;
