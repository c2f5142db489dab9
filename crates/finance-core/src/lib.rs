pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "inventory")]
pub mod inventory;

#[cfg(feature = "reports")]
pub mod reports;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all finance-core operations
pub type FinanceResult<T> = Result<T, FinanceError>;
