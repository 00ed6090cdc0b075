pub mod amortization;
pub mod api;
pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "yearly")]
pub mod yearly;

#[cfg(feature = "export")]
pub mod export;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
