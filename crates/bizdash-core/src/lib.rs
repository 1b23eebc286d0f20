pub mod error;
pub mod transactions;
pub mod types;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "breakeven")]
pub mod breakeven;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::BizDashError;
pub use types::*;

/// Standard result type for all bizdash operations
pub type BizDashResult<T> = Result<T, BizDashError>;
