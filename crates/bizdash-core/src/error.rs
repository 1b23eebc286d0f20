use thiserror::Error;

#[derive(Debug, Error)]
pub enum BizDashError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Break-even is undefined: {0}")]
    UndefinedBreakEven(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BizDashError {
    fn from(e: serde_json::Error) -> Self {
        BizDashError::SerializationError(e.to_string())
    }
}
