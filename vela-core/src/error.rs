use thiserror::Error;

/// The main result type for vela-core operations.
pub type VelaResult<T> = Result<T, VelaError>;

/// Enum representing possible errors within the vela-core library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VelaError {
    /// A required argument was absent, or a construction element was not numeric.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An index was absent, negative, NaN or fractional.
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Division by zero: divisor component {index} is zero")]
    DivisionByZero { index: usize },

    #[error("Vector is empty, cannot compute length")]
    EmptyVector,

    /// No concrete vector backend is available to the factory.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for VelaError {
    fn from(err: serde_json::Error) -> Self {
        VelaError::Configuration(format!("JSON error: {}", err))
    }
}
