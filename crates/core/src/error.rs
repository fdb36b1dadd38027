//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Rejected operator input.
///
/// Always recoverable: the caller reports it and re-prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty quantity")]
    EmptyQuantity,

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("non-positive quantity: {0}")]
    NonPositive(i64),

    #[error("insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("missing name")]
    MissingName,

    #[error("empty cart")]
    EmptyCart,
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. IO failures belong
/// to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Operator input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation is not allowed in the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A value could not be accepted (e.g. a negative catalog price).
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl DomainError {
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}
