use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised by value-object constructors.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Margin must be in [0, 1), got {0}")]
    InvalidMargin(String),

    #[error("Value must be non-negative, got {0}")]
    MustBeNonNegative(String),

    #[error("Value must be a finite number")]
    MustBeFinite,

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

impl From<ValidationError> for String {
    fn from(error: ValidationError) -> Self {
        error.to_string()
    }
}

/// Errors raised while pricing a proposal.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PricingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Proposal has no screens to price")]
    EmptyProposal,

    #[error("Invalid rate configuration: {0}")]
    InvalidRateConfiguration(String),
}
