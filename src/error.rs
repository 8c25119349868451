//! Typed errors for routing, validation, and storage.

use serde_json::Value;
use thiserror::Error;

/// A supplied field set violates a field invariant. Caller must correct the
/// input; never retryable as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("pet requires a non-empty name")]
    MissingName,
    #[error("gender must be 0 (unknown), 1 (male) or 2 (female), got {0}")]
    InvalidGender(Value),
    #[error("weight must be a non-negative integer, got {0}")]
    NegativeWeight(Value),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    /// URI matches no known resource shape, or the operation is not
    /// supported on the matched route.
    #[error("unknown uri: {0}")]
    Routing(String),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    /// The write passed validation but did not take effect.
    #[error("storage: {0}")]
    Storage(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}
