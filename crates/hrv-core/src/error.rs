//! Error types for HRV analysis
//!
//! Provides a unified error type for all hrv-engine crates.

use thiserror::Error;

/// Core error type for HRV operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Construction-time validation failure (sampling frequency, lengths, ordering)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Programming error: the API was driven in an invalid state
    #[error("Usage error: {0}")]
    Usage(String),

    /// Abstract computation step invoked without a concrete algorithm
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Cache-related error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Validation(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a sequence that must strictly increase
    pub fn non_monotonic(context: &str, position: usize) -> Self {
        Self::Validation(format!(
            "{context} must be strictly increasing (violated at position {position})"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error only reflects a too-short input
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
