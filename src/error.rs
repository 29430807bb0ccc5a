//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Absence, expiry and a disabled cache are not errors; they surface as
/// `None` (or the type's default) from the read paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A typed read found a value of another type under the key
    #[error("Type mismatch for key '{key}': expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
    },

    /// The configuration source could not be bound
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
