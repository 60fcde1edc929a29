//! Error types for the core crate.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The UTS-46 mapping table rejected a code point in the name.
    #[error("Cannot normalize name {name:?}: {reason}")]
    Normalization {
        /// The raw input that failed.
        name: String,
        /// Description of the rejected mapping.
        reason: String,
    },

    /// Invalid node format (expected 32 bytes of hex).
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding")]
    InvalidHex,
}

/// Result type alias for CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
