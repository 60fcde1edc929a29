//! Error types for resolution.

use alloy::primitives::Address;
use cronosid_core::CoreError;
use std::fmt;
use thiserror::Error;

/// Failure talking to the chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid RPC endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Transport or node-side failure.
    #[error("{method} failed: {message}")]
    Transport {
        /// JSON-RPC method.
        method: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// No response within the configured timeout.
    #[error("{method} timed out after {secs}s")]
    Timeout {
        /// JSON-RPC method.
        method: &'static str,
        /// Timeout in seconds.
        secs: u64,
    },

    /// The node answered but the payload did not decode.
    #[error("Malformed response from {method}: {message}")]
    MalformedResponse {
        /// Contract method or JSON-RPC method.
        method: String,
        /// Decoder message.
        message: String,
    },
}

/// Why an address has no usable reverse record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoReverseCause {
    /// The registry has no resolver for the reverse node.
    NoResolver,
    /// The resolver returned an empty name.
    EmptyName,
    /// The resolver returned no data at all, e.g. no code at the resolver address.
    EmptyResponse,
}

impl fmt::Display for NoReverseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoReverseCause::NoResolver => f.write_str("no resolver set"),
            NoReverseCause::EmptyName => f.write_str("resolver returned an empty name"),
            NoReverseCause::EmptyResponse => f.write_str("resolver returned no data"),
        }
    }
}

/// Resolution error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The name could not be normalized.
    #[error(transparent)]
    Normalization(#[from] CoreError),

    /// The gateway failed, timed out or returned garbage.
    #[error("Chain query failed: {0}")]
    ChainQuery(#[from] GatewayError),

    /// The registry has no owner for the name.
    #[error("Name {0} is not registered")]
    UnresolvedName(String),

    /// The address has no reverse record.
    #[error("No reverse record for {address}: {cause}")]
    NoReverseRecord {
        /// Address that was looked up.
        address: Address,
        /// Which hop came back empty.
        cause: NoReverseCause,
    },

    /// The reverse claim does not survive forward resolution.
    #[error("Reverse record of {expected} claims {name}, but {name} is owned by {actual}")]
    OwnershipMismatch {
        /// Name claimed by the reverse record.
        name: String,
        /// Address whose reverse record was read.
        expected: Address,
        /// Owner returned by forward resolution of `name`.
        actual: Address,
    },
}

impl ResolveError {
    /// Whether this is an ordinary "nothing there" answer rather than a failure.
    pub fn is_negative_result(&self) -> bool {
        matches!(
            self,
            ResolveError::UnresolvedName(_) | ResolveError::NoReverseRecord { .. }
        )
    }
}

/// Result type alias for ResolveError.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_results_distinct_from_failures() {
        assert!(ResolveError::UnresolvedName("alice.cro".into()).is_negative_result());
        assert!(ResolveError::NoReverseRecord {
            address: Address::ZERO,
            cause: NoReverseCause::NoResolver,
        }
        .is_negative_result());

        let transport = ResolveError::from(GatewayError::Timeout {
            method: "eth_call",
            secs: 30,
        });
        assert!(!transport.is_negative_result());

        let mismatch = ResolveError::OwnershipMismatch {
            name: "alice.cro".into(),
            expected: Address::repeat_byte(0x01),
            actual: Address::repeat_byte(0x02),
        };
        assert!(!mismatch.is_negative_result());
    }

    #[test]
    fn test_display_messages() {
        let err = ResolveError::NoReverseRecord {
            address: Address::ZERO,
            cause: NoReverseCause::EmptyName,
        };
        assert!(err.to_string().contains("empty name"));

        let err = ResolveError::from(GatewayError::Timeout {
            method: "eth_getCode",
            secs: 5,
        });
        assert_eq!(
            err.to_string(),
            "Chain query failed: eth_getCode timed out after 5s"
        );
    }
}
