//! # Error Types
//!
//! All error types for the smart contract token lifecycle.
//!
//! Local validation failures never reach the network. Everything after the
//! request leaves the process is classified by the interpreter into exactly one
//! of `TransportFailure`, `QuorumRejected` or `MalformedQuorumResponse`.

use crate::domain::lifecycle::{Operation, TokenState};
use thiserror::Error;

// =============================================================================
// LIFECYCLE ERRORS
// =============================================================================

/// Errors surfaced by a single lifecycle operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractTokenError {
    /// DID missing the required prefix or shorter than the minimum length.
    #[error("invalid {role}: {value:?}")]
    InvalidDid {
        /// Which actor the DID identifies (owner, deployer, executor).
        role: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Content token missing the required prefix or too short.
    #[error("invalid smart contract token: {0:?}")]
    InvalidToken(String),

    /// Enumerated code outside its accepted range.
    #[error("invalid {field}: {code} not in {lo}..={hi}")]
    InvalidEnum {
        /// Name of the enumerated parameter.
        field: &'static str,
        /// The rejected code.
        code: i64,
        /// Lowest accepted value.
        lo: i64,
        /// Highest accepted value.
        hi: i64,
    },

    /// Amount is zero, negative, or below the smallest transferable unit.
    #[error("invalid RBT amount: {amount} (minimum {minimum})")]
    InvalidAmount {
        /// The rejected amount.
        amount: f64,
        /// The minimum granularity in force.
        minimum: f64,
    },

    /// A required input is empty.
    #[error("missing input: please provide {0}")]
    MissingInput(&'static str),

    /// The input provider could not supply the execution payload.
    #[error("failed to get data: {0}")]
    InputUnavailable(String),

    /// The quorum client call itself failed.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The quorum answered with `status = false`.
    #[error("quorum rejected request: {0}")]
    QuorumRejected(String),

    /// The signature payload was missing or could not be decoded.
    #[error("malformed quorum response: {0}")]
    MalformedQuorumResponse(String),

    /// The requested operation is not a legal move from the current state.
    #[error("invalid transition: cannot {operation} a token in state {from}")]
    InvalidTransition {
        /// State the token is in.
        from: TokenState,
        /// Operation that was attempted.
        operation: Operation,
    },
}

impl ContractTokenError {
    /// Returns true if the request was rejected before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDid { .. }
                | Self::InvalidToken(_)
                | Self::InvalidEnum { .. }
                | Self::InvalidAmount { .. }
                | Self::MissingInput(_)
                | Self::InputUnavailable(_)
        )
    }

    /// Returns true if re-issuing the same operation could succeed.
    ///
    /// The core never retries on its own; this only informs the caller.
    #[must_use]
    pub fn is_retryable_by_caller(&self) -> bool {
        matches!(self, Self::TransportFailure(_) | Self::QuorumRejected(_))
    }
}

/// Result type for lifecycle operations.
pub type ContractTokenResult<T> = Result<T, ContractTokenError>;

// =============================================================================
// TRANSPORT ERRORS
// =============================================================================

/// Errors returned by a quorum client implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not reach the node.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The node did not answer in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The node answered with an RPC-level error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// RPC error code.
        code: i64,
        /// RPC error message.
        message: String,
    },

    /// The body could not be decoded into a basic response.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Any other client-side failure.
    #[error("{0}")]
    Other(String),
}

// =============================================================================
// INPUT ERRORS
// =============================================================================

/// Errors from an input provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No input source is attached.
    #[error("no input source available")]
    Unavailable,

    /// Reading from the input source failed.
    #[error("read failed: {0}")]
    Read(String),
}

impl From<InputError> for ContractTokenError {
    fn from(err: InputError) -> Self {
        ContractTokenError::InputUnavailable(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
