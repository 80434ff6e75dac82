//! # Value Objects
//!
//! Immutable domain primitives for the contract token lifecycle.
//! Each type can only be obtained through the validator, so holding one is
//! proof that the raw input passed its well-formedness rule.

use serde::Serialize;
use std::fmt;

// =============================================================================
// LIMITS
// =============================================================================

/// Well-formedness limits enforced before any request leaves the process.
pub mod limits {
    /// Prefix every DID starts with.
    pub const DID_PREFIX: &str = "bafybmi";
    /// Minimum total DID length.
    pub const DID_MIN_LEN: usize = 59;
    /// Prefix every content token starts with.
    pub const TOKEN_PREFIX: &str = "Qm";
    /// Minimum content token length.
    pub const TOKEN_MIN_LEN: usize = 46;
    /// Smallest transferable RBT unit.
    pub const MIN_RBT_AMOUNT: f64 = 0.000_01;
    /// Accepted deploy/execute transaction type codes.
    pub const TRANSACTION_TYPE_RANGE: (i64, i64) = (0, 2);
    /// Accepted publish type codes.
    pub const PUBLISH_TYPE_RANGE: (i64, i64) = (0, 1);
}

// =============================================================================
// DECENTRALIZED IDENTIFIER
// =============================================================================

/// A validated decentralized identifier of a ledger actor.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Did({})", self.0)
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CONTENT TOKEN
// =============================================================================

/// A validated content-addressed smart contract token.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentToken(String);

impl ContentToken {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ContentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentToken({})", self.0)
    }
}

impl fmt::Display for ContentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// QUORUM TYPE CODES
// =============================================================================

/// Consensus/signing mode selected for a deploy or execute transaction.
///
/// The meaning of each code belongs to the quorum; only the range is checked here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionType(u8);

impl TransactionType {
    pub(crate) fn new_unchecked(code: u8) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }
}

/// Publish mode selected for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PublishType(u8);

impl PublishType {
    pub(crate) fn new_unchecked(code: u8) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }
}

// =============================================================================
// RBT AMOUNT
// =============================================================================

/// Funds committed with a deployment. Always at least the minimum unit.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RbtAmount(f64);

impl RbtAmount {
    pub(crate) fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// Returns the amount as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RbtAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} RBT", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
