//! # Domain Entities
//!
//! Response envelopes returned by the quorum and the outcome types derived
//! from them.

use crate::domain::lifecycle::{Milestone, Operation};
use crate::domain::value_objects::ContentToken;
use crate::errors::ContractTokenResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// QUORUM RESPONSES
// =============================================================================

/// Minimal envelope returned by every quorum call.
///
/// `status = false` always means the operation did not complete and `message`
/// carries the reason. Signed operations carry a [`QuorumAck`] in `result`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicResponse {
    /// Whether the quorum accepted the request.
    pub status: bool,
    /// Human-readable message from the quorum.
    #[serde(default)]
    pub message: String,
    /// Operation-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl BasicResponse {
    /// Accepted response without payload.
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            result: None,
        }
    }

    /// Rejected response.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            result: None,
        }
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }
}

/// One validating peer's signature over the committed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSignature {
    /// DID of the signing peer.
    pub did: String,
    /// Encoded signature. The scheme belongs to the quorum.
    pub signature: String,
}

/// Aggregated signature payload confirming a signed operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumAck {
    /// Message the quorum attached to the commit.
    #[serde(default)]
    pub message: Option<String>,
    /// Signatures collected from the quorum.
    #[serde(default)]
    pub signatures: Vec<PeerSignature>,
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Commit/abort signal for one operation: a message and a success flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureOutcome {
    /// Quorum message on success, failure reason otherwise.
    pub message: String,
    /// Whether the operation committed.
    pub success: bool,
}

impl SignatureOutcome {
    /// Collapse an interpreter result into `(message, success)`.
    #[must_use]
    pub fn from_result(result: &ContractTokenResult<String>) -> Self {
        match result {
            Ok(message) => Self {
                message: message.clone(),
                success: true,
            },
            Err(err) => Self {
                message: err.to_string(),
                success: false,
            },
        }
    }
}

/// Confirmation returned by the controller for a committed operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OperationReceipt {
    /// Correlation ID of the operation (also recorded on its tracing span).
    pub correlation_id: Uuid,
    /// Operation that committed.
    pub operation: Operation,
    /// Token the operation referred to. `None` for generate.
    pub token: Option<ContentToken>,
    /// Message from the interpreter.
    pub message: String,
    /// What the commit established.
    pub milestone: Milestone,
}

// =============================================================================
// TESTS
// =============================================================================
