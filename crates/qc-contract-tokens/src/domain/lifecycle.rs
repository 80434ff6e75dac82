//! # Token Lifecycle
//!
//! State machine a smart contract token passes through.
//!
//! ```text
//! [UNDEFINED] ──generate──→ [GENERATED] ──fetch──→ [FETCHED] ──deploy──→ [DEPLOYED] ──execute──→ [EXECUTED]
//!                                │                    ↺ fetch                ↺ fetch          ↺ execute, fetch
//!                                │
//!                                └── publish / subscribe (any state after GENERATED, main state unchanged)
//! ```
//!
//! The ledger owns the authoritative state. This table is what the controller
//! reports after a committed operation and what callers tracking a token can
//! check a move against before issuing it.

use crate::errors::{ContractTokenError, ContractTokenResult};
use serde::Serialize;
use std::fmt;

// =============================================================================
// OPERATIONS
// =============================================================================

/// The six lifecycle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a new token from binary code, raw code and schema.
    Generate,
    /// Fetch (distribute) an existing token to this node.
    Fetch,
    /// Deploy a token with committed funds.
    Deploy,
    /// Execute a deployed token with a data payload.
    Execute,
    /// Publish a new contract block to subscribers.
    Publish,
    /// Subscribe to a token's event stream.
    Subscribe,
}

impl Operation {
    /// All operations in lifecycle order.
    pub const ALL: [Operation; 6] = [
        Operation::Generate,
        Operation::Fetch,
        Operation::Deploy,
        Operation::Execute,
        Operation::Publish,
        Operation::Subscribe,
    ];

    /// Returns true if a quorum signature payload must confirm this operation.
    #[must_use]
    pub const fn requires_signature(self) -> bool {
        matches!(
            self,
            Operation::Deploy | Operation::Execute | Operation::Publish | Operation::Subscribe
        )
    }

    /// Returns the milestone a committed operation establishes.
    #[must_use]
    pub const fn milestone(self) -> Milestone {
        match self {
            Operation::Generate => Milestone::State(TokenState::Generated),
            Operation::Fetch => Milestone::State(TokenState::Fetched),
            Operation::Deploy => Milestone::State(TokenState::Deployed),
            Operation::Execute => Milestone::State(TokenState::Executed),
            Operation::Publish => Milestone::Observer(ObserverState::PublishedEvent),
            Operation::Subscribe => Milestone::Observer(ObserverState::Subscribed),
        }
    }

    /// Verb used in log and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Generate => "generate",
            Operation::Fetch => "fetch",
            Operation::Deploy => "deploy",
            Operation::Execute => "execute",
            Operation::Publish => "publish",
            Operation::Subscribe => "subscribe",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// STATES
// =============================================================================

/// Main lifecycle state of a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    /// No token exists yet.
    #[default]
    Undefined,
    /// Token generated by its owner.
    Generated,
    /// Token fetched to this node.
    Fetched,
    /// Token deployed with funds committed.
    Deployed,
    /// Token executed at least once.
    Executed,
}

impl TokenState {
    /// Returns true once a token identifier exists.
    #[must_use]
    pub fn token_exists(self) -> bool {
        self != TokenState::Undefined
    }

    /// Apply `operation` to this state.
    ///
    /// Publish and Subscribe leave the main state unchanged. Fetch is a read
    /// and never moves a token backwards.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if `operation` is not allowed from this state.
    pub fn advance(self, operation: Operation) -> ContractTokenResult<TokenState> {
        use TokenState::{Deployed, Executed, Fetched, Generated, Undefined};

        let next = match (self, operation) {
            (Undefined, Operation::Generate) => Some(Generated),
            (Generated | Fetched, Operation::Fetch) => Some(Fetched),
            (Deployed | Executed, Operation::Fetch) => Some(self),
            (Fetched, Operation::Deploy) => Some(Deployed),
            (Deployed | Executed, Operation::Execute) => Some(Executed),
            (state, Operation::Publish | Operation::Subscribe) if state.token_exists() => {
                Some(state)
            }
            _ => None,
        };

        next.ok_or(ContractTokenError::InvalidTransition {
            from: self,
            operation,
        })
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenState::Undefined => "UNDEFINED",
            TokenState::Generated => "GENERATED",
            TokenState::Fetched => "FETCHED",
            TokenState::Deployed => "DEPLOYED",
            TokenState::Executed => "EXECUTED",
        };
        f.write_str(name)
    }
}

/// Observer sub-state on the event stream, orthogonal to [`TokenState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverState {
    /// This node follows the token's events.
    Subscribed,
    /// A new contract block was published.
    PublishedEvent,
}

/// What a committed operation established.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// Main lifecycle state reached.
    State(TokenState),
    /// Event stream sub-state reached.
    Observer(ObserverState),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = TokenState::default()
            .advance(Operation::Generate)
            .and_then(|s| s.advance(Operation::Fetch))
            .and_then(|s| s.advance(Operation::Deploy))
            .and_then(|s| s.advance(Operation::Execute))
            .unwrap();
        assert_eq!(state, TokenState::Executed);
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let fetched = TokenState::Generated.advance(Operation::Fetch).unwrap();
        assert_eq!(fetched.advance(Operation::Fetch).unwrap(), TokenState::Fetched);
        assert_eq!(
            TokenState::Deployed.advance(Operation::Fetch).unwrap(),
            TokenState::Deployed
        );
    }

    #[test]
    fn test_execute_repeats() {
        assert_eq!(
            TokenState::Executed.advance(Operation::Execute).unwrap(),
            TokenState::Executed
        );
    }

    #[test]
    fn test_illegal_moves() {
        assert!(TokenState::Undefined.advance(Operation::Fetch).is_err());
        assert!(TokenState::Generated.advance(Operation::Deploy).is_err());
        assert!(TokenState::Fetched.advance(Operation::Execute).is_err());
        assert!(TokenState::Deployed.advance(Operation::Generate).is_err());

        let err = TokenState::Generated.advance(Operation::Execute).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid transition: cannot execute a token in state GENERATED"
        );
    }

    #[test]
    fn test_observer_transitions_need_token() {
        assert!(TokenState::Undefined.advance(Operation::Subscribe).is_err());
        assert!(TokenState::Undefined.advance(Operation::Publish).is_err());
        for state in [
            TokenState::Generated,
            TokenState::Fetched,
            TokenState::Deployed,
            TokenState::Executed,
        ] {
            assert_eq!(state.advance(Operation::Publish).unwrap(), state);
            assert_eq!(state.advance(Operation::Subscribe).unwrap(), state);
        }
    }

    #[test]
    fn test_signature_requirement() {
        let signed: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.requires_signature())
            .collect();
        assert_eq!(
            signed,
            vec![
                Operation::Deploy,
                Operation::Execute,
                Operation::Publish,
                Operation::Subscribe
            ]
        );
    }

    #[test]
    fn test_milestones() {
        assert_eq!(
            Operation::Deploy.milestone(),
            Milestone::State(TokenState::Deployed)
        );
        assert_eq!(
            Operation::Subscribe.milestone(),
            Milestone::Observer(ObserverState::Subscribed)
        );
    }
}
