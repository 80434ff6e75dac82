//! # QC Contract Tokens - Smart Contract Token Lifecycle
//!
//! **Architecture:** Hexagonal (domain / ports / adapters / service)
//!
//! ## Purpose
//!
//! Validates smart contract token requests, sends them to the quorum of
//! validating peers and interprets the quorum's reply. A request either
//! commits with a quorum signature or fails with one terminal error.
//!
//! ## Token States
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | `UNDEFINED` | generate | `GENERATED` |
//! | `GENERATED` | fetch | `FETCHED` |
//! | `FETCHED` | deploy (signed) | `DEPLOYED` |
//! | `DEPLOYED` | execute (signed) | `EXECUTED` |
//! | any with a token | publish / subscribe (signed) | unchanged |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Invalid requests never reach the network | `service.rs` - prepare before submit |
//! | DID: `bafybmi` prefix, length >= 59 | `domain/validation.rs` - `validate_did()` |
//! | Token: `Qm` prefix, length >= 46 | `domain/validation.rs` - `validate_token()` |
//! | RBT amount > 0 and >= minimum | `domain/validation.rs` - `validate_amount()` |
//! | Signed operations commit only with a decodable signature payload | `domain/interpreter.rs` - `interpret()` |
//! | The execute prompt follows every other check | `service.rs` - `prepare_execute()` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `QuorumClient` | One round trip per operation to the quorum |
//! | `InputProvider` | Supplies a missing execute payload |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_contract_tokens::prelude::*;
//!
//! let service = ContractTokenService::new(quorum, input, ServiceConfig::default());
//! let receipt = service.fetch(FetchParams { token }).await?;
//! println!("{}", receipt.message);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        BasicResponse, OperationReceipt, PeerSignature, QuorumAck, SignatureOutcome,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        limits, ContentToken, Did, PublishType, RbtAmount, TransactionType,
    };

    // Lifecycle
    pub use crate::domain::lifecycle::{Milestone, ObserverState, Operation, TokenState};

    // Requests
    pub use crate::domain::requests::{
        build, ContractRequest, DeployParams, DeployRequest, EventKind, EventRequest,
        ExecuteParams, ExecuteRequest, FetchParams, FetchRequest, GenerateParams,
        GenerateRequest, PublishParams, SubscribeParams,
    };

    // Domain services
    pub use crate::domain::interpreter::{interpret, signature_outcome};
    pub use crate::domain::validation::{
        validate_amount, validate_did, validate_publish_type, validate_range,
        validate_required_path, validate_token, validate_transaction_type,
    };

    // Ports
    pub use crate::ports::inbound::ContractTokenApi;
    pub use crate::ports::outbound::{InputProvider, QuorumClient};

    // Errors
    pub use crate::errors::{ContractTokenError, ContractTokenResult, InputError, TransportError};

    // Adapters
    pub use crate::adapters::{signed_response, ScriptedInput, ScriptedQuorumClient};

    // Service
    pub use crate::config::ServiceConfig;
    pub use crate::service::{create_test_service, ContractTokenService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
