//! # Requests
//!
//! Per-operation parameter structs (raw, as supplied by the caller) and the
//! request messages built from validated values.
//!
//! Parameters are immutable and passed explicitly into the controller; there
//! is no shared command state between operations. Requests are a sum type so
//! each variant carries exactly the fields its operation needs.

use crate::domain::lifecycle::Operation;
use crate::domain::value_objects::{ContentToken, Did, PublishType, RbtAmount, TransactionType};
use serde::Serialize;

// =============================================================================
// PARAMETERS (unvalidated caller input)
// =============================================================================

/// Inputs for generating a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerateParams {
    /// Owner DID.
    pub did: String,
    /// Location of the compiled contract.
    pub binary_code_path: String,
    /// Location of the contract source.
    pub raw_code_path: String,
    /// Location of the state schema.
    pub schema_path: String,
}

/// Inputs for fetching a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchParams {
    /// Token to fetch.
    pub token: String,
}

/// Inputs for deploying a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeployParams {
    /// Token to deploy.
    pub token: String,
    /// Deployer DID.
    pub deployer_did: String,
    /// RBT committed with the deployment.
    pub amount: f64,
    /// Quorum transaction type code.
    pub transaction_type: i64,
    /// Free-form transaction comment.
    pub comment: String,
}

/// Inputs for executing a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecuteParams {
    /// Token to execute.
    pub token: String,
    /// Executor DID.
    pub executor_did: String,
    /// Quorum transaction type code.
    pub transaction_type: i64,
    /// Free-form transaction comment.
    pub comment: String,
    /// Execution payload; acquired from the input provider when absent.
    pub data: Option<String>,
}

/// Inputs for publishing a contract event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublishParams {
    /// Token the event belongs to.
    pub token: String,
    /// Publisher DID.
    pub did: String,
    /// Publish type code.
    pub publish_type: i64,
    /// The new contract block.
    pub new_block: String,
}

/// Inputs for subscribing to a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscribeParams {
    /// Token to follow.
    pub token: String,
}

// =============================================================================
// REQUEST MESSAGES (validated)
// =============================================================================

/// Request to generate a new smart contract token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateRequest {
    /// Location of the compiled contract.
    pub binary_code: String,
    /// Location of the contract source.
    pub raw_code: String,
    /// Location of the state schema.
    pub schema_code: String,
    /// Owner DID.
    pub did: Did,
}

/// Request to fetch a token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FetchRequest {
    /// Token to fetch.
    pub smart_contract_token: ContentToken,
}

/// Request to deploy a token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeployRequest {
    /// Token to deploy.
    pub smart_contract_token: ContentToken,
    /// Deployer DID.
    pub deployer_address: Did,
    /// Funds committed.
    pub rbt_amount: RbtAmount,
    /// Quorum transaction type.
    pub quorum_type: TransactionType,
    /// Transaction comment.
    pub comment: String,
}

/// Request to execute a token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecuteRequest {
    /// Token to execute.
    pub smart_contract_token: ContentToken,
    /// Executor DID.
    pub executor_address: Did,
    /// Quorum transaction type.
    pub quorum_type: TransactionType,
    /// Transaction comment.
    pub comment: String,
    /// Execution payload.
    pub smart_contract_data: String,
}

/// Kind of event-stream request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// Publish a new contract block.
    Publish {
        /// Publisher DID.
        did: Did,
        /// Publish type.
        publish_type: PublishType,
        /// The new contract block.
        new_contract_block: String,
    },
    /// Subscribe to the token's events.
    Subscribe,
}

/// Publish/subscribe request sharing one shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventRequest {
    /// Token the event stream belongs to.
    pub smart_contract_token: ContentToken,
    /// Publish or subscribe.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Any request the controller can send to the quorum.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContractRequest {
    /// Generate request.
    Generate(GenerateRequest),
    /// Fetch request.
    Fetch(FetchRequest),
    /// Deploy request.
    Deploy(DeployRequest),
    /// Execute request.
    Execute(ExecuteRequest),
    /// Publish or subscribe request.
    Event(EventRequest),
}

impl ContractRequest {
    /// Operation this request performs.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            ContractRequest::Generate(_) => Operation::Generate,
            ContractRequest::Fetch(_) => Operation::Fetch,
            ContractRequest::Deploy(_) => Operation::Deploy,
            ContractRequest::Execute(_) => Operation::Execute,
            ContractRequest::Event(req) => match req.kind {
                EventKind::Publish { .. } => Operation::Publish,
                EventKind::Subscribe => Operation::Subscribe,
            },
        }
    }

    /// Token the request refers to. Generate has none yet.
    #[must_use]
    pub fn token(&self) -> Option<&ContentToken> {
        match self {
            ContractRequest::Generate(_) => None,
            ContractRequest::Fetch(req) => Some(&req.smart_contract_token),
            ContractRequest::Deploy(req) => Some(&req.smart_contract_token),
            ContractRequest::Execute(req) => Some(&req.smart_contract_token),
            ContractRequest::Event(req) => Some(&req.smart_contract_token),
        }
    }
}

// =============================================================================
// REQUEST BUILDER
// =============================================================================

/// Pure mapping from validated values to request messages.
///
/// Every field is copied verbatim; nothing is defaulted.
pub mod build {
    use super::*;

    /// Build a generate request.
    #[must_use]
    pub fn generate(
        did: Did,
        binary_code: String,
        raw_code: String,
        schema_code: String,
    ) -> GenerateRequest {
        GenerateRequest {
            binary_code,
            raw_code,
            schema_code,
            did,
        }
    }

    /// Build a fetch request.
    #[must_use]
    pub fn fetch(token: ContentToken) -> FetchRequest {
        FetchRequest {
            smart_contract_token: token,
        }
    }

    /// Build a deploy request.
    #[must_use]
    pub fn deploy(
        token: ContentToken,
        deployer: Did,
        amount: RbtAmount,
        quorum_type: TransactionType,
        comment: String,
    ) -> DeployRequest {
        DeployRequest {
            smart_contract_token: token,
            deployer_address: deployer,
            rbt_amount: amount,
            quorum_type,
            comment,
        }
    }

    /// Build an execute request.
    #[must_use]
    pub fn execute(
        token: ContentToken,
        executor: Did,
        quorum_type: TransactionType,
        comment: String,
        data: String,
    ) -> ExecuteRequest {
        ExecuteRequest {
            smart_contract_token: token,
            executor_address: executor,
            quorum_type,
            comment,
            smart_contract_data: data,
        }
    }

    /// Build a publish request.
    #[must_use]
    pub fn publish(
        token: ContentToken,
        did: Did,
        publish_type: PublishType,
        new_block: String,
    ) -> EventRequest {
        EventRequest {
            smart_contract_token: token,
            kind: EventKind::Publish {
                did,
                publish_type,
                new_contract_block: new_block,
            },
        }
    }

    /// Build a subscribe request.
    #[must_use]
    pub fn subscribe(token: ContentToken) -> EventRequest {
        EventRequest {
            smart_contract_token: token,
            kind: EventKind::Subscribe,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
