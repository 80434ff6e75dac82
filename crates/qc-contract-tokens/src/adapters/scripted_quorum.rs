//! # Scripted Quorum
//!
//! In-memory quorum client for testing and dry runs.
//! Replies are queued per operation; every request received is recorded so
//! callers can assert that nothing reached the quorum.

use crate::domain::entities::{BasicResponse, PeerSignature, QuorumAck};
use crate::domain::lifecycle::Operation;
use crate::domain::requests::{
    ContractRequest, DeployRequest, EventRequest, ExecuteRequest, FetchRequest, GenerateRequest,
};
use crate::errors::TransportError;
use crate::ports::outbound::QuorumClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

type Reply = Result<BasicResponse, TransportError>;

/// Quorum client answering from a script.
#[derive(Debug, Default)]
pub struct ScriptedQuorumClient {
    /// Queued replies per operation, consumed front to back.
    replies: Mutex<HashMap<Operation, VecDeque<Reply>>>,
    /// Approve with a signed acknowledgement when the queue is empty.
    approve_when_empty: bool,
    /// Requests received, in order.
    received: Mutex<Vec<ContractRequest>>,
}

impl ScriptedQuorumClient {
    /// Client with an empty script. Unscripted calls fail at transport level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that approves every unscripted call.
    #[must_use]
    pub fn approving() -> Self {
        Self {
            approve_when_empty: true,
            ..Self::default()
        }
    }

    /// Queue a reply for the next call of `operation`.
    #[must_use]
    pub fn with_reply(self, operation: Operation, reply: Reply) -> Self {
        self.push_reply(operation, reply);
        self
    }

    /// Queue a reply for the next call of `operation`.
    pub fn push_reply(&self, operation: Operation, reply: Reply) {
        self.replies
            .lock()
            .entry(operation)
            .or_default()
            .push_back(reply);
    }

    /// Requests received so far.
    #[must_use]
    pub fn received(&self) -> Vec<ContractRequest> {
        self.received.lock().clone()
    }

    /// Number of calls that reached the client.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.received.lock().len()
    }

    fn answer(&self, request: ContractRequest) -> Reply {
        let operation = request.operation();
        self.received.lock().push(request);

        let queued = self
            .replies
            .lock()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);

        match queued {
            Some(reply) => reply,
            None if self.approve_when_empty => Ok(default_approval(operation)),
            None => Err(TransportError::Other(format!(
                "no scripted reply for {operation}"
            ))),
        }
    }
}

/// Accepted response carrying a signed acknowledgement from `peers`.
#[must_use]
pub fn signed_response(message: &str, peers: &[&str]) -> BasicResponse {
    let ack = QuorumAck {
        message: Some(message.to_string()),
        signatures: peers
            .iter()
            .map(|did| PeerSignature {
                did: (*did).to_string(),
                signature: format!("sig:{did}"),
            })
            .collect(),
    };
    // QuorumAck holds only strings; encoding cannot fail.
    let payload = serde_json::to_value(ack).unwrap_or_default();
    BasicResponse::accepted(message).with_result(payload)
}

fn default_approval(operation: Operation) -> BasicResponse {
    let message = format!("{operation} accepted by quorum");
    if operation.requires_signature() {
        signed_response(&message, &["bafybmi-scripted-peer"])
    } else {
        BasicResponse::accepted(message)
    }
}

#[async_trait]
impl QuorumClient for ScriptedQuorumClient {
    async fn generate_token(&self, req: &GenerateRequest) -> Reply {
        self.answer(ContractRequest::Generate(req.clone()))
    }

    async fn fetch_token(&self, req: &FetchRequest) -> Reply {
        self.answer(ContractRequest::Fetch(req.clone()))
    }

    async fn deploy_contract(&self, req: &DeployRequest) -> Reply {
        self.answer(ContractRequest::Deploy(req.clone()))
    }

    async fn execute_contract(&self, req: &ExecuteRequest) -> Reply {
        self.answer(ContractRequest::Execute(req.clone()))
    }

    async fn publish_event(&self, req: &EventRequest) -> Reply {
        self.answer(ContractRequest::Event(req.clone()))
    }

    async fn subscribe_contract(&self, req: &EventRequest) -> Reply {
        self.answer(ContractRequest::Event(req.clone()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
