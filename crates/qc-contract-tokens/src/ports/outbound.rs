//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the lifecycle controller depends on:
//! - the quorum client that carries requests to the validating peers;
//! - the input provider that supplies a missing execution payload.
//!
//! Timeouts and cancellation belong to the quorum client implementation.
//! The controller treats any `Err` it returns as a transport failure.

use crate::domain::entities::BasicResponse;
use crate::domain::requests::{
    ContractRequest, DeployRequest, EventKind, EventRequest, ExecuteRequest, FetchRequest,
    GenerateRequest,
};
use crate::errors::{InputError, TransportError};
use async_trait::async_trait;

// =============================================================================
// QUORUM CLIENT
// =============================================================================

/// Transport to the quorum.
///
/// One call is one blocking round trip: it either completes with a
/// [`BasicResponse`] or fails with a [`TransportError`]. No streaming.
#[async_trait]
pub trait QuorumClient: Send + Sync {
    /// Generate a new smart contract token.
    async fn generate_token(&self, req: &GenerateRequest) -> Result<BasicResponse, TransportError>;

    /// Fetch a token to this node.
    async fn fetch_token(&self, req: &FetchRequest) -> Result<BasicResponse, TransportError>;

    /// Deploy a token. The result carries the quorum's signature payload.
    async fn deploy_contract(&self, req: &DeployRequest) -> Result<BasicResponse, TransportError>;

    /// Execute a token. The result carries the quorum's signature payload.
    async fn execute_contract(&self, req: &ExecuteRequest)
        -> Result<BasicResponse, TransportError>;

    /// Publish a new contract block.
    async fn publish_event(&self, req: &EventRequest) -> Result<BasicResponse, TransportError>;

    /// Subscribe to a token's events.
    async fn subscribe_contract(&self, req: &EventRequest)
        -> Result<BasicResponse, TransportError>;

    /// Route any request to its matching call.
    async fn submit(&self, request: &ContractRequest) -> Result<BasicResponse, TransportError> {
        match request {
            ContractRequest::Generate(req) => self.generate_token(req).await,
            ContractRequest::Fetch(req) => self.fetch_token(req).await,
            ContractRequest::Deploy(req) => self.deploy_contract(req).await,
            ContractRequest::Execute(req) => self.execute_contract(req).await,
            ContractRequest::Event(req) => match req.kind {
                EventKind::Publish { .. } => self.publish_event(req).await,
                EventKind::Subscribe => self.subscribe_contract(req).await,
            },
        }
    }
}

// =============================================================================
// INPUT PROVIDER
// =============================================================================

/// Source of the execution payload when the caller did not supply one.
///
/// Called at most once per execute, after validation and before the request
/// is built. Never concurrently with a quorum call.
pub trait InputProvider: Send + Sync {
    /// Show `prompt` and return the entered value.
    ///
    /// # Errors
    ///
    /// `InputError` when no value can be read.
    fn acquire(&self, prompt: &str) -> Result<String, InputError>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::build;
    use crate::domain::validation::validate_token;
    use std::sync::Mutex;

    // Records which trait method `submit` routed to.
    #[derive(Default)]
    struct RoutingClient {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RoutingClient {
        fn record(&self, name: &'static str) -> Result<BasicResponse, TransportError> {
            self.calls.lock().unwrap().push(name);
            Ok(BasicResponse::accepted(name))
        }
    }

    #[async_trait]
    impl QuorumClient for RoutingClient {
        async fn generate_token(&self, _: &GenerateRequest) -> Result<BasicResponse, TransportError> {
            self.record("generate")
        }
        async fn fetch_token(&self, _: &FetchRequest) -> Result<BasicResponse, TransportError> {
            self.record("fetch")
        }
        async fn deploy_contract(&self, _: &DeployRequest) -> Result<BasicResponse, TransportError> {
            self.record("deploy")
        }
        async fn execute_contract(
            &self,
            _: &ExecuteRequest,
        ) -> Result<BasicResponse, TransportError> {
            self.record("execute")
        }
        async fn publish_event(&self, _: &EventRequest) -> Result<BasicResponse, TransportError> {
            self.record("publish")
        }
        async fn subscribe_contract(
            &self,
            _: &EventRequest,
        ) -> Result<BasicResponse, TransportError> {
            self.record("subscribe")
        }
    }

    #[tokio::test]
    async fn test_submit_routes_event_requests() {
        let client = RoutingClient::default();
        let token = validate_token(&format!("Qm{}", "r".repeat(44))).unwrap();

        let subscribe = ContractRequest::Event(build::subscribe(token.clone()));
        let resp = client.submit(&subscribe).await.unwrap();
        assert_eq!(resp.message, "subscribe");

        let fetch = ContractRequest::Fetch(build::fetch(token));
        client.submit(&fetch).await.unwrap();

        assert_eq!(*client.calls.lock().unwrap(), vec!["subscribe", "fetch"]);
    }
}
