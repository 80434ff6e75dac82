//! JSON-RPC envelope types.

use serde::{Deserialize, Serialize};

/// JSON-RPC method names, one per lifecycle operation.
pub mod methods {
    /// Generate a smart contract token.
    pub const GENERATE: &str = "smartcontract_generate";
    /// Fetch a smart contract token.
    pub const FETCH: &str = "smartcontract_fetch";
    /// Deploy a smart contract.
    pub const DEPLOY: &str = "smartcontract_deploy";
    /// Execute a smart contract.
    pub const EXECUTE: &str = "smartcontract_execute";
    /// Publish a new contract block.
    pub const PUBLISH_EVENT: &str = "smartcontract_publishEvent";
    /// Subscribe to a contract's events.
    pub const SUBSCRIBE: &str = "smartcontract_subscribe";
}

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: T,
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}
