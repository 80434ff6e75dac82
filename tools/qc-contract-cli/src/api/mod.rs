//! API client module for talking to a quorum node.
//!
//! Uses JSON-RPC to call the `smartcontract_*` methods on the node.

mod client;
mod types;

pub use client::{ApiError, JsonRpcQuorumClient};
pub use types::*;
