//! qc-contract: Smart Contract Token CLI
//!
//! Drives the token lifecycle against a quorum node over JSON-RPC.
//!
//! ```text
//! qc-contract <command> ──→ ContractTokenService ──→ JsonRpcQuorumClient ──HTTP──→ quorum node
//!                                   │
//!                                   └──→ StdinPrompt (execute without --data)
//! ```

pub mod api;
pub mod cli;
pub mod prompt;

pub use api::{ApiError, JsonRpcQuorumClient};
pub use cli::{dispatch, run, Cli, Command};
pub use prompt::StdinPrompt;
