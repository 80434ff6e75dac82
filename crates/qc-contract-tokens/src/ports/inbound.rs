//! # Driving Port (API - Inbound)
//!
//! The operation surface exposed by the lifecycle controller. The CLI and any
//! embedding node call these; each call runs one operation to completion.

use crate::domain::entities::OperationReceipt;
use crate::domain::requests::{
    DeployParams, ExecuteParams, FetchParams, GenerateParams, PublishParams, SubscribeParams,
};
use crate::errors::ContractTokenResult;
use async_trait::async_trait;

/// Primary API for the smart contract token lifecycle.
///
/// Every method validates its parameters, sends exactly one request to the
/// quorum and interprets the reply. A validation failure never reaches the
/// network. Failures are terminal and never retried inside the call.
///
/// ## Usage
///
/// ```ignore
/// let receipt = api.deploy(DeployParams { token, deployer_did, amount: 1.0, .. }).await?;
/// println!("{}", receipt.message);
/// ```
#[async_trait]
pub trait ContractTokenApi: Send + Sync {
    /// `UNDEFINED → GENERATED`: create a token from code and schema locations.
    async fn generate(&self, params: GenerateParams) -> ContractTokenResult<OperationReceipt>;

    /// `GENERATED → FETCHED`: fetch a token. Idempotent read.
    async fn fetch(&self, params: FetchParams) -> ContractTokenResult<OperationReceipt>;

    /// `FETCHED → DEPLOYED`: deploy with committed funds. Quorum-signed.
    async fn deploy(&self, params: DeployParams) -> ContractTokenResult<OperationReceipt>;

    /// `DEPLOYED → EXECUTED`: execute with a data payload. Quorum-signed.
    ///
    /// A missing payload is acquired from the input provider after validation.
    async fn execute(&self, params: ExecuteParams) -> ContractTokenResult<OperationReceipt>;

    /// Publish a new contract block on the token's event stream.
    async fn publish(&self, params: PublishParams) -> ContractTokenResult<OperationReceipt>;

    /// Subscribe to the token's event stream.
    async fn subscribe(&self, params: SubscribeParams) -> ContractTokenResult<OperationReceipt>;
}
