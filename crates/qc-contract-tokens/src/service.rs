//! # Contract Token Service
//!
//! The token lifecycle controller. Orchestrates, for each operation:
//!
//! ```text
//! params ──validate──→ request ──QuorumClient──→ BasicResponse ──interpret──→ receipt | error
//!           │ reject                 │ transport error            │ rejected / malformed
//!           └────────────────────────┴────────────────────────────┴──→ logged, returned, never retried
//! ```
//!
//! Each call builds fresh request/response objects. The only shared state is
//! the statistics counter. The quorum round trip and the execute prompt are
//! the only suspension points, and the prompt always happens first.

use crate::config::ServiceConfig;
use crate::domain::entities::OperationReceipt;
use crate::domain::interpreter::interpret;
use crate::domain::lifecycle::Operation;
use crate::domain::requests::{
    build, ContractRequest, DeployParams, ExecuteParams, FetchParams, GenerateParams,
    PublishParams, SubscribeParams,
};
use crate::domain::validation::{
    validate_amount, validate_did, validate_publish_type, validate_required_path, validate_token,
    validate_transaction_type,
};
use crate::errors::{ContractTokenError, ContractTokenResult};
use crate::ports::inbound::ContractTokenApi;
use crate::ports::outbound::{InputProvider, QuorumClient};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Statistics for the contract token service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Operations started.
    pub operations_attempted: u64,
    /// Operations the quorum committed.
    pub operations_committed: u64,
    /// Operations rejected before submission.
    pub validation_rejections: u64,
    /// Quorum calls that failed at transport level.
    pub transport_failures: u64,
    /// Quorum replies with `status = false`.
    pub quorum_rejections: u64,
    /// Signed operations without a usable signature payload.
    pub malformed_responses: u64,
}

/// The lifecycle controller.
pub struct ContractTokenService<Q: QuorumClient, I: InputProvider> {
    /// Service configuration.
    config: ServiceConfig,
    /// Transport to the quorum.
    quorum: Arc<Q>,
    /// Source of missing execute payloads.
    input: Arc<I>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<Q: QuorumClient, I: InputProvider> ContractTokenService<Q, I> {
    /// Create a new service.
    pub fn new(quorum: Q, input: I, config: ServiceConfig) -> Self {
        Self::with_shared(Arc::new(quorum), Arc::new(input), config)
    }

    /// Create a service over adapters the caller keeps a handle to.
    pub fn with_shared(quorum: Arc<Q>, input: Arc<I>, config: ServiceConfig) -> Self {
        Self {
            config,
            quorum,
            input,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Run one operation: prepare the request, submit it, interpret the reply.
    async fn run<F>(&self, operation: Operation, prepare: F) -> ContractTokenResult<OperationReceipt>
    where
        F: FnOnce() -> ContractTokenResult<ContractRequest> + Send,
    {
        let correlation_id = Uuid::new_v4();
        let span = info_span!("contract_token", %correlation_id, %operation);

        async move {
            self.stats.write().await.operations_attempted += 1;

            let request = match prepare() {
                Ok(request) => request,
                Err(err) => {
                    error!(error = %err, "{}", failure_context(operation));
                    self.record_failure(&err).await;
                    return Err(err);
                }
            };

            let token = request.token().cloned();
            debug!(token = ?token, "Submitting request to quorum");

            let reply = self.quorum.submit(&request).await;
            match interpret(operation, &reply) {
                Ok(message) => {
                    if matches!(operation, Operation::Deploy | Operation::Execute) {
                        info!("{message}");
                    }
                    info!(token = ?token, "{}", confirmation(operation));
                    self.stats.write().await.operations_committed += 1;
                    Ok(OperationReceipt {
                        correlation_id,
                        operation,
                        token,
                        message,
                        milestone: operation.milestone(),
                    })
                }
                Err(err) => {
                    error!(token = ?token, error = %err, "{}", failure_context(operation));
                    self.record_failure(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn record_failure(&self, err: &ContractTokenError) {
        let mut stats = self.stats.write().await;
        match err {
            ContractTokenError::TransportFailure(_) => stats.transport_failures += 1,
            ContractTokenError::QuorumRejected(_) => stats.quorum_rejections += 1,
            ContractTokenError::MalformedQuorumResponse(_) => stats.malformed_responses += 1,
            _ => stats.validation_rejections += 1,
        }
    }

    fn prepare_deploy(&self, params: &DeployParams) -> ContractTokenResult<ContractRequest> {
        let token = validate_token(&params.token)?;
        let deployer = validate_did(&params.deployer_did, "deployer DID")?;
        let amount = validate_amount(params.amount, self.config.minimum_amount)?;
        let quorum_type = validate_transaction_type(params.transaction_type)?;
        Ok(ContractRequest::Deploy(build::deploy(
            token,
            deployer,
            amount,
            quorum_type,
            params.comment.clone(),
        )))
    }

    fn prepare_execute(&self, params: &ExecuteParams) -> ContractTokenResult<ContractRequest> {
        let token = validate_token(&params.token)?;
        let executor = validate_did(&params.executor_did, "executor DID")?;
        let quorum_type = validate_transaction_type(params.transaction_type)?;

        // Everything else is valid before the caller is asked for input.
        let data = match params.data.as_deref().filter(|data| !data.is_empty()) {
            Some(data) => data.to_string(),
            None => self.input.acquire(&self.config.execute_prompt)?,
        };
        if data.is_empty() {
            return Err(ContractTokenError::MissingInput("data to be executed"));
        }

        Ok(ContractRequest::Execute(build::execute(
            token,
            executor,
            quorum_type,
            params.comment.clone(),
            data,
        )))
    }
}

fn prepare_generate(params: &GenerateParams) -> ContractTokenResult<ContractRequest> {
    let did = validate_did(&params.did, "DID")?;
    let binary_code = validate_required_path(&params.binary_code_path, "Binary code file")?;
    let raw_code = validate_required_path(&params.raw_code_path, "Raw code file")?;
    let schema_code = validate_required_path(&params.schema_path, "Schema file")?;
    Ok(ContractRequest::Generate(build::generate(
        did,
        binary_code,
        raw_code,
        schema_code,
    )))
}

fn prepare_fetch(params: &FetchParams) -> ContractTokenResult<ContractRequest> {
    let token = validate_token(&params.token)?;
    Ok(ContractRequest::Fetch(build::fetch(token)))
}

fn prepare_publish(params: &PublishParams) -> ContractTokenResult<ContractRequest> {
    let token = validate_token(&params.token)?;
    let did = validate_did(&params.did, "DID")?;
    let publish_type = validate_publish_type(params.publish_type)?;
    Ok(ContractRequest::Event(build::publish(
        token,
        did,
        publish_type,
        params.new_block.clone(),
    )))
}

fn prepare_subscribe(params: &SubscribeParams) -> ContractTokenResult<ContractRequest> {
    let token = validate_token(&params.token)?;
    Ok(ContractRequest::Event(build::subscribe(token)))
}

fn confirmation(operation: Operation) -> &'static str {
    match operation {
        Operation::Generate => "Smart contract token generated successfully",
        Operation::Fetch => "Smart contract token fetched successfully",
        Operation::Deploy => "Smart Contract Deployed successfully",
        Operation::Execute => "Smart Contract executed successfully",
        Operation::Publish => "New event published successfully",
        Operation::Subscribe => "New event subscribed successfully",
    }
}

fn failure_context(operation: Operation) -> &'static str {
    match operation {
        Operation::Generate => "Failed to generate smart contract token",
        Operation::Fetch => "Failed to fetch smart contract token",
        Operation::Deploy => "Failed to deploy Smart contract",
        Operation::Execute => "Failed to execute Smart contract",
        Operation::Publish => "Failed to publish new event",
        Operation::Subscribe => "Failed to subscribe contract",
    }
}

#[async_trait]
impl<Q: QuorumClient, I: InputProvider> ContractTokenApi for ContractTokenService<Q, I> {
    async fn generate(&self, params: GenerateParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Generate, move || prepare_generate(&params))
            .await
    }

    async fn fetch(&self, params: FetchParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Fetch, move || prepare_fetch(&params)).await
    }

    async fn deploy(&self, params: DeployParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Deploy, move || self.prepare_deploy(&params))
            .await
    }

    async fn execute(&self, params: ExecuteParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Execute, move || self.prepare_execute(&params))
            .await
    }

    async fn publish(&self, params: PublishParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Publish, move || prepare_publish(&params))
            .await
    }

    async fn subscribe(&self, params: SubscribeParams) -> ContractTokenResult<OperationReceipt> {
        self.run(Operation::Subscribe, move || prepare_subscribe(&params))
            .await
    }
}

/// Create a service over an approving scripted quorum, for tests and dry runs.
#[must_use]
pub fn create_test_service() -> ContractTokenService<
    crate::adapters::ScriptedQuorumClient,
    crate::adapters::ScriptedInput,
> {
    ContractTokenService::new(
        crate::adapters::ScriptedQuorumClient::approving(),
        crate::adapters::ScriptedInput::unavailable(),
        ServiceConfig::default(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
