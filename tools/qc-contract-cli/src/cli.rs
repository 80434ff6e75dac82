//! Command-line surface and dispatch.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use qc_contract_tokens::config::ServiceConfig;
use qc_contract_tokens::domain::entities::OperationReceipt;
use qc_contract_tokens::domain::requests::{
    DeployParams, ExecuteParams, FetchParams, GenerateParams, PublishParams, SubscribeParams,
};
use qc_contract_tokens::domain::value_objects::limits;
use qc_contract_tokens::errors::ContractTokenResult;
use qc_contract_tokens::ports::inbound::ContractTokenApi;
use qc_contract_tokens::ports::outbound::{InputProvider, QuorumClient};
use qc_contract_tokens::service::ContractTokenService;
use tracing::info;

use crate::api::JsonRpcQuorumClient;
use crate::prompt::StdinPrompt;

/// qc-contract: smart contract token lifecycle client
#[derive(Parser, Debug)]
#[command(name = "qc-contract", version)]
#[command(about = "Generate, fetch, deploy, execute and observe smart contract tokens")]
pub struct Cli {
    /// JSON-RPC endpoint of the quorum node
    #[arg(
        short,
        long,
        global = true,
        env = "QC_QUORUM_ENDPOINT",
        default_value = "http://127.0.0.1:20000"
    )]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "QC_QUORUM_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Minimum RBT amount accepted for a deploy
    #[arg(long, global = true, default_value_t = limits::MIN_RBT_AMOUNT)]
    pub min_amount: f64,

    /// Print the receipt as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Lifecycle operations.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate a smart contract token from code and schema files
    Generate {
        /// DID of the token owner
        #[arg(long)]
        did: String,
        /// Path to the compiled contract
        #[arg(long)]
        binary_code: String,
        /// Path to the contract source
        #[arg(long)]
        raw_code: String,
        /// Path to the contract schema
        #[arg(long)]
        schema: String,
    },

    /// Fetch a smart contract token to this node
    Fetch {
        /// Smart contract token
        #[arg(long)]
        token: String,
    },

    /// Deploy a smart contract with committed RBT
    Deploy {
        /// Smart contract token
        #[arg(long)]
        token: String,
        /// DID of the deployer
        #[arg(long)]
        did: String,
        /// RBT amount to commit
        #[arg(long)]
        amount: f64,
        /// Quorum transaction type (0, 1 or 2)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        tx_type: i64,
        /// Free-form comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Execute a deployed smart contract
    Execute {
        /// Smart contract token
        #[arg(long)]
        token: String,
        /// DID of the executor
        #[arg(long)]
        did: String,
        /// Quorum transaction type (0, 1 or 2)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        tx_type: i64,
        /// Free-form comment
        #[arg(long, default_value = "")]
        comment: String,
        /// Execution payload; prompted for when absent
        #[arg(long)]
        data: Option<String>,
    },

    /// Publish a new contract block
    Publish {
        /// Smart contract token
        #[arg(long)]
        token: String,
        /// DID of the publisher
        #[arg(long)]
        did: String,
        /// Publish type (0 or 1)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        publish_type: i64,
        /// The new contract block
        #[arg(long, default_value = "")]
        block: String,
    },

    /// Subscribe to a smart contract's events
    Subscribe {
        /// Smart contract token
        #[arg(long)]
        token: String,
    },
}

impl Cli {
    /// Service configuration derived from the flags.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            minimum_amount: self.min_amount,
            ..ServiceConfig::default()
        }
    }
}

/// Run one command against `api`.
pub async fn dispatch<A: ContractTokenApi + ?Sized>(
    api: &A,
    command: Command,
) -> ContractTokenResult<OperationReceipt> {
    match command {
        Command::Generate {
            did,
            binary_code,
            raw_code,
            schema,
        } => {
            api.generate(GenerateParams {
                did,
                binary_code_path: binary_code,
                raw_code_path: raw_code,
                schema_path: schema,
            })
            .await
        }
        Command::Fetch { token } => api.fetch(FetchParams { token }).await,
        Command::Deploy {
            token,
            did,
            amount,
            tx_type,
            comment,
        } => {
            api.deploy(DeployParams {
                token,
                deployer_did: did,
                amount,
                transaction_type: tx_type,
                comment,
            })
            .await
        }
        Command::Execute {
            token,
            did,
            tx_type,
            comment,
            data,
        } => {
            api.execute(ExecuteParams {
                token,
                executor_did: did,
                transaction_type: tx_type,
                comment,
                data,
            })
            .await
        }
        Command::Publish {
            token,
            did,
            publish_type,
            block,
        } => {
            api.publish(PublishParams {
                token,
                did,
                publish_type,
                new_block: block,
            })
            .await
        }
        Command::Subscribe { token } => api.subscribe(SubscribeParams { token }).await,
    }
}

/// Build the networked service and run the parsed command.
///
/// Exit code 0 when the operation committed, 1 otherwise.
///
/// # Errors
///
/// Only setup failures. Operation failures are reported and mapped to exit code 1.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let client = JsonRpcQuorumClient::new(&cli.endpoint, Duration::from_secs(cli.timeout))
        .with_context(|| format!("failed to create quorum client for {}", cli.endpoint))?;
    info!(endpoint = client.endpoint(), "Using quorum node");

    let service = ContractTokenService::new(client, StdinPrompt, cli.service_config());
    let committed = execute(&service, cli.command, cli.json).await?;
    Ok(if committed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn execute<Q: QuorumClient, I: InputProvider>(
    service: &ContractTokenService<Q, I>,
    command: Command,
    json: bool,
) -> anyhow::Result<bool> {
    match dispatch(service, command).await {
        Ok(receipt) => {
            report(&receipt, json)?;
            Ok(true)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            Ok(false)
        }
    }
}

fn report(receipt: &OperationReceipt, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(receipt).context("failed to encode receipt")?
        );
    } else {
        println!("{}", receipt.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_contract_tokens::adapters::{ScriptedInput, ScriptedQuorumClient};
    use qc_contract_tokens::domain::lifecycle::Operation;

    fn token() -> String {
        format!("Qm{}", "k".repeat(44))
    }

    fn did() -> String {
        format!("bafybmi{}", "k".repeat(52))
    }

    #[test]
    fn test_global_defaults() {
        let cli = Cli::try_parse_from(["qc-contract", "fetch", "--token", "Qm1"]).unwrap();
        assert_eq!(cli.timeout, 30);
        assert!((cli.min_amount - 0.000_01).abs() < f64::EPSILON);
        assert_eq!(cli.command, Command::Fetch { token: "Qm1".into() });
    }

    #[test]
    fn test_execute_without_data() {
        let cli = Cli::try_parse_from([
            "qc-contract",
            "execute",
            "--token",
            "Qm1",
            "--did",
            "bafybmi1",
            "--tx-type",
            "1",
        ])
        .unwrap();
        match cli.command {
            Command::Execute { data, tx_type, .. } => {
                assert!(data.is_none());
                assert_eq!(tx_type, 1);
            }
            other => panic!("expected execute, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_type_reaches_validation() {
        let cli = Cli::try_parse_from([
            "qc-contract",
            "publish",
            "--token",
            "Qm1",
            "--did",
            "d",
            "--publish-type",
            "-1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Publish { publish_type: -1, .. }
        ));
    }

    #[test]
    fn test_deploy_requires_amount() {
        let parsed = Cli::try_parse_from([
            "qc-contract",
            "deploy",
            "--token",
            "Qm1",
            "--did",
            "d",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_min_amount_flows_into_config() {
        let cli = Cli::try_parse_from([
            "qc-contract",
            "--min-amount",
            "0.5",
            "fetch",
            "--token",
            "Qm1",
        ])
        .unwrap();
        assert!((cli.service_config().minimum_amount - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_dispatch_maps_deploy_fields() {
        let quorum = std::sync::Arc::new(ScriptedQuorumClient::approving());
        let service = ContractTokenService::with_shared(
            quorum.clone(),
            std::sync::Arc::new(ScriptedInput::unavailable()),
            ServiceConfig::default(),
        );

        let receipt = dispatch(
            &service,
            Command::Deploy {
                token: token(),
                did: did(),
                amount: 2.5,
                tx_type: 0,
                comment: "ci".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(receipt.operation, Operation::Deploy);
        match &quorum.received()[0] {
            qc_contract_tokens::domain::requests::ContractRequest::Deploy(req) => {
                assert!((req.rbt_amount.value() - 2.5).abs() < f64::EPSILON);
                assert_eq!(req.quorum_type.code(), 0);
                assert_eq!(req.comment, "ci");
            }
            other => panic!("expected deploy request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_operation_exits_with_failure() {
        let service = ContractTokenService::new(
            ScriptedQuorumClient::new(),
            ScriptedInput::unavailable(),
            ServiceConfig::default(),
        );
        let committed = execute(&service, Command::Subscribe { token: token() }, false)
            .await
            .unwrap();
        assert!(!committed);
    }
}
