//! # QC Telemetry
//!
//! Structured logging for the contract token tools, on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `QC_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `QC_SERVICE_NAME` | `qc-contract-tokens` | Service name on the startup event |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed or could not be set.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log filter could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install structured logging for the process.
///
/// Call once, at startup.
///
/// # Errors
///
/// `TelemetryError::Config` for an unparsable filter and
/// `TelemetryError::SubscriberInit` if a subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}
