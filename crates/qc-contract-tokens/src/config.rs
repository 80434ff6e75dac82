//! Configuration for the contract token lifecycle controller.

use crate::domain::value_objects::limits;
use serde::{Deserialize, Serialize};

/// Prompt shown when an execute call arrives without a payload.
pub const DEFAULT_EXECUTE_PROMPT: &str = "Enter Data to be executed : ";

/// Controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Smallest RBT amount a deployment may commit.
    pub minimum_amount: f64,
    /// Prompt passed to the input provider for a missing execute payload.
    pub execute_prompt: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            minimum_amount: limits::MIN_RBT_AMOUNT,
            execute_prompt: DEFAULT_EXECUTE_PROMPT.to_string(),
        }
    }
}
