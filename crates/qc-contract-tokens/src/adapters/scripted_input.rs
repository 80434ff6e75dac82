//! # Scripted Input
//!
//! Input provider that answers prompts with a preset value and remembers
//! every prompt it was shown.

use crate::errors::InputError;
use crate::ports::outbound::InputProvider;
use parking_lot::Mutex;

/// Input provider with a fixed answer.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    /// Value returned on every prompt. `None` means no input source.
    answer: Option<String>,
    /// Prompts shown so far.
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    /// Answer every prompt with `answer`.
    #[must_use]
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every prompt with [`InputError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl InputProvider for ScriptedInput {
    fn acquire(&self, prompt: &str) -> Result<String, InputError> {
        self.prompts.lock().push(prompt.to_string());
        self.answer.clone().ok_or(InputError::Unavailable)
    }
}

// =============================================================================
// TESTS
// =============================================================================
