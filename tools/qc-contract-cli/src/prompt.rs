//! Terminal prompt for the execute payload.

use std::io::{self, BufRead, Write};

use qc_contract_tokens::errors::InputError;
use qc_contract_tokens::ports::outbound::InputProvider;

/// Reads the missing execute payload from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl InputProvider for StdinPrompt {
    fn acquire(&self, prompt: &str) -> Result<String, InputError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        read_answer_blocking(prompt, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// [`read_answer`] on a runtime worker.
///
/// The terminal read blocks, so the worker thread is handed over while it
/// waits. Needs the multi-threaded runtime when called from async code.
pub fn read_answer_blocking<R: BufRead, W: Write>(
    prompt: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<String, InputError> {
    tokio::task::block_in_place(|| read_answer(prompt, reader, writer))
}

/// Write `prompt`, then read one line and strip the line ending.
///
/// End of input before any line is `InputError::Unavailable`.
pub fn read_answer<R: BufRead, W: Write>(
    prompt: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<String, InputError> {
    write!(writer, "{prompt}").map_err(|e| InputError::Read(e.to_string()))?;
    writer.flush().map_err(|e| InputError::Read(e.to_string()))?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| InputError::Read(e.to_string()))?;
    if read == 0 {
        return Err(InputError::Unavailable);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
