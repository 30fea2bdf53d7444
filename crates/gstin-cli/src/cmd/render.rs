//! Implementation of `gstin render <FILE|->`.
//!
//! Takes a saved response body through the same payload selection,
//! normalization and formatting as `lookup`, without any network access.
use gstin_core::{normalize, select_payload};
use serde_json::Value;

use crate::cli::{OutputFormat, PathOrStdin};
use crate::cmd::stdout_error;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_result_human, write_result_json};
use crate::io::read_input;

/// Runs the `render` command.
///
/// # Errors
///
/// - Exit code 2 if the input cannot be read or is not JSON.
/// - [`CliError::LookupFailed`] (exit code 1) if the payload carries no
///   record.
pub fn run(
    source: &PathOrStdin,
    max_file_size: u64,
    format: OutputFormat,
    config: FormatterConfig,
) -> Result<(), CliError> {
    let content = read_input(source, max_file_size)?;
    let payload: Value = serde_json::from_str(&content).map_err(|e| CliError::ParseFailed {
        detail: e.to_string(),
    })?;
    let result = normalize(select_payload(payload)?);
    tracing::debug!(fields = result.len(), "rendering saved response");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_result_human(&mut out, &result, config),
        OutputFormat::Json => write_result_json(&mut out, &result),
    }
    .map_err(stdout_error)
}
