//! Implementation of `gstin lookup <GSTIN>`.
//!
//! Validates the argument, sends exactly one request, normalizes the record
//! and prints it. An invalid GSTIN exits with code 2 before any request is
//! made; a failed lookup exits with code 1.
use gstin_core::{normalize, validate};
use tokio::runtime::Runtime;

use crate::cli::OutputFormat;
use crate::client::LookupClient;
use crate::cmd::stdout_error;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_result_human, write_result_json};

/// Runs the `lookup` command.
///
/// # Errors
///
/// - [`CliError::InvalidGstin`] if `input` is not a well-formed GSTIN.
/// - [`CliError::LookupFailed`] if the API call does not yield a record.
pub fn run(
    input: &str,
    client: &LookupClient,
    runtime: &Runtime,
    format: OutputFormat,
    config: FormatterConfig,
) -> Result<(), CliError> {
    let gstin = validate(input).map_err(|e| {
        tracing::debug!(input, error = ?e, "rejected GSTIN argument");
        CliError::InvalidGstin {
            input: input.to_owned(),
        }
    })?;

    let raw = runtime.block_on(client.lookup(&gstin))?;
    let result = normalize(raw);
    tracing::info!(gstin = %gstin, fields = result.len(), "lookup succeeded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_result_human(&mut out, &result, config),
        OutputFormat::Json => write_result_json(&mut out, &result),
    }
    .map_err(stdout_error)
}
