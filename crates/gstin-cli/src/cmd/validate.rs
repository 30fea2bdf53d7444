//! Implementation of `gstin validate <GSTIN>...`.
//!
//! Shape check only; no request is made. One line is printed per argument,
//! and the command exits with code 2 if any argument was rejected.
use gstin_core::validate;

use crate::cli::OutputFormat;
use crate::cmd::stdout_error;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_validation_human, write_validation_json};

/// Runs the `validate` command.
///
/// # Errors
///
/// [`CliError::InvalidGstins`] if at least one input is malformed, or
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(
    inputs: &[String],
    format: OutputFormat,
    config: FormatterConfig,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut invalid = 0;

    for input in inputs {
        let outcome = validate(input);
        if outcome.is_err() {
            invalid += 1;
        }
        match format {
            OutputFormat::Human => write_validation_human(&mut out, input, &outcome, config),
            OutputFormat::Json => write_validation_json(&mut out, input, &outcome),
        }
        .map_err(stdout_error)?;
    }

    if invalid > 0 {
        return Err(CliError::InvalidGstins {
            invalid,
            total: inputs.len(),
        });
    }
    Ok(())
}
