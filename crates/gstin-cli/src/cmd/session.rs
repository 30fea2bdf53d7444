//! Implementation of `gstin session`.
//!
//! Reads one GSTIN per line from stdin and submits each through a single
//! [`LookupForm`], printing the state the form settles in. Failures are
//! reported per line and the loop carries on, so the command only fails when
//! stdin or stdout does.
use std::io::{BufRead, Write};

use gstin_core::{LookupForm, SubmitError};
use tokio::runtime::Runtime;

use crate::cli::OutputFormat;
use crate::client::LookupClient;
use crate::cmd::stdout_error;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_state_human, write_state_json};

/// Runs the `session` command against stdin and stdout.
///
/// # Errors
///
/// [`CliError::StdinReadError`] or [`CliError::IoError`] if either stream
/// fails.
pub fn run(
    client: &LookupClient,
    runtime: &Runtime,
    format: OutputFormat,
    config: FormatterConfig,
) -> Result<(), CliError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let step = |form: &mut LookupForm| submit(form, client, runtime);
    drive(stdin.lock(), &mut stdout.lock(), step, format, config)
}

/// Feeds every input line to the form, calling `step` to submit it.
fn drive<R, W, F>(
    mut reader: R,
    out: &mut W,
    mut step: F,
    format: OutputFormat,
    config: FormatterConfig,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut LookupForm),
{
    let mut form = LookupForm::new();
    let mut submissions = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if read == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD, which fails validation for that
        // line only.
        let line = String::from_utf8_lossy(&buf);
        let input = line.trim();
        form.set_input(input);
        step(&mut form);
        submissions += 1;

        match format {
            OutputFormat::Human => write_state_human(out, input, form.state(), config),
            OutputFormat::Json => write_state_json(out, input, form.state()),
        }
        .and_then(|()| out.flush())
        .map_err(stdout_error)?;
    }
    tracing::debug!(submissions, "session finished");
    Ok(())
}

/// Submits the form's input and, when it validates, resolves it with one
/// lookup.
fn submit(form: &mut LookupForm, client: &LookupClient, runtime: &Runtime) {
    let gstin = match form.submit() {
        Ok(gstin) => gstin,
        Err(SubmitError::Invalid(e)) => {
            tracing::debug!(input = form.input(), error = ?e, "input rejected");
            return;
        }
        Err(e @ (SubmitError::InFlight | SubmitError::NotPending)) => {
            tracing::warn!(error = %e, "submission refused");
            return;
        }
    };
    let outcome = runtime.block_on(client.lookup(&gstin));
    if let Err(e) = form.resolve(outcome) {
        tracing::warn!(gstin = %gstin, error = %e, "lookup outcome dropped");
    }
}
