/// Command module for the `gstin` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod lookup;
pub mod render;
pub mod session;
pub mod validate;

use crate::error::CliError;

/// Maps a failed write to stdout (e.g. a closed pipe) to a [`CliError`].
pub(crate) fn stdout_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}
