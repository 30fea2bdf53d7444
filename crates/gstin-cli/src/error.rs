/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `gstin` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure: an argument, file or configuration
///   value could not be used. These errors terminate before any request is
///   sent.
/// - Exit code **1**: logical failure: the lookup ran but did not produce a
///   record.
use std::fmt;
use std::path::PathBuf;

use gstin_core::{INVALID_GSTIN_MESSAGE, LookupError};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `gstin` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source or sink.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A saved response is not valid JSON.
    ParseFailed {
        /// Parser error with line and column.
        detail: String,
    },

    /// The GSTIN argument of `lookup` is malformed.
    InvalidGstin {
        /// The rejected argument, as given.
        input: String,
    },

    /// One or more `validate` arguments were malformed.
    ///
    /// The per-input results have already been printed.
    InvalidGstins {
        /// Number of rejected arguments.
        invalid: usize,
        /// Number of arguments checked.
        total: usize,
    },

    /// The HTTP client could not be constructed.
    ClientInit {
        /// The underlying builder error.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The lookup (or the saved response passed to `render`) did not yield
    /// a record.
    LookupFailed(LookupError),
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure (bad argument, unreadable file, etc.).
    /// - `1`: logical failure (the lookup failed).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::InvalidGstin { .. }
            | Self::InvalidGstins { .. }
            | Self::ClientInit { .. } => 2,

            Self::LookupFailed(_) => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: response is not valid JSON: {detail}")
            }
            Self::InvalidGstin { input } => {
                format!("error: {INVALID_GSTIN_MESSAGE} (got {input:?})")
            }
            Self::InvalidGstins { invalid, total } => {
                format!("error: {invalid} of {total} inputs are not valid GSTINs")
            }
            Self::ClientInit { detail } => {
                format!("error: failed to build HTTP client: {detail}")
            }
            Self::LookupFailed(e) => format!("error: {e}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<LookupError> for CliError {
    fn from(e: LookupError) -> Self {
        Self::LookupFailed(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
