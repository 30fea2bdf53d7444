//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits aligned, optionally colored text. `Json` emits a single
/// pretty-printed object for `lookup` and `render`, and NDJSON for
/// `validate` and `session`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `gstin` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Look up the registration details of a GSTIN.
    Lookup {
        /// The 15-character GSTIN (case-insensitive).
        #[arg(value_name = "GSTIN")]
        gstin: String,
    },

    /// Check the shape of one or more GSTINs without contacting the API.
    Validate {
        /// GSTINs to check.
        #[arg(value_name = "GSTIN", num_args = 1.., required = true)]
        gstins: Vec<String>,
    },

    /// Render a saved lookup response.
    Render {
        /// Path to a JSON response body, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Read one GSTIN per line from stdin and look each one up in turn.
    Session,
}

/// Lookup API settings shared by the commands that contact the API.
#[derive(clap::Args, Clone)]
pub struct ApiArgs {
    /// API key sent in the `x-rapidapi-key` header.
    #[arg(long, global = true, env = "RAPIDAPI_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// API host sent in the `x-rapidapi-host` header.
    #[arg(long, global = true, env = "RAPIDAPI_HOST", default_value = "")]
    pub api_host: String,

    /// Base URL of the lookup API (default: `https://{api-host}`).
    #[arg(long, global = true, env = "GSTIN_API_BASE_URL")]
    pub base_url: Option<Url>,

    /// Request timeout in seconds (default: no timeout).
    #[arg(long, global = true, env = "GSTIN_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// Root CLI struct for the `gstin` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "gstin",
    version,
    about = "GSTIN registration lookup",
    long_about = "Validates Goods & Services Tax Identification Numbers and looks up\n\
                  their registration details through a RapidAPI-hosted service."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Lookup API settings.
    #[command(flatten)]
    pub api: ApiArgs,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors to stderr (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log request details to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum size in bytes of a response read by `render`.
    ///
    /// Default: 16777216 (16 MiB).
    #[arg(
        long,
        global = true,
        env = "GSTIN_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// A non-empty `NO_COLOR` environment variable has the same effect, per
    /// <https://no-color.org>.
    #[arg(long, global = true)]
    pub no_color: bool,
}
