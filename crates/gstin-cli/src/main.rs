mod cli;
mod client;
mod cmd;
mod config;
mod error;
mod format;
mod io;

use clap::Parser as _;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::cli::{ApiArgs, Cli, Command};
use crate::client::LookupClient;
use crate::config::ApiConfig;
use crate::error::CliError;
use crate::format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

/// Installs the stderr log subscriber. `RUST_LOG`, when set, replaces the
/// level chosen by `--quiet` / `--verbose`.
fn init_tracing(quiet: bool, verbose: bool) {
    let default = if verbose {
        "warn,gstin=debug,gstin_core=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = FormatterConfig::from_flags(cli.no_color);
    match cli.command {
        Command::Lookup { gstin } => {
            let (client, runtime) = connect(cli.api)?;
            cmd::lookup::run(&gstin, &client, &runtime, cli.format, config)
        }
        Command::Validate { gstins } => cmd::validate::run(&gstins, cli.format, config),
        Command::Render { file } => cmd::render::run(&file, cli.max_file_size, cli.format, config),
        Command::Session => {
            let (client, runtime) = connect(cli.api)?;
            cmd::session::run(&client, &runtime, cli.format, config)
        }
    }
}

/// Builds the single-threaded runtime and the HTTP client used by the
/// commands that contact the API.
fn connect(args: ApiArgs) -> Result<(LookupClient, Runtime), CliError> {
    let config = ApiConfig::from(args);
    tracing::debug!(?config, "lookup configuration");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::ClientInit {
            detail: format!("async runtime: {e}"),
        })?;
    let client = {
        let _entered = runtime.enter();
        LookupClient::new(config)?
    };
    Ok((client, runtime))
}
