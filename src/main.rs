//! docsym CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use docsym::cli::Commands;
use docsym::commands::{run_check, run_keys, run_lookup, CommandContext};
use docsym::{Cli, DocsymConfig};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> docsym::Result<String> {
    let cli = Cli::parse();
    let config = DocsymConfig::load(cli.config.as_deref())?;

    init_logging(&config, cli.verbose);
    tracing::debug!("docsym v{} ({:?})", env!("CARGO_PKG_VERSION"), cli.command);

    let ctx = CommandContext::new(cli.format, cli.verbose, config);

    match &cli.command {
        Commands::Lookup(args) => run_lookup(args, &ctx),
        Commands::Keys(args) => run_keys(args, &ctx),
        Commands::Check(args) => run_check(args, &ctx),
    }
}

/// Logs go to stderr; stdout carries command output only.
/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &DocsymConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("docsym={}", level)))
        .unwrap_or_else(|_| EnvFilter::new("docsym=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
