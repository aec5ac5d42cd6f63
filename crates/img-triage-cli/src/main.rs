//! img-triage CLI - batch image quality triage.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::check::CheckArgs;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let app_config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Check(args)) => check(args, &app_config),
        Some(Commands::Reports(ref args)) => match commands::reports::run(args, &app_config) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
        None => {
            // Default behavior: run check with flattened args
            if cli.check.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            check(cli.check, &app_config)
        }
    };

    exit_code.into()
}

fn check(args: CheckArgs, app_config: &AppConfig) -> ExitCode {
    let args = CheckArgs::with_config(args, app_config);
    match commands::check::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}

/// Logs go to stderr. `IMG_TRIAGE_LOG` takes an `EnvFilter` directive and
/// overrides the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("IMG_TRIAGE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
