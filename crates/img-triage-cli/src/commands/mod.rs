//! CLI command definitions and handlers.

pub mod check;
pub mod reports;

use clap::{Parser, Subcommand};

/// img-triage - flag blurry, badly exposed and grayscale images
#[derive(Parser)]
#[command(name = "img-triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze images and report quality flags
    Check(check::CheckArgs),
    /// List reports persisted with --export
    Reports(reports::ReportsArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image passed.
    Success = 0,
    /// At least one image was flagged.
    IssuesFound = 1,
    /// The run failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
