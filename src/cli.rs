//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "actions-pin")]
#[command(
    version,
    about = "Pin GitHub Actions to release commit SHAs and keep them up to date"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// GitHub token (defaults to $GITHUB_TOKEN or $GH_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// GitHub API base URL (defaults to $GITHUB_API_URL or https://api.github.com)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pin actions to release commit SHAs
    ///
    /// Pinning to a full commit SHA is GitHub's recommended hardening for
    /// third-party actions. The release version is kept in a trailing comment.
    #[command(after_help = "Examples:
  actions-pin pin --all --dir .github/workflows --write
  actions-pin pin --action actions/checkout --version v4.2.2 --file .github/workflows/lint.yaml")]
    Pin(PinArgs),

    /// Update an action to its latest release
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("selection").required(true).args(["all", "action"]))]
pub struct PinArgs {
    /// Pin every action to its latest release
    #[arg(short, long, conflicts_with_all = ["action", "version"])]
    pub all: bool,

    /// Action to pin (e.g. actions/checkout)
    #[arg(long, requires = "version")]
    pub action: Option<String>,

    /// Release tag to pin the action to
    #[arg(long, requires = "action")]
    pub version: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Action to update (e.g. actions/checkout)
    #[arg(long)]
    pub action: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// Files to operate on
#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("files").required(true).args(["dir", "file"]))]
pub struct TargetArgs {
    /// Directory containing workflow files (searched recursively)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Single workflow file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Write changes to files (default is a dry run printing a diff)
    #[arg(short, long)]
    pub write: bool,
}
