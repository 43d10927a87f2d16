use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use actions_pin::cli::{Cli, Command, TargetArgs};
use actions_pin::config::GitHubConfig;
use actions_pin::logging;
use actions_pin::parser::github_actions::GitHubActionsParser;
use actions_pin::processor::{FileOutcome, Processor, collect_workflow_files};
use actions_pin::version::cache::ReleaseCache;
use actions_pin::version::registries::GitHubReleaseLookup;
use actions_pin::version::resolver::ReleaseResolver;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_format);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GitHubConfig::resolve(cli.token, cli.api_url);
    if config.token.is_none() {
        warn!("No GitHub token configured, requests are subject to anonymous rate limits");
    }

    let lookup = GitHubReleaseLookup::from_config(&config)
        .context("Failed to build GitHub client")?;
    let resolver = ReleaseResolver::new(Arc::new(lookup), Arc::new(ReleaseCache::new()));
    let parser = Arc::new(GitHubActionsParser::new());

    let outcomes = match cli.command {
        Command::Pin(args) => {
            let files = target_files(&args.target).await?;
            let processor = Processor::new(parser, resolver, args.target.write);
            match (args.action, args.version) {
                (Some(action), Some(version)) => {
                    info!("Pinning {}@{} in {} files", action, version, files.len());
                    processor.pin_action(&files, &action, &version).await
                }
                _ => {
                    info!("Pinning all actions in {} files", files.len());
                    processor.pin_all(&files).await
                }
            }
        }
        Command::Update(args) => {
            let files = target_files(&args.target).await?;
            let processor = Processor::new(parser, resolver, args.target.write);
            info!("Updating {} in {} files", args.action, files.len());
            processor.update_action(&files, &args.action).await
        }
    };

    report(&outcomes);
    Ok(())
}

async fn target_files(target: &TargetArgs) -> anyhow::Result<Vec<PathBuf>> {
    if let Some(file) = &target.file {
        return Ok(vec![file.clone()]);
    }

    let dir = target
        .dir
        .as_deref()
        .context("Either --dir or --file is required")?;
    let files = collect_workflow_files(dir).await?;
    if files.is_empty() {
        warn!("No YAML files found in {}", dir.display());
    }
    Ok(files)
}

fn report(outcomes: &[FileOutcome]) {
    for diff in outcomes.iter().filter_map(|o| o.diff.as_deref()) {
        print!("{diff}");
    }

    let changed = outcomes.iter().filter(|o| o.changed).count();
    let written = outcomes.iter().filter(|o| o.written).count();
    info!(
        "{} files processed, {} with changes, {} written",
        outcomes.len(),
        changed,
        written
    );
}
