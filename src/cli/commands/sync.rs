//! Sync command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::format_sync_report;
use crate::publish::{ContentApi, GitBookApi, GitBookPublisher, PublisherConfig};

/// Arguments for the `sync` command
pub struct SyncArgs {
    /// Directory of markdown files
    pub directory: PathBuf,
    /// GitBook space, overriding `default_space`
    pub space: Option<String>,
    /// Publisher config file (defaults to ~/.walter/gitbook.yml)
    pub config: Option<PathBuf>,
}

/// Handle the `sync` command against GitBook
pub fn handle_sync(args: &SyncArgs) -> Result<(), CliError> {
    let config = PublisherConfig::load_or_default(args.config.as_deref())?;
    // Fail on a missing space before asking for credentials
    config.resolve_space(args.space.as_deref())?;
    let api = GitBookApi::from_env(&config)?;
    sync_with(GitBookPublisher::new(api, config), args)
}

/// Run a sync through any content API
pub fn sync_with<A: ContentApi>(
    publisher: GitBookPublisher<A>,
    args: &SyncArgs,
) -> Result<(), CliError> {
    eprintln!("Syncing {}...", args.directory.display());
    let report = publisher.sync_directory(&args.directory, args.space.as_deref())?;

    print!("{}", format_sync_report(&report));

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::SyncIncomplete {
            failed: report.failures.len(),
            total: report.failures.len() + report.published.len(),
        })
    }
}
