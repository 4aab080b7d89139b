//! Sync command handler

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use linksync_core::links::domains;
use linksync_core::{apply_diff, compute_diff, ApplyOptions, ShortIoClient};

use super::load_desired;
use crate::output::Output;

/// Make the remote links match the links file
///
/// Exits with failure when any individual operation failed, after
/// every planned operation has been attempted.
pub async fn run(
    settings: Option<&PathBuf>,
    file: Option<PathBuf>,
    dry_run: bool,
    concurrency: Option<usize>,
    output: &Output,
) -> Result<ExitCode> {
    let desired = load_desired(settings, file)?;
    output.message(&format!(
        "Loaded {} link(s) for {} domain(s) from {}",
        desired.links.link_count(),
        domains(&desired.links).len(),
        desired.path.display()
    ));

    let client = ShortIoClient::from_config(&desired.config)?;
    let diff = compute_diff(&desired.links, &client)
        .await
        .context("Failed to fetch remote links")?;
    debug!("Planned {} operation(s)", diff.len());

    if dry_run {
        output.print_diff(&diff);
    }

    let options = ApplyOptions {
        dry_run,
        concurrency: concurrency.unwrap_or(desired.config.concurrency),
    };
    let result = apply_diff(&diff, &client, options).await;
    output.print_sync_result(&result, dry_run);

    Ok(if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
