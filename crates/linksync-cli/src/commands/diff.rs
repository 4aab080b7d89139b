//! Diff command handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use linksync_core::{compute_diff, ShortIoClient};

use super::load_desired;
use crate::output::Output;

/// Show what a sync would change, without writing anything
pub async fn run(settings: Option<&PathBuf>, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let desired = load_desired(settings, file)?;
    let client = ShortIoClient::from_config(&desired.config)?;

    let diff = compute_diff(&desired.links, &client)
        .await
        .context("Failed to fetch remote links")?;
    output.print_diff(&diff);

    Ok(())
}
