//! Diff application
//!
//! Runs the create phase, then updates, then deletes. Every entry is
//! independent: a failure is recorded in [`SyncResult::errors`] and the
//! remaining entries and phases still run.

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::diff::{LinkDiff, LinkUpdate};
use super::normalize::normalize_title;
use crate::links::{link_key, FlatLink};
use crate::remote::{CreateLink, LinkService, RemoteError, RemoteLink, UpdateLink};

/// Default number of in-flight requests per phase
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Outcome of applying a diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// One message per failed operation
    pub errors: Vec<String>,
}

impl SyncResult {
    /// Counts a dry run reports: every operation assumed to succeed
    pub fn planned(diff: &LinkDiff) -> Self {
        Self {
            created: diff.to_create.len(),
            updated: diff.to_update.len(),
            deleted: diff.to_delete.len(),
            errors: Vec::new(),
        }
    }

    /// True when at least one operation failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// How to apply a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute counts only, never call the service
    pub dry_run: bool,
    /// Maximum in-flight requests within a phase
    pub concurrency: usize,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ApplyOptions {
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Payload for creating a desired link; absent title/tags stay absent
pub fn create_payload(link: &FlatLink) -> CreateLink {
    CreateLink {
        original_url: link.url.clone(),
        domain: link.domain.clone(),
        path: link.slug.clone(),
        title: link.title.clone(),
        tags: link.tags.clone(),
    }
}

/// Payload for updating a link; absent title/tags are sent empty to clear them
pub fn update_payload(link: &FlatLink) -> UpdateLink {
    UpdateLink {
        original_url: link.url.clone(),
        title: normalize_title(link.title.as_deref()).to_string(),
        tags: link.tags.clone().unwrap_or_default(),
    }
}

/// Apply `diff` to the remote service
pub async fn apply_diff<S>(diff: &LinkDiff, service: &S, options: ApplyOptions) -> SyncResult
where
    S: LinkService + ?Sized,
{
    if options.dry_run {
        info!("Dry run: {} operation(s) planned, none applied", diff.len());
        return SyncResult::planned(diff);
    }

    let limit = options.concurrency.max(1);
    let mut result = SyncResult::default();

    let creates = run_phase(&diff.to_create, limit, |link| create_one(service, link)).await;
    tally(creates, &mut result.created, &mut result.errors);

    let updates = run_phase(&diff.to_update, limit, |update| update_one(service, update)).await;
    tally(updates, &mut result.updated, &mut result.errors);

    let deletes = run_phase(&diff.to_delete, limit, |link| delete_one(service, link)).await;
    tally(deletes, &mut result.deleted, &mut result.errors);

    info!(
        "Applied diff: {} created, {} updated, {} deleted, {} failed",
        result.created,
        result.updated,
        result.deleted,
        result.errors.len()
    );
    result
}

/// Run one phase with bounded parallelism, results in entry order
async fn run_phase<'a, T, F, Fut>(entries: &'a [T], limit: usize, op: F) -> Vec<Result<(), String>>
where
    F: FnMut(&'a T) -> Fut,
    Fut: std::future::Future<Output = Result<(), String>>,
{
    stream::iter(entries).map(op).buffered(limit).collect().await
}

fn tally(outcomes: Vec<Result<(), String>>, count: &mut usize, errors: &mut Vec<String>) {
    for outcome in outcomes {
        match outcome {
            Ok(()) => *count += 1,
            Err(message) => errors.push(message),
        }
    }
}

async fn create_one<S: LinkService + ?Sized>(service: &S, link: &FlatLink) -> Result<(), String> {
    let key = link.key();
    debug!("Creating {}", key);
    service
        .create_link(&create_payload(link))
        .await
        .map(|_| ())
        .map_err(|e| failure("create", &key, e))
}

async fn update_one<S: LinkService + ?Sized>(
    service: &S,
    update: &LinkUpdate,
) -> Result<(), String> {
    let key = update.desired.key();
    debug!("Updating {} (id {})", key, update.existing.id);
    service
        .update_link(&update.existing.id, &update_payload(&update.desired))
        .await
        .map(|_| ())
        .map_err(|e| failure("update", &key, e))
}

async fn delete_one<S: LinkService + ?Sized>(service: &S, link: &RemoteLink) -> Result<(), String> {
    let key = link_key(&link.domain, &link.path);
    debug!("Deleting {} (id {})", key, link.id);
    service
        .delete_link(&link.id)
        .await
        .map_err(|e| failure("delete", &key, e))
}

fn failure(action: &str, key: &str, error: RemoteError) -> String {
    if error.is_client_error() {
        warn!("Service rejected {} of {}: {}", action, key, error);
    } else {
        warn!("Failed to {} {}: {}", action, key, error);
    }
    format!("Failed to {} {}: {}", action, key, error)
}
