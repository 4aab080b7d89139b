//! Desired vs. actual diff
//!
//! [`compute_diff`] fetches the remote snapshot for every domain the links
//! file references, then hands both sides to the pure [`diff_links`].

use std::collections::{HashMap, HashSet};

use futures_util::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info};

use super::normalize::{tags_equal, titles_equal};
use crate::links::{distinct_domains, flatten_links, link_key, FlatLink, LinkConfig};
use crate::remote::{LinkService, RemoteLink, RemoteResult};

/// A desired link paired with the remote record it should overwrite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkUpdate {
    pub desired: FlatLink,
    pub existing: RemoteLink,
}

/// Operations needed to make the remote side match the links file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkDiff {
    pub to_create: Vec<FlatLink>,
    pub to_update: Vec<LinkUpdate>,
    pub to_delete: Vec<RemoteLink>,
}

impl LinkDiff {
    /// True when the remote side already matches
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// Total number of operations
    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }
}

/// True when the remote record already matches the desired link
pub fn link_matches(desired: &FlatLink, existing: &RemoteLink) -> bool {
    desired.url == existing.original_url
        && titles_equal(desired.title.as_deref(), existing.title.as_deref())
        && tags_equal(desired.tags.as_deref(), existing.tags.as_deref())
}

/// Fetch remote state and diff it against the links file
///
/// Each referenced domain is listed exactly once. Listings run
/// concurrently and all must succeed before anything is compared.
pub async fn compute_diff<S>(config: &LinkConfig, service: &S) -> RemoteResult<LinkDiff>
where
    S: LinkService + ?Sized,
{
    let desired = flatten_links(config);
    let domains = distinct_domains(&desired);

    debug!("Fetching remote links for {} domain(s)", domains.len());
    let snapshots = try_join_all(domains.iter().map(|domain| service.list_links(domain))).await?;
    let actual: Vec<RemoteLink> = snapshots.into_iter().flatten().collect();

    let diff = diff_links(&desired, &actual);
    info!(
        "Diff: {} to create, {} to update, {} to delete",
        diff.to_create.len(),
        diff.to_update.len(),
        diff.to_delete.len()
    );
    Ok(diff)
}

/// Classify desired and actual links into create, update, and delete
///
/// Remote links on domains that no desired link references are ignored.
pub fn diff_links(desired: &[FlatLink], actual: &[RemoteLink]) -> LinkDiff {
    let managed: HashSet<&str> = desired.iter().map(|l| l.domain.as_str()).collect();

    let remote_by_key: HashMap<String, &RemoteLink> = actual
        .iter()
        .filter(|r| managed.contains(r.domain.as_str()))
        .map(|r| (link_key(&r.domain, &r.path), r))
        .collect();

    let mut diff = LinkDiff::default();
    let mut desired_keys = HashSet::with_capacity(desired.len());

    for link in desired {
        let key = link.key();
        match remote_by_key.get(&key) {
            None => diff.to_create.push(link.clone()),
            Some(existing) if !link_matches(link, existing) => diff.to_update.push(LinkUpdate {
                desired: link.clone(),
                existing: (*existing).clone(),
            }),
            Some(_) => {}
        }
        desired_keys.insert(key);
    }

    diff.to_delete = actual
        .iter()
        .filter(|r| managed.contains(r.domain.as_str()))
        .filter(|r| !desired_keys.contains(&link_key(&r.domain, &r.path)))
        .cloned()
        .collect();

    diff
}
