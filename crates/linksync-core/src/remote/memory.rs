//! In-memory [`LinkService`] for tests
//!
//! Holds remote links in a `Vec`, records every call, and can be told to
//! fail specific operations.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{RemoteError, RemoteResult};
use super::{CreateLink, LinkService, RemoteLink, UpdateLink};

/// A recorded call against the service
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Create(CreateLink),
    Update(String, UpdateLink),
    Delete(String),
}

#[derive(Default)]
pub struct MemoryLinkService {
    links: Mutex<Vec<RemoteLink>>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<u64>,
    /// Paths whose create/update/delete calls fail
    failing_paths: HashSet<String>,
    /// Domains whose listing fails
    failing_domains: HashSet<String>,
}

impl MemoryLinkService {
    pub fn new(links: Vec<RemoteLink>) -> Self {
        Self {
            next_id: Mutex::new(1000),
            links: Mutex::new(links),
            ..Self::default()
        }
    }

    /// Make writes for `path` fail
    pub fn fail_path(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    /// Make listing `domain` fail
    pub fn fail_domain(mut self, domain: &str) -> Self {
        self.failing_domains.insert(domain.to_string());
        self
    }

    pub fn links(&self) -> Vec<RemoteLink> {
        self.links.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that would modify the remote side
    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn rejected(path: &str) -> RemoteError {
        RemoteError::Api {
            status: 400,
            message: format!("rejected {}", path),
        }
    }
}

#[async_trait]
impl LinkService for MemoryLinkService {
    async fn list_links(&self, domain: &str) -> RemoteResult<Vec<RemoteLink>> {
        self.record(Call::List(domain.to_string()));
        if self.failing_domains.contains(domain) {
            return Err(RemoteError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.domain == domain)
            .cloned()
            .collect())
    }

    async fn create_link(&self, link: &CreateLink) -> RemoteResult<RemoteLink> {
        self.record(Call::Create(link.clone()));
        if self.failing_paths.contains(&link.path) {
            return Err(Self::rejected(&link.path));
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            next.to_string()
        };
        let created = RemoteLink {
            id,
            original_url: link.original_url.clone(),
            path: link.path.clone(),
            domain: link.domain.clone(),
            domain_id: 1,
            title: link.title.clone(),
            tags: link.tags.clone(),
        };
        self.links.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_link(&self, id: &str, link: &UpdateLink) -> RemoteResult<RemoteLink> {
        self.record(Call::Update(id.to_string(), link.clone()));

        let mut links = self.links.lock().unwrap();
        let existing = links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| RemoteError::Api {
                status: 404,
                message: format!("no link {}", id),
            })?;

        if self.failing_paths.contains(&existing.path) {
            return Err(Self::rejected(&existing.path));
        }

        existing.original_url = link.original_url.clone();
        existing.title = Some(link.title.clone());
        existing.tags = Some(link.tags.clone());
        Ok(existing.clone())
    }

    async fn delete_link(&self, id: &str) -> RemoteResult<()> {
        self.record(Call::Delete(id.to_string()));

        let mut links = self.links.lock().unwrap();
        let Some(pos) = links.iter().position(|l| l.id == id) else {
            return Err(RemoteError::Api {
                status: 404,
                message: format!("no link {}", id),
            });
        };

        if self.failing_paths.contains(&links[pos].path) {
            return Err(Self::rejected(&links[pos].path));
        }

        links.remove(pos);
        Ok(())
    }
}
