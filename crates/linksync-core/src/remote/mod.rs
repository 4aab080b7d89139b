//! Remote link-shortening service
//!
//! The reconciliation engine only talks to the remote side through the
//! [`LinkService`] trait. [`ShortIoClient`] is the HTTP implementation.
//!
//! ## Payload semantics
//!
//! - [`CreateLink`] omits `title`/`tags` when the definition has none
//! - [`UpdateLink`] always sends both, empty when absent, so the remote
//!   values are cleared

mod error;
#[cfg(test)]
pub(crate) mod memory;
mod shortio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{RemoteError, RemoteResult};
pub use shortio::{ShortIoClient, DEFAULT_API_URL};

/// A link as currently held by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLink {
    /// Opaque remote identifier
    pub id: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    /// Slug on the short domain
    pub path: String,
    pub domain: String,
    #[serde(default)]
    pub domain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateLink {
    #[serde(rename = "originalURL")]
    pub original_url: String,
    pub domain: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of an update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateLink {
    #[serde(rename = "originalURL")]
    pub original_url: String,
    pub title: String,
    pub tags: Vec<String>,
}

/// Read and write access to the links of a remote shortener
#[async_trait]
pub trait LinkService: Send + Sync {
    /// All links currently registered on `domain`
    async fn list_links(&self, domain: &str) -> RemoteResult<Vec<RemoteLink>>;

    async fn create_link(&self, link: &CreateLink) -> RemoteResult<RemoteLink>;

    async fn update_link(&self, id: &str, link: &UpdateLink) -> RemoteResult<RemoteLink>;

    async fn delete_link(&self, id: &str) -> RemoteResult<()>;
}
