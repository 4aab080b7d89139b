//! Short.io HTTP client
//!
//! Implements [`LinkService`] over the Short.io REST API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | resolve domain | `GET /api/domains` |
//! | list links | `GET /api/links?domain_id={id}&limit=150[&pageToken=..]` |
//! | create | `POST /links` |
//! | update | `POST /links/{id}` |
//! | delete | `DELETE /links/{id}` |
//!
//! Requests authenticate with the API key in the `authorization` header.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::{RemoteError, RemoteResult};
use super::{CreateLink, LinkService, RemoteLink, UpdateLink};
use crate::config::Config;

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://api.short.io";

/// Page size for link listing (the API maximum)
const PAGE_LIMIT: u32 = 150;

/// A domain registered with the account
#[derive(Debug, Deserialize)]
struct ApiDomain {
    id: u64,
    hostname: String,
}

/// One page of a link listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLinkPage {
    #[serde(default)]
    links: Vec<ApiLink>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// A link record as returned by the API
#[derive(Debug, Deserialize)]
struct ApiLink {
    #[serde(rename = "idString", default)]
    id_string: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(rename = "originalURL")]
    original_url: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(rename = "DomainId", alias = "domainId", default)]
    domain_id: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl ApiLink {
    /// Convert to a [`RemoteLink`] stamped with `domain`
    ///
    /// The record's own hostname is used only when `domain` is empty.
    fn into_remote(self, domain: &str, domain_id: u64) -> RemoteResult<RemoteLink> {
        let id = match (self.id_string, self.id) {
            (Some(id), _) if !id.is_empty() => id,
            (_, Some(serde_json::Value::String(id))) => id,
            (_, Some(serde_json::Value::Number(id))) => id.to_string(),
            _ => {
                return Err(RemoteError::Decode(format!(
                    "link '{}' has no id",
                    self.path
                )))
            }
        };

        Ok(RemoteLink {
            id,
            original_url: self.original_url,
            path: self.path,
            domain: if domain.is_empty() {
                self.domain.unwrap_or_default()
            } else {
                domain.to_string()
            },
            domain_id: self.domain_id.unwrap_or(domain_id),
            title: self.title,
            tags: self.tags,
        })
    }
}

/// HTTP client for the Short.io API
pub struct ShortIoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Hostname to numeric domain id, `None` until the first lookup
    domain_ids: Mutex<Option<HashMap<String, u64>>>,
}

impl ShortIoClient {
    /// Create a client for `base_url` authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> RemoteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("linksync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            domain_ids: Mutex::new(None),
        })
    }

    /// Create a client from application settings
    pub fn from_config(config: &Config) -> RemoteResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RemoteError::MissingApiKey)?;

        Self::new(
            &config.api_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Full URL for an API path
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolve a domain hostname to its numeric id
    async fn domain_id(&self, domain: &str) -> RemoteResult<u64> {
        let mut cache = self.domain_ids.lock().await;

        if cache.is_none() {
            debug!("Fetching domain list");
            let response = self
                .http
                .get(self.endpoint("/api/domains"))
                .header("authorization", &self.api_key)
                .send()
                .await?;
            let domains: Vec<ApiDomain> = check(response).await?.json().await?;

            *cache = Some(
                domains
                    .into_iter()
                    .map(|d| (d.hostname.to_ascii_lowercase(), d.id))
                    .collect(),
            );
        }

        cache
            .as_ref()
            .and_then(|ids| ids.get(&domain.to_ascii_lowercase()))
            .copied()
            .ok_or_else(|| RemoteError::UnknownDomain(domain.to_string()))
    }
}

#[async_trait]
impl LinkService for ShortIoClient {
    async fn list_links(&self, domain: &str) -> RemoteResult<Vec<RemoteLink>> {
        let domain_id = self.domain_id(domain).await?;
        let mut links = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("domain_id", domain_id.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            if let Some(ref token) = page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self
                .http
                .get(self.endpoint("/api/links"))
                .header("authorization", &self.api_key)
                .query(&query)
                .send()
                .await?;
            let page: ApiLinkPage = check(response).await?.json().await?;

            debug!("Fetched {} link(s) for {}", page.links.len(), domain);
            let page_was_empty = page.links.is_empty();
            for link in page.links {
                links.push(link.into_remote(domain, domain_id)?);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) if !page_was_empty && page_token.as_deref() != Some(next.as_str()) => {
                    page_token = Some(next);
                }
                _ => break,
            }
        }

        info!("Remote has {} link(s) on {}", links.len(), domain);
        Ok(links)
    }

    async fn create_link(&self, link: &CreateLink) -> RemoteResult<RemoteLink> {
        debug!("POST /links {}/{}", link.domain, link.path);
        let response = self
            .http
            .post(self.endpoint("/links"))
            .header("authorization", &self.api_key)
            .json(link)
            .send()
            .await?;

        let created: ApiLink = check(response).await?.json().await?;
        created.into_remote(&link.domain, 0)
    }

    async fn update_link(&self, id: &str, link: &UpdateLink) -> RemoteResult<RemoteLink> {
        debug!("POST /links/{}", id);
        let response = self
            .http
            .post(self.endpoint(&format!("/links/{}", id)))
            .header("authorization", &self.api_key)
            .json(link)
            .send()
            .await?;

        let updated: ApiLink = check(response).await?.json().await?;
        updated.into_remote("", 0)
    }

    async fn delete_link(&self, id: &str) -> RemoteResult<()> {
        debug!("DELETE /links/{}", id);
        let response = self
            .http
            .delete(self.endpoint(&format!("/links/{}", id)))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Pass through successful responses, turn the rest into [`RemoteError::Api`]
async fn check(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Best human-readable message from an error response body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["error", "message"] {
            if let Some(msg) = json.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
