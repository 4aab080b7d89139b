//! Desired-state models
//!
//! A links file is a stream of YAML documents, one per domain block.
//! These types hold the validated form of that stream.

use serde::Serialize;

/// Build the identity key of a link: `domain/slug`
pub fn link_key(domain: &str, slug: &str) -> String {
    format!("{}/{}", domain, slug)
}

/// A fully validated links file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkConfig {
    /// Documents in source order
    pub documents: Vec<LinkDocument>,
}

impl LinkConfig {
    /// Total number of links across all documents
    pub fn link_count(&self) -> usize {
        self.documents.iter().map(|d| d.links.len()).sum()
    }
}

/// One YAML document: a domain and the links it serves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkDocument {
    pub domain: String,
    /// Slug to definition, in source key order
    pub links: Vec<LinkEntry>,
}

/// A single `slug: { ... }` entry of a document's `links` mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEntry {
    pub slug: String,
    pub spec: LinkSpec,
}

/// The declared shape of one short link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSpec {
    /// Destination URL (absolute)
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl LinkSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            tags: None,
        }
    }
}

/// A desired link with its domain attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatLink {
    pub slug: String,
    pub url: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl FlatLink {
    /// Create a link with only the required fields set
    pub fn new(domain: impl Into<String>, slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
            domain: domain.into(),
            title: None,
            tags: None,
        }
    }

    /// Identity key, unique within a links file
    pub fn key(&self) -> String {
        link_key(&self.domain, &self.slug)
    }
}
