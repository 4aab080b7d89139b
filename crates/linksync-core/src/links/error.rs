//! Link definition errors
//!
//! Every failure carries the 1-based document index and, where one exists,
//! the offending slug so the message points straight at the YAML to fix.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and validating a links file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The links file does not exist
    #[error("Links file not found: '{path}'")]
    ConfigNotFound { path: PathBuf },

    /// The links file exists but could not be read
    #[error("Failed to read links file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source contains no YAML documents at all
    #[error("Links file is empty: expected at least one YAML document")]
    ConfigEmpty,

    /// A document is not well-formed YAML
    #[error("Document {document}: YAML parse error: {message}")]
    ConfigParseError { document: usize, message: String },

    #[error("Document {document}: expected a mapping with 'domain' and 'links'")]
    DocumentNotObject { document: usize },

    #[error("Document {document}: 'domain' is required and must be a non-empty string")]
    MissingDomain { document: usize },

    /// `links` is missing, not a mapping, or uses the legacy list format
    #[error("Document {document}: 'links' must be a mapping of slug to link definition")]
    MissingLinksMap { document: usize },

    #[error("Document {document}: link slug must not be empty")]
    EmptySlug { document: usize },

    /// The same `domain/slug` was declared twice anywhere in the source
    #[error("Document {document}: duplicate link '{key}'")]
    DuplicateLink { document: usize, key: String },

    #[error("Document {document}: link '{slug}' must be a mapping")]
    LinkNotObject { document: usize, slug: String },

    #[error("Document {document}: link '{slug}' is missing a 'url'")]
    MissingUrl { document: usize, slug: String },

    #[error("Document {document}: link '{slug}' has an invalid url '{url}'")]
    InvalidUrl {
        document: usize,
        slug: String,
        url: String,
    },

    #[error("Document {document}: link '{slug}' has a non-string 'title'")]
    InvalidTitleType { document: usize, slug: String },

    #[error("Document {document}: link '{slug}' has 'tags' that is not a list")]
    InvalidTagsType { document: usize, slug: String },

    #[error("Document {document}: link '{slug}' has a tag that is not a string")]
    InvalidTagType { document: usize, slug: String },
}

impl ConfigError {
    /// The 1-based document index the error refers to, if any
    pub fn document(&self) -> Option<usize> {
        match self {
            ConfigError::ConfigNotFound { .. }
            | ConfigError::ConfigRead { .. }
            | ConfigError::ConfigEmpty => None,
            ConfigError::ConfigParseError { document, .. }
            | ConfigError::DocumentNotObject { document }
            | ConfigError::MissingDomain { document }
            | ConfigError::MissingLinksMap { document }
            | ConfigError::EmptySlug { document }
            | ConfigError::DuplicateLink { document, .. }
            | ConfigError::LinkNotObject { document, .. }
            | ConfigError::MissingUrl { document, .. }
            | ConfigError::InvalidUrl { document, .. }
            | ConfigError::InvalidTitleType { document, .. }
            | ConfigError::InvalidTagsType { document, .. }
            | ConfigError::InvalidTagType { document, .. } => Some(*document),
        }
    }

    /// The slug the error refers to, if any
    pub fn slug(&self) -> Option<&str> {
        match self {
            ConfigError::LinkNotObject { slug, .. }
            | ConfigError::MissingUrl { slug, .. }
            | ConfigError::InvalidUrl { slug, .. }
            | ConfigError::InvalidTitleType { slug, .. }
            | ConfigError::InvalidTagsType { slug, .. }
            | ConfigError::InvalidTagType { slug, .. } => Some(slug),
            ConfigError::DuplicateLink { key, .. } => key.split_once('/').map(|(_, slug)| slug),
            _ => None,
        }
    }
}

/// Result type for link definition loading
pub type ConfigResult<T> = Result<T, ConfigError>;
