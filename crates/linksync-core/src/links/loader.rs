//! Links file loading and validation
//!
//! A links file is a YAML stream. Each document declares one domain:
//!
//! ```yaml
//! domain: s.io
//! links:
//!   promo:
//!     url: https://example.com/spring
//!     title: Spring promo
//!     tags: [marketing]
//! ---
//! domain: go.example.com
//! links:
//!   docs:
//!     url: https://docs.example.com
//! ```
//!
//! Validation stops at the first problem. Duplicate detection spans the
//! whole stream, so the same `domain/slug` in two documents is rejected.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;
use url::Url;

use super::error::{ConfigError, ConfigResult};
use super::models::{link_key, LinkConfig, LinkDocument, LinkEntry, LinkSpec};

/// Keys used in a links document
mod keys {
    pub const DOMAIN: &str = "domain";
    pub const LINKS: &str = "links";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const TAGS: &str = "tags";
}

/// Load and validate a links file from disk
pub fn load_links(path: impl AsRef<Path>) -> ConfigResult<LinkConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::ConfigRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!("Loaded links file {:?} ({} bytes)", path, source.len());
    parse_links(&source)
}

/// Parse and validate a links YAML stream
pub fn parse_links(source: &str) -> ConfigResult<LinkConfig> {
    // serde_yaml yields one null document for a blank stream
    if is_blank_stream(source) {
        return Err(ConfigError::ConfigEmpty);
    }

    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(source).enumerate() {
        let number = index + 1;
        let value =
            Value::deserialize(document).map_err(|e| ConfigError::ConfigParseError {
                document: number,
                message: e.to_string(),
            })?;

        documents.push(validate_document(number, &value, &mut seen)?);
    }

    if documents.is_empty() {
        return Err(ConfigError::ConfigEmpty);
    }

    debug!(
        "Validated {} document(s) with {} link(s)",
        documents.len(),
        seen.len()
    );

    Ok(LinkConfig { documents })
}

/// True when the source holds nothing but whitespace and comments
fn is_blank_stream(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Validate one document, recording its link keys in `seen`
fn validate_document(
    document: usize,
    value: &Value,
    seen: &mut HashSet<String>,
) -> ConfigResult<LinkDocument> {
    let Value::Mapping(map) = value else {
        return Err(ConfigError::DocumentNotObject { document });
    };

    let domain = match map.get(keys::DOMAIN) {
        Some(Value::String(domain)) if !domain.trim().is_empty() => domain.clone(),
        _ => return Err(ConfigError::MissingDomain { document }),
    };

    // A sequence here is the old list-of-links layout
    let Some(Value::Mapping(raw_links)) = map.get(keys::LINKS) else {
        return Err(ConfigError::MissingLinksMap { document });
    };

    let mut links = Vec::with_capacity(raw_links.len());

    for (raw_slug, raw_spec) in raw_links {
        let slug = match slug_text(raw_slug) {
            Some(slug) if !slug.trim().is_empty() => slug,
            _ => return Err(ConfigError::EmptySlug { document }),
        };

        let key = link_key(&domain, &slug);
        if !seen.insert(key.clone()) {
            return Err(ConfigError::DuplicateLink { document, key });
        }

        let spec = validate_spec(document, &slug, raw_spec)?;
        links.push(LinkEntry { slug, spec });
    }

    Ok(LinkDocument { domain, links })
}

/// Validate the body of a single link entry
fn validate_spec(document: usize, slug: &str, value: &Value) -> ConfigResult<LinkSpec> {
    let Value::Mapping(map) = value else {
        return Err(ConfigError::LinkNotObject {
            document,
            slug: slug.to_string(),
        });
    };

    let url = match map.get(keys::URL) {
        Some(Value::String(url)) if !url.trim().is_empty() => url.clone(),
        _ => {
            return Err(ConfigError::MissingUrl {
                document,
                slug: slug.to_string(),
            })
        }
    };

    if !is_absolute_url(&url) {
        return Err(ConfigError::InvalidUrl {
            document,
            slug: slug.to_string(),
            url,
        });
    }

    let title = optional_title(document, slug, map)?;
    let tags = optional_tags(document, slug, map)?;

    Ok(LinkSpec { url, title, tags })
}

fn optional_title(document: usize, slug: &str, map: &Mapping) -> ConfigResult<Option<String>> {
    match map.get(keys::TITLE) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(title)) => Ok(Some(title.clone())),
        Some(_) => Err(ConfigError::InvalidTitleType {
            document,
            slug: slug.to_string(),
        }),
    }
}

fn optional_tags(document: usize, slug: &str, map: &Mapping) -> ConfigResult<Option<Vec<String>>> {
    let items = match map.get(keys::TAGS) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Sequence(items)) => items,
        Some(_) => {
            return Err(ConfigError::InvalidTagsType {
                document,
                slug: slug.to_string(),
            })
        }
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag.clone()),
            _ => Err(ConfigError::InvalidTagType {
                document,
                slug: slug.to_string(),
            }),
        })
        .collect::<ConfigResult<Vec<_>>>()
        .map(Some)
}

/// Text form of a mapping key; `None` for keys with no sensible text
fn slug_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// True when `url` has both a scheme and a host
fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).map(|u| u.has_host()).unwrap_or(false)
}
