//! Flat views over a validated links file

use std::collections::HashSet;

use super::models::{FlatLink, LinkConfig};

/// Flatten every document into one list, in document then key order
pub fn flatten_links(config: &LinkConfig) -> Vec<FlatLink> {
    config
        .documents
        .iter()
        .flat_map(|doc| {
            doc.links.iter().map(move |entry| FlatLink {
                slug: entry.slug.clone(),
                url: entry.spec.url.clone(),
                domain: doc.domain.clone(),
                title: entry.spec.title.clone(),
                tags: entry.spec.tags.clone(),
            })
        })
        .collect()
}

/// Distinct domains of a list of links, in first-appearance order
pub fn distinct_domains<'a>(links: impl IntoIterator<Item = &'a FlatLink>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    for link in links {
        if seen.insert(link.domain.clone()) {
            domains.push(link.domain.clone());
        }
    }
    domains
}

/// Distinct domains declared by a links file, in first-appearance order
pub fn domains(config: &LinkConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    for doc in &config.documents {
        if seen.insert(doc.domain.clone()) {
            domains.push(doc.domain.clone());
        }
    }
    domains
}
