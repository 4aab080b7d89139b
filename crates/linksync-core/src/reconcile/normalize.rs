//! Optional-field normalization
//!
//! An absent title and an empty title mean the same thing, and so do absent
//! tags and an empty tag list. Every comparison between desired and remote
//! state goes through these helpers.

use std::collections::BTreeSet;

/// Title with absence mapped to the empty string
pub fn normalize_title(title: Option<&str>) -> &str {
    title.unwrap_or("")
}

/// Tags as an unordered set, absence mapped to the empty set
pub fn normalize_tags(tags: Option<&[String]>) -> BTreeSet<&str> {
    tags.unwrap_or_default().iter().map(String::as_str).collect()
}

/// Compare two optional titles after normalization
pub fn titles_equal(a: Option<&str>, b: Option<&str>) -> bool {
    normalize_title(a) == normalize_title(b)
}

/// Compare two optional tag lists as sets after normalization
pub fn tags_equal(a: Option<&[String]>, b: Option<&[String]>) -> bool {
    normalize_tags(a) == normalize_tags(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn some(tags: &[String]) -> Option<&[String]> {
        Some(tags)
    }

    #[test]
    fn test_absent_and_empty_title_equal() {
        assert!(titles_equal(None, Some("")));
        assert!(titles_equal(Some(""), None));
        assert!(titles_equal(None, None));
        assert!(!titles_equal(None, Some("Old")));
    }

    #[test]
    fn test_absent_and_empty_tags_equal() {
        let empty = tags(&[]);
        assert!(tags_equal(None, some(&empty)));
        assert!(tags_equal(some(&empty), None));
        assert!(!tags_equal(None, some(&tags(&["a"]))));
    }

    #[test]
    fn test_tags_order_insensitive() {
        let ab = tags(&["a", "b"]);
        let ba = tags(&["b", "a"]);
        assert!(tags_equal(some(&ab), some(&ba)));
        assert!(!tags_equal(some(&ab), some(&tags(&["a", "c"]))));
    }
}
