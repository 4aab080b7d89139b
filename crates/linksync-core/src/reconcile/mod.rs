//! Reconciliation engine
//!
//! ```text
//! LinkConfig ──flatten──▶ desired ─┐
//!                                  ├─ diff_links ─▶ LinkDiff ─ apply_diff ─▶ SyncResult
//! LinkService::list_links ▶ actual ┘
//! ```
//!
//! - `diff`: remote snapshot fetch and classification
//! - `executor`: per-entry application with dry-run support
//! - `normalize`: title/tag equivalence rules
//! - `summary`: end-of-run text

pub mod diff;
pub mod executor;
pub mod normalize;
pub mod summary;

pub use diff::{compute_diff, diff_links, link_matches, LinkDiff, LinkUpdate};
pub use executor::{
    apply_diff, create_payload, update_payload, ApplyOptions, SyncResult, DEFAULT_CONCURRENCY,
};
pub use normalize::{normalize_tags, normalize_title, tags_equal, titles_equal};
pub use summary::render_summary;
