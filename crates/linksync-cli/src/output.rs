//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use linksync_core::links::{domains, LinkConfig};
use linksync_core::reconcile::{tags_equal, titles_equal};
use linksync_core::{render_summary, LinkDiff, LinkUpdate, SyncResult};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the planned operations of a diff
    pub fn print_diff(&self, diff: &LinkDiff) {
        match self.format {
            OutputFormat::Human => {
                if diff.is_empty() {
                    println!("Remote links already match. Nothing to do.");
                    return;
                }
                for link in &diff.to_create {
                    println!("+ {} -> {}", link.key(), link.url);
                }
                for update in &diff.to_update {
                    println!(
                        "~ {} ({})",
                        update.desired.key(),
                        changed_fields(update).join(", ")
                    );
                }
                for link in &diff.to_delete {
                    println!("- {}/{} ({})", link.domain, link.path, link.original_url);
                }
                println!(
                    "\n{} to create, {} to update, {} to delete",
                    diff.to_create.len(),
                    diff.to_update.len(),
                    diff.to_delete.len()
                );
            }
            OutputFormat::Json => print_json(diff),
            OutputFormat::Quiet => {
                for link in &diff.to_create {
                    println!("+{}", link.key());
                }
                for update in &diff.to_update {
                    println!("~{}", update.desired.key());
                }
                for link in &diff.to_delete {
                    println!("-{}/{}", link.domain, link.path);
                }
            }
        }
    }

    /// Print the outcome of a sync run
    pub fn print_sync_result(&self, result: &SyncResult, dry_run: bool) {
        match self.format {
            OutputFormat::Human => {
                if result.has_errors() {
                    for error in &result.errors {
                        eprintln!("✗ {}", error);
                    }
                    println!();
                }
                print!("{}", render_summary(result, dry_run));
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "dry_run": dry_run,
                "created": result.created,
                "updated": result.updated,
                "deleted": result.deleted,
                "errors": result.errors,
            })),
            OutputFormat::Quiet => {
                for error in &result.errors {
                    eprintln!("{}", error);
                }
            }
        }
    }

    /// Print a report for a links file that passed validation
    pub fn print_validation(&self, path: &str, config: &LinkConfig) {
        let domains = domains(config);
        match self.format {
            OutputFormat::Human => {
                println!("✓ {} is valid", path);
                println!("  Documents: {}", config.documents.len());
                println!("  Links:     {}", config.link_count());
                println!("  Domains:   {}", domains.join(", "));
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "valid": true,
                "file": path,
                "documents": config.documents.len(),
                "links": config.link_count(),
                "domains": domains,
            })),
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    ///
    /// Progress lines go to stderr in JSON mode so stdout stays parseable.
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => eprintln!("{}", msg),
            OutputFormat::Quiet => {}
        }
    }
}

/// Names of the fields that differ between desired and remote
fn changed_fields(update: &LinkUpdate) -> Vec<&'static str> {
    let desired = &update.desired;
    let existing = &update.existing;
    let mut fields = Vec::new();

    if desired.url != existing.original_url {
        fields.push("url");
    }
    if !titles_equal(desired.title.as_deref(), existing.title.as_deref()) {
        fields.push("title");
    }
    if !tags_equal(desired.tags.as_deref(), existing.tags.as_deref()) {
        fields.push("tags");
    }
    fields
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linksync_core::{FlatLink, RemoteLink};

    fn update(desired: FlatLink, existing_url: &str, title: Option<&str>) -> LinkUpdate {
        LinkUpdate {
            existing: RemoteLink {
                id: "1".to_string(),
                original_url: existing_url.to_string(),
                path: desired.slug.clone(),
                domain: desired.domain.clone(),
                domain_id: 1,
                title: title.map(str::to_string),
                tags: None,
            },
            desired,
        }
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_changed_fields_url_only() {
        let change = update(
            FlatLink::new("s.io", "a", "https://new.com"),
            "https://old.com",
            None,
        );
        assert_eq!(changed_fields(&change), vec!["url"]);
    }

    #[test]
    fn test_changed_fields_title_and_tags() {
        let mut desired = FlatLink::new("s.io", "a", "https://a.com");
        desired.tags = Some(vec!["x".to_string()]);
        let change = update(desired, "https://a.com", Some("Old"));

        assert_eq!(changed_fields(&change), vec!["title", "tags"]);
    }
}
