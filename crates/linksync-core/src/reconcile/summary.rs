//! Human-readable sync summary

use std::fmt::Write;

use super::executor::SyncResult;

/// Render the end-of-run summary
///
/// ```text
/// [DRY RUN] Sync summary
///   Created: 2
///   Updated: 0
///   Deleted: 1
/// ```
///
/// An `Errors:` line follows only when something failed.
pub fn render_summary(result: &SyncResult, dry_run: bool) -> String {
    let mut out = String::new();

    if dry_run {
        out.push_str("[DRY RUN] ");
    }
    out.push_str("Sync summary\n");

    // Writing to a String cannot fail
    let _ = writeln!(out, "  Created: {}", result.created);
    let _ = writeln!(out, "  Updated: {}", result.updated);
    let _ = writeln!(out, "  Deleted: {}", result.deleted);

    if !result.errors.is_empty() {
        let _ = writeln!(out, "  Errors:  {}", result.errors.len());
    }

    out
}
