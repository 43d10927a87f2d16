//! Dry-run unified diff rendering

use std::path::Path;

use similar::TextDiff;

/// Render a unified diff between the original and rewritten document
pub fn unified_diff(path: &Path, original: &str, updated: &str) -> String {
    let old_header = format!("a/{}", path.display());
    let new_header = format!("b/{}", path.display());

    TextDiff::from_lines(original, updated)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string()
}
