//! Line-oriented rewrite of action references
//!
//! Edits the original text instead of re-serializing YAML, so indentation,
//! quoting, blank lines, and unrelated comments survive untouched.

use std::borrow::Cow;

use crate::rewrite::comment::update_version_comment;
use crate::version::classifier::FLOATING_BRANCH;

/// What a matched reference is rewritten to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTarget {
    /// Version tag used when not pinning to a SHA
    pub version: String,
    /// Commit SHA to pin to; empty to write `version` instead
    pub sha: String,
    /// Version shown in the trailing comment
    pub display_version: String,
}

impl RewriteTarget {
    /// Pin to `sha`, annotating the line with `display_version`
    pub fn pin(sha: impl Into<String>, display_version: impl Into<String>) -> Self {
        let display_version = display_version.into();
        Self {
            version: display_version.clone(),
            sha: sha.into(),
            display_version,
        }
    }

    /// Move to the `version` tag, annotating the line with `display_version`
    pub fn tag(version: impl Into<String>, display_version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sha: String::new(),
            display_version: display_version.into(),
        }
    }

    /// Text written after `@`
    pub fn reference_version(&self) -> &str {
        if self.sha.is_empty() {
            &self.version
        } else {
            &self.sha
        }
    }
}

/// Rewrite every line referencing `action_name@current_version`
///
/// On each matching line the first reference is replaced and the trailing
/// comment is set to the target's display version. Other lines are returned
/// byte for byte. `main` references are never rewritten.
pub fn rewrite(
    document: &str,
    action_name: &str,
    current_version: &str,
    target: &RewriteTarget,
) -> String {
    if action_name.is_empty() || current_version.is_empty() || current_version == FLOATING_BRANCH
    {
        return document.to_string();
    }

    let needle = format!("{action_name}@{current_version}");
    let replacement = format!("{action_name}@{}", target.reference_version());

    document
        .split('\n')
        .map(|line| rewrite_line(line, &needle, &replacement, &target.display_version))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_line<'a>(
    line: &'a str,
    needle: &str,
    replacement: &str,
    display_version: &str,
) -> Cow<'a, str> {
    let (body, line_ending) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };

    // Only the code part counts; a reference inside a comment is left alone
    let code = body.split('#').next().unwrap_or_default();
    let Some(start) = find_reference(code, needle) else {
        return Cow::Borrowed(line);
    };

    let substituted = format!(
        "{}{}{}",
        &body[..start],
        replacement,
        &body[start + needle.len()..]
    );

    Cow::Owned(format!(
        "{}{}",
        update_version_comment(&substituted, display_version),
        line_ending
    ))
}

/// Byte offset of the first `needle` that stands alone as a reference
fn find_reference(code: &str, needle: &str) -> Option<usize> {
    code.match_indices(needle).map(|(start, _)| start).find(|&start| {
        let before = code[..start].chars().next_back();
        let after = code[start + needle.len()..].chars().next();
        !before.is_some_and(is_name_char) && !after.is_some_and(is_version_char)
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/')
}
