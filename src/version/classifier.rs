//! Version token classification
//!
//! A `uses:` reference carries one of three kinds of version token:
//! - a commit SHA (`8e5e7e5ab8b370d6c329ec480221332ada57f0ab`)
//! - a major constraint (`v4`, `4`)
//! - a full semantic version (`v4.1.0`, `4.1`)
//!
//! `main` is a floating branch and is never classified further.

/// Version token used by workflows that track the default branch
pub const FLOATING_BRANCH: &str = "main";

const COMMIT_SHA_LEN: usize = 40;

/// Kind of version token found after `@` in an action reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    FloatingBranch,
    CommitSha,
    MajorConstraint,
    SemanticVersion,
    /// Any other tag name (e.g. `v1.2.3-rc.1`, `release-2024.01`)
    Other,
}

/// Classify a version token. The commit SHA check takes priority over
/// the constraint and semver shapes.
pub fn classify(token: &str) -> VersionKind {
    if token == FLOATING_BRANCH {
        VersionKind::FloatingBranch
    } else if is_commit_sha(token) {
        VersionKind::CommitSha
    } else if is_major_constraint(token) {
        VersionKind::MajorConstraint
    } else if is_semantic_version(token) {
        VersionKind::SemanticVersion
    } else {
        VersionKind::Other
    }
}

/// Returns true for exactly 40 hex digits (either case)
pub fn is_commit_sha(token: &str) -> bool {
    token.len() == COMMIT_SHA_LEN && token.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns true for tokens naming only a major line, e.g. `v4` or `4`
pub fn is_major_constraint(token: &str) -> bool {
    if token.is_empty() || is_commit_sha(token) {
        return false;
    }
    !strip_v(token).contains('.')
}

/// Returns true for dotted numeric versions, e.g. `v4.1.0` or `4.1`
pub fn is_semantic_version(token: &str) -> bool {
    let rest = strip_v(token);
    rest.contains('.') && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Extract the major component, keeping a `v` prefix if present
///
/// - "v3.5.0" -> "v3"
/// - "4.2" -> "4"
/// - "v4" -> "v4"
pub fn extract_major_version(token: &str) -> String {
    let rest = strip_v(token);
    let major = rest.split('.').next().unwrap_or_default();

    if token.starts_with('v') {
        format!("v{major}")
    } else {
        major.to_string()
    }
}

/// Returns true for words that read as a version annotation in a comment:
/// a bare number (`4`), a dotted number (`4.4.0`), either with a `v` prefix.
pub fn looks_like_version(word: &str) -> bool {
    let rest = strip_v(word);
    rest.starts_with(|c: char| c.is_ascii_digit())
        && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn strip_v(token: &str) -> &str {
    token.strip_prefix('v').unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SHA: &str = "cdca7365b2dadb8aad0a33bc7601856ffabcc48e";

    #[rstest]
    #[case(SHA, true)]
    #[case("CDCA7365B2DADB8AAD0A33BC7601856FFABCC48E", true)]
    #[case("cdca7365b2dadb8aad0a33bc7601856ffabcc48", false)] // 39 chars
    #[case("cdca7365b2dadb8aad0a33bc7601856ffabcc48e0", false)] // 41 chars
    #[case("cdca7365b2dadb8aad0a33bc7601856ffabcc48g", false)] // one non-hex
    #[case("", false)]
    #[case("v4", false)]
    fn is_commit_sha_returns_expected(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_commit_sha(token), expected);
    }

    #[rstest]
    #[case("v4", true)]
    #[case("4", true)]
    #[case("v12", true)]
    #[case("v4.3", false)]
    #[case("4.3.0", false)]
    #[case("", false)]
    #[case("1234567890123456789012345678901234567890", false)] // sha wins
    fn is_major_constraint_returns_expected(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_major_constraint(token), expected);
    }

    #[rstest]
    #[case("v4.4.0", true)]
    #[case("4.2", true)]
    #[case("v4", false)]
    #[case("v4.1.0-beta", false)]
    #[case("release.1", false)]
    fn is_semantic_version_returns_expected(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_semantic_version(token), expected);
    }

    #[rstest]
    #[case("v3.5.0", "v3")]
    #[case("4.2", "4")]
    #[case("", "")]
    #[case("v4", "v4")]
    #[case("10.0.1", "10")]
    fn extract_major_version_returns_expected(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(extract_major_version(token), expected);
    }

    #[test]
    fn extract_major_version_is_idempotent() {
        let once = extract_major_version("v7.1.2");
        assert_eq!(extract_major_version(&once), once);
    }

    #[rstest]
    #[case("main", VersionKind::FloatingBranch)]
    #[case(SHA, VersionKind::CommitSha)]
    #[case("v4", VersionKind::MajorConstraint)]
    #[case("v4.4.0", VersionKind::SemanticVersion)]
    #[case("v1.2.3-rc.1", VersionKind::Other)]
    fn classify_returns_expected(#[case] token: &str, #[case] expected: VersionKind) {
        assert_eq!(classify(token), expected);
    }

    #[rstest]
    #[case("v4.4.0", true)]
    #[case("4.4.0", true)]
    #[case("v4", true)]
    #[case("4", true)]
    #[case("very", false)]
    #[case("v", false)]
    #[case("pin@v4", false)]
    #[case(".1", false)]
    fn looks_like_version_returns_expected(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(looks_like_version(word), expected);
    }
}
