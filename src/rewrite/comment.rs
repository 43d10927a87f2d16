//! Trailing version comment maintenance
//!
//! A pinned reference keeps its human-readable version in a comment:
//! `uses: actions/checkout@<sha> # v4.2.2`. Existing comments are kept
//! and only their version word is replaced.

use crate::version::classifier::looks_like_version;

/// Shape of the comment trailing a reference, checked in this order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentShape {
    /// No `#` on the line
    Missing,
    /// `#` followed by nothing but whitespace
    Empty,
    /// First word is a version: `# v4.4.0 checkout`
    LeadingVersion,
    /// First word is `name@version`: `# pin@v4.4.0`
    PinStyle { prefix: String },
    /// A later word is a version: `# release v4.4.0`
    EmbeddedVersion { index: usize },
    /// No version anywhere: `# latest stable`
    FreeText,
}

/// Classify the words of an existing comment
///
/// A word equal to `display_version` counts as a version wherever it sits,
/// so non-numeric display versions are not prepended twice.
pub fn classify_comment(words: &[&str], display_version: &str) -> CommentShape {
    let Some(first) = words.first() else {
        return CommentShape::Empty;
    };

    if *first == display_version || looks_like_version(first) {
        return CommentShape::LeadingVersion;
    }

    if let Some((prefix, _)) = first.split_once('@') {
        return CommentShape::PinStyle {
            prefix: prefix.to_string(),
        };
    }

    let is_version = |word: &&str| *word == display_version || looks_like_version(word);
    match words.iter().skip(1).position(is_version) {
        Some(offset) => CommentShape::EmbeddedVersion { index: offset + 1 },
        None => CommentShape::FreeText,
    }
}

/// Set the version shown in the line's trailing comment to `display_version`
///
/// The code part is right-trimmed and the comment words are re-joined with
/// single spaces: `<code> # <words>`. Applying this twice with the same
/// version gives the same line as applying it once.
pub fn update_version_comment(line: &str, display_version: &str) -> String {
    let (code, comment) = match line.split_once('#') {
        Some((code, comment)) => (code, Some(comment)),
        None => (line, None),
    };
    let code = code.trim_end();

    let words: Vec<&str> = comment
        .map(|c| c.split_whitespace().collect())
        .unwrap_or_default();

    let shape = match comment {
        None => CommentShape::Missing,
        Some(_) => classify_comment(&words, display_version),
    };

    let updated = match shape {
        CommentShape::Missing | CommentShape::Empty => display_version.to_string(),
        CommentShape::LeadingVersion => replace_word(&words, 0, display_version),
        CommentShape::PinStyle { prefix } => {
            replace_word(&words, 0, &format!("{prefix}@{display_version}"))
        }
        CommentShape::EmbeddedVersion { index } => replace_word(&words, index, display_version),
        CommentShape::FreeText => format!("{} {}", display_version, words.join(" ")),
    };

    format!("{code} # {updated}")
}

fn replace_word(words: &[&str], index: usize, replacement: &str) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| if i == index { replacement } else { *word })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], CommentShape::Empty)]
    #[case(&["v4.3.0"], CommentShape::LeadingVersion)]
    #[case(&["4.3.0", "setup"], CommentShape::LeadingVersion)]
    #[case(&["v4"], CommentShape::LeadingVersion)]
    #[case(&["pin@v3.2.0"], CommentShape::PinStyle { prefix: "pin".to_string() })]
    #[case(&["release", "v4.3.0", "notes"], CommentShape::EmbeddedVersion { index: 1 })]
    #[case(&["latest", "stable"], CommentShape::FreeText)]
    #[case(&["very", "stable"], CommentShape::FreeText)]
    fn classify_comment_returns_expected(#[case] words: &[&str], #[case] expected: CommentShape) {
        assert_eq!(classify_comment(words, "v4.4.0"), expected);
    }

    #[test]
    fn classify_comment_treats_display_version_as_leading_version() {
        assert_eq!(
            classify_comment(&["nightly", "build"], "nightly"),
            CommentShape::LeadingVersion
        );
    }

    #[rstest]
    #[case::missing(
        "      - uses: actions/checkout@abc",
        "      - uses: actions/checkout@abc # v4.4.0"
    )]
    #[case::empty(
        "      - uses: actions/checkout@abc #",
        "      - uses: actions/checkout@abc # v4.4.0"
    )]
    #[case::whitespace_only(
        "      - uses: actions/checkout@abc #   ",
        "      - uses: actions/checkout@abc # v4.4.0"
    )]
    #[case::leading_version(
        "      - uses: actions/checkout@abc # v4.3.0",
        "      - uses: actions/checkout@abc # v4.4.0"
    )]
    #[case::leading_version_with_text(
        "      - uses: actions/checkout@abc   # v4.3.0   checkout code",
        "      - uses: actions/checkout@abc # v4.4.0 checkout code"
    )]
    #[case::bare_number(
        "      - uses: actions/checkout@abc # 4.3.0",
        "      - uses: actions/checkout@abc # v4.4.0"
    )]
    #[case::pin_style(
        "      - uses: actions/cache@v3 # pin@v3.2.0",
        "      - uses: actions/cache@v3 # pin@v4.4.0"
    )]
    #[case::pin_style_with_text(
        "      - uses: actions/cache@v3 # pin@v3.2.0 keep this",
        "      - uses: actions/cache@v3 # pin@v4.4.0 keep this"
    )]
    #[case::embedded(
        "      - uses: actions/checkout@abc # checkout v4.3.0 here",
        "      - uses: actions/checkout@abc # checkout v4.4.0 here"
    )]
    #[case::free_text(
        "      - uses: actions/checkout@abc # latest stable",
        "      - uses: actions/checkout@abc # v4.4.0 latest stable"
    )]
    fn update_version_comment_returns_expected(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(update_version_comment(line, "v4.4.0"), expected);
    }

    #[rstest]
    #[case("      - uses: actions/checkout@abc")]
    #[case("      - uses: actions/checkout@abc # v4.3.0 checkout")]
    #[case("      - uses: actions/cache@v3 # pin@v3.2.0")]
    #[case("      - uses: actions/checkout@abc # checkout v4.3.0")]
    #[case("      - uses: actions/checkout@abc # latest stable")]
    fn update_version_comment_is_idempotent(#[case] line: &str) {
        let once = update_version_comment(line, "v4.4.0");
        assert_eq!(update_version_comment(&once, "v4.4.0"), once);
    }

    #[rstest]
    #[case(
        "uses: a/b@abc # release v1.2.0",
        "v2.0.0-rc.1",
        "uses: a/b@abc # release v2.0.0-rc.1"
    )]
    #[case(
        "uses: github/codeql-action/init@abc # codeql v3.24.0",
        "codeql-bundle-v2.16.0",
        "uses: github/codeql-action/init@abc # codeql codeql-bundle-v2.16.0"
    )]
    fn update_version_comment_is_idempotent_for_embedded_non_numeric_version(
        #[case] line: &str,
        #[case] display_version: &str,
        #[case] expected: &str,
    ) {
        let once = update_version_comment(line, display_version);
        assert_eq!(once, expected);
        assert_eq!(update_version_comment(&once, display_version), once);
    }

    #[test]
    fn classify_comment_finds_display_version_in_later_word() {
        assert_eq!(
            classify_comment(&["release", "v2.0.0-rc.1"], "v2.0.0-rc.1"),
            CommentShape::EmbeddedVersion { index: 1 }
        );
    }

    #[test]
    fn update_version_comment_is_idempotent_for_non_numeric_display_version() {
        let once = update_version_comment("uses: a/b@abc # latest stable", "nightly");
        assert_eq!(once, "uses: a/b@abc # nightly latest stable");
        assert_eq!(update_version_comment(&once, "nightly"), once);
    }
}
