//! Common types for action references

use std::fmt;

use crate::version::classifier::FLOATING_BRANCH;

/// A raw `uses:` value found in a workflow or composite action file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsesValue {
    /// Value text with surrounding quotes removed (e.g. "actions/checkout@v4")
    pub value: String,
    /// Line number (0-indexed)
    pub line: usize,
}

/// Repository an action is released from (`owner/repo`)
///
/// Sub-paths are dropped, so `actions/cache/save` and `actions/cache/restore`
/// share the identity `actions/cache`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionIdentity {
    pub owner: String,
    pub repo: String,
}

impl ActionIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Derive the identity from an action name, or None if the name
    /// has no `owner/repo` part (e.g. a local `./action` path)
    pub fn from_action_name(name: &str) -> Option<Self> {
        let mut parts = name.splitn(3, '/');
        let owner = parts.next().filter(|s| !s.is_empty())?;
        let repo = parts.next().filter(|s| !s.is_empty())?;
        if owner == "." || owner == ".." {
            return None;
        }
        Some(Self::new(owner, repo))
    }

    /// Canonical `owner/repo` form, used as the release cache key
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for ActionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Why a `uses:` value is not a versionable reference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// The value does not split into exactly `name@version`
    #[error("Malformed reference: {0}")]
    Malformed(String),

    /// The reference tracks the `main` branch and is skipped
    #[error("Floating branch reference: {0}")]
    FloatingBranch(String),
}

/// An `owner/repo[/path]@version` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionReference {
    /// Full action name including any sub-path (e.g. "actions/cache/save")
    pub name: String,
    /// Version token after `@`
    pub version: String,
}

impl ActionReference {
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        let parts: Vec<&str> = raw.split('@').collect();
        let [name, version] = parts.as_slice() else {
            return Err(ReferenceError::Malformed(raw.to_string()));
        };

        if *version == FLOATING_BRANCH {
            return Err(ReferenceError::FloatingBranch(raw.to_string()));
        }

        Ok(Self {
            name: name.trim().to_string(),
            version: version.to_string(),
        })
    }

    pub fn identity(&self) -> Option<ActionIdentity> {
        ActionIdentity::from_action_name(&self.name)
    }
}
