//! In-memory release cache shared by all resolutions in a run

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::parser::types::ActionIdentity;
use crate::version::classifier::extract_major_version;

/// Most recently observed release of an action repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Major line of the release (e.g. "v3")
    pub major_version: String,
    /// Release tag (e.g. "v3.5.0")
    pub full_version: String,
    /// Commit SHA the release tag points at
    pub commit_sha: String,
}

impl ReleaseInfo {
    pub fn new(full_version: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        let full_version = full_version.into();
        Self {
            major_version: extract_major_version(&full_version),
            full_version,
            commit_sha: commit_sha.into(),
        }
    }
}

/// Release cache keyed by `owner/repo`
///
/// Reads run concurrently; a write excludes everything else for the
/// duration of one insert. Entries are replaced wholesale and never removed.
#[derive(Debug, Default)]
pub struct ReleaseCache {
    entries: RwLock<HashMap<String, ReleaseInfo>>,
}

impl ReleaseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &ActionIdentity) -> Option<ReleaseInfo> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&identity.key()).cloned()
    }

    /// Store `info`, replacing any existing entry (last writer wins)
    pub fn put(&self, identity: &ActionIdentity, info: ReleaseInfo) {
        debug!(
            "Caching release for {}: {} ({}) at {}",
            identity, info.full_version, info.major_version, info.commit_sha
        );
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(identity.key(), info);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
