//! Release resolution with cache
//!
//! Maps an action and its current version token to the version and
//! commit SHA it should move to. The cache is consulted first; a miss
//! costs at most two lookups (latest release, then the tag ref).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::parser::types::ActionIdentity;
use crate::version::cache::{ReleaseCache, ReleaseInfo};
use crate::version::classifier::{extract_major_version, is_major_constraint};
use crate::version::error::{LookupError, ResolveError};
use crate::version::registry::ReleaseLookup;

/// Target an action reference should move to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Version to surface (full release version, or the caller's own token on a no-op)
    pub version: String,
    /// Commit SHA of the release; empty on a no-op
    pub sha: String,
    /// The caller's major constraint already tracks the latest major line
    pub is_noop: bool,
}

impl ResolvedRelease {
    fn noop(current_version: &str) -> Self {
        Self {
            version: current_version.to_string(),
            sha: String::new(),
            is_noop: true,
        }
    }

    fn from_info(info: &ReleaseInfo) -> Self {
        Self {
            version: info.full_version.clone(),
            sha: info.commit_sha.clone(),
            is_noop: false,
        }
    }
}

/// Resolves the latest release of actions, sharing one cache across calls
#[derive(Clone)]
pub struct ReleaseResolver {
    lookup: Arc<dyn ReleaseLookup>,
    cache: Arc<ReleaseCache>,
}

impl ReleaseResolver {
    pub fn new(lookup: Arc<dyn ReleaseLookup>, cache: Arc<ReleaseCache>) -> Self {
        Self { lookup, cache }
    }

    pub fn cache(&self) -> &Arc<ReleaseCache> {
        &self.cache
    }

    /// Resolve the release `identity` should move to from `current_version`
    ///
    /// Callers must filter out the `main` floating branch beforehand.
    ///
    /// # Returns
    /// * `Ok(Some(ResolvedRelease))` - Target version and SHA, or a no-op
    /// * `Ok(None)` - The repository has no published release
    /// * `Err(ResolveError)` - The lookup failed
    pub async fn resolve(
        &self,
        identity: &ActionIdentity,
        current_version: &str,
    ) -> Result<Option<ResolvedRelease>, ResolveError> {
        if let Some(info) = self.cache.get(identity) {
            if is_major_constraint(current_version)
                && extract_major_version(current_version) == info.major_version
            {
                debug!(
                    "Keeping {}@{}: major constraint matches latest major {}",
                    identity, current_version, info.major_version
                );
                return Ok(Some(ResolvedRelease::noop(current_version)));
            }

            debug!("Using cached release for {}: {}", identity, info.full_version);
            return Ok(Some(ResolvedRelease::from_info(&info)));
        }

        let Some(release) = self
            .lookup
            .fetch_latest_release(identity)
            .await
            .map_err(|source| lookup_failed(identity, source))?
        else {
            debug!("No release published for {}", identity);
            return Ok(None);
        };

        let sha = match release.commit_sha() {
            Some(sha) => sha.to_string(),
            None => match self.lookup.fetch_tag_sha(identity, &release.tag_name).await {
                Ok(sha) => sha,
                Err(e) => {
                    warn!(
                        "Failed to resolve tag {} for {}, falling back to release target {}: {}",
                        release.tag_name, identity, release.target_commitish, e
                    );
                    release.target_commitish.clone()
                }
            },
        };

        let info = ReleaseInfo::new(release.tag_name, sha);
        self.cache.put(identity, info.clone());

        Ok(Some(ResolvedRelease::from_info(&info)))
    }

    /// Resolve the commit SHA of a specific tag, bypassing the release cache
    ///
    /// Returns `Ok(None)` when the tag does not exist.
    pub async fn resolve_tag(
        &self,
        identity: &ActionIdentity,
        tag: &str,
    ) -> Result<Option<String>, ResolveError> {
        match self.lookup.fetch_tag_sha(identity, tag).await {
            Ok(sha) => Ok(Some(sha)),
            Err(LookupError::NotFound(_)) => {
                debug!("Tag {} not found for {}", tag, identity);
                Ok(None)
            }
            Err(source) => Err(lookup_failed(identity, source)),
        }
    }
}

fn lookup_failed(identity: &ActionIdentity, source: LookupError) -> ResolveError {
    ResolveError::Lookup {
        action: identity.to_string(),
        source,
    }
}
