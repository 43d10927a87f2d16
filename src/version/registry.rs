//! Release lookup trait for fetching the latest release of an action

#[cfg(test)]
use mockall::automock;

use crate::parser::types::ActionIdentity;
use crate::version::classifier::is_commit_sha;
use crate::version::error::LookupError;

/// Latest published release of an action repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// Release tag (e.g. "v4.2.2")
    pub tag_name: String,
    /// Branch name or commit SHA the release was cut from
    pub target_commitish: String,
}

impl LatestRelease {
    /// Commit SHA carried by the release itself, when the release
    /// targets a commit rather than a branch
    pub fn commit_sha(&self) -> Option<&str> {
        is_commit_sha(&self.target_commitish).then_some(self.target_commitish.as_str())
    }
}

/// Trait for looking up releases on the source-control host
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseLookup: Send + Sync {
    /// Fetches the latest release of a repository
    ///
    /// # Returns
    /// * `Ok(Some(LatestRelease))` - The latest release
    /// * `Ok(None)` - The repository does not exist or has no releases
    /// * `Err(LookupError)` - Transport, auth, or rate-limit failure
    async fn fetch_latest_release(
        &self,
        identity: &ActionIdentity,
    ) -> Result<Option<LatestRelease>, LookupError>;

    /// Fetches the commit SHA a tag ref points at
    async fn fetch_tag_sha(&self, identity: &ActionIdentity, tag: &str)
    -> Result<String, LookupError>;
}
