//! Release lookup test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use actions_pin::parser::github_actions::GitHubActionsParser;
use actions_pin::parser::types::ActionIdentity;
use actions_pin::processor::Processor;
use actions_pin::version::cache::ReleaseCache;
use actions_pin::version::error::LookupError;
use actions_pin::version::registry::{LatestRelease, ReleaseLookup};
use actions_pin::version::resolver::ReleaseResolver;

/// In-memory release host keyed by `owner/repo`
#[derive(Default)]
pub struct MockLookup {
    releases: HashMap<String, LatestRelease>,
    tags: HashMap<(String, String), String>,
    failing: HashMap<String, String>,
    release_calls: AtomicUsize,
    tag_calls: AtomicUsize,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a release whose tag is resolved through the tag endpoint
    pub fn with_release(mut self, repo: &str, tag: &str, sha: &str) -> Self {
        self.releases.insert(
            repo.to_string(),
            LatestRelease {
                tag_name: tag.to_string(),
                target_commitish: "main".to_string(),
            },
        );
        self.with_tag(repo, tag, sha)
    }

    pub fn with_tag(mut self, repo: &str, tag: &str, sha: &str) -> Self {
        self.tags
            .insert((repo.to_string(), tag.to_string()), sha.to_string());
        self
    }

    /// Make every call for `repo` fail with a transport-level error
    pub fn with_failure(mut self, repo: &str, message: &str) -> Self {
        self.failing.insert(repo.to_string(), message.to_string());
        self
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }

    pub fn tag_calls(&self) -> usize {
        self.tag_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseLookup for MockLookup {
    async fn fetch_latest_release(
        &self,
        identity: &ActionIdentity,
    ) -> Result<Option<LatestRelease>, LookupError> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        let key = identity.key();
        if let Some(message) = self.failing.get(&key) {
            return Err(LookupError::InvalidResponse(message.clone()));
        }
        Ok(self.releases.get(&key).cloned())
    }

    async fn fetch_tag_sha(
        &self,
        identity: &ActionIdentity,
        tag: &str,
    ) -> Result<String, LookupError> {
        self.tag_calls.fetch_add(1, Ordering::SeqCst);
        let key = identity.key();
        if let Some(message) = self.failing.get(&key) {
            return Err(LookupError::InvalidResponse(message.clone()));
        }
        self.tags
            .get(&(key.clone(), tag.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("{key}@{tag}")))
    }
}

/// Build a processor over `lookup` with a fresh release cache
pub fn create_test_processor(lookup: Arc<MockLookup>, write: bool) -> Processor {
    let resolver = ReleaseResolver::new(lookup, Arc::new(ReleaseCache::new()));
    Processor::new(Arc::new(GitHubActionsParser::new()), resolver, write)
}
