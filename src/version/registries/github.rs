//! GitHub REST API release lookup

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{GITHUB_API_VERSION, GitHubConfig, REQUEST_TIMEOUT_MS, USER_AGENT};
use crate::parser::types::ActionIdentity;
use crate::version::error::LookupError;
use crate::version::registry::{LatestRelease, ReleaseLookup};

/// Response from the latest release endpoint
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    target_commitish: String,
}

/// Response from the git ref endpoint
#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

/// Release lookup backed by the GitHub REST API
pub struct GitHubReleaseLookup {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubReleaseLookup {
    /// Creates a lookup against a custom base URL
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self, LookupError> {
        Self::new(&config.api_url, config.token.clone())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, LookupError> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN && rate_limit_exhausted(response.headers()))
        {
            return Err(LookupError::RateLimited {
                retry_after_secs: retry_after(response.headers()),
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(LookupError::Unauthorized(format!(
                "GitHub API rejected credentials for {}",
                url
            )));
        }

        Ok(response)
    }
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[async_trait::async_trait]
impl ReleaseLookup for GitHubReleaseLookup {
    async fn fetch_latest_release(
        &self,
        identity: &ActionIdentity,
    ) -> Result<Option<LatestRelease>, LookupError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, identity.owner, identity.repo
        );

        let response = self.get(&url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("No release found for {}", identity);
            return Ok(None);
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(LookupError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let release: Release = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            LookupError::InvalidResponse(e.to_string())
        })?;

        Ok(Some(LatestRelease {
            tag_name: release.tag_name,
            target_commitish: release.target_commitish,
        }))
    }

    async fn fetch_tag_sha(
        &self,
        identity: &ActionIdentity,
        tag: &str,
    ) -> Result<String, LookupError> {
        let url = format!(
            "{}/repos/{}/{}/git/ref/tags/{}",
            self.base_url, identity.owner, identity.repo, tag
        );

        let response = self.get(&url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(format!("{}@{}", identity, tag)));
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(LookupError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let git_ref: GitRef = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub ref response: {}", e);
            LookupError::InvalidResponse(e.to_string())
        })?;

        Ok(git_ref.object.sha)
    }
}
