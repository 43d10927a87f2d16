// =============================================================================
// GitHub API constants
// =============================================================================

/// Default base URL for the GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version sent with every request
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("actions-pin/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single API request in milliseconds (30 seconds)
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Environment variables consulted for a token, in order
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable overriding the API base URL (GitHub Enterprise)
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// GitHub connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Build the configuration from CLI flags, falling back to the
    /// environment and then to defaults.
    pub fn resolve(token: Option<String>, api_url: Option<String>) -> Self {
        let env_token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok());
        let env_api_url = std::env::var(API_URL_ENV_VAR).ok();

        resolve_with_env(token, api_url, env_token, env_api_url)
    }
}

fn resolve_with_env(
    token: Option<String>,
    api_url: Option<String>,
    env_token: Option<String>,
    env_api_url: Option<String>,
) -> GitHubConfig {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    GitHubConfig {
        api_url: non_empty(api_url)
            .or_else(|| non_empty(env_api_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        token: non_empty(token).or_else(|| non_empty(env_token)),
    }
}
