use thiserror::Error;

/// Failure reported by the release lookup collaborator
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Resolution failure for a single action; callers log it and move on
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to look up release for {action}: {source}")]
    Lookup {
        action: String,
        #[source]
        source: LookupError,
    },
}
