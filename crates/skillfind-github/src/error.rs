//! Error types for GitHub API operations

use thiserror::Error;

/// GitHub client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport-level error (connection, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Primary or secondary rate limit hit
    #[error("GitHub API rate limit exceeded. Wait a few minutes, or set GITHUB_TOKEN for higher limits")]
    RateLimited,

    /// Token missing where required, or rejected
    #[error("GitHub API authentication failed. Set or verify GITHUB_TOKEN")]
    Unauthorized,

    /// 403 that is not a rate limit
    #[error("GitHub API access forbidden: {0}")]
    Forbidden(String),

    /// 422 from the search endpoints
    #[error("GitHub rejected the search query: {0}")]
    InvalidQuery(String),

    /// Any other non-success status
    #[error("GitHub API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The per-invocation API call budget is used up
    #[error("GitHub request budget exhausted ({budget} API calls allowed per run)")]
    BudgetExhausted {
        /// Configured budget
        budget: u32,
    },

    /// Repository identifier is not `owner/repo`
    #[error("Invalid repository '{0}' (expected owner/repo)")]
    InvalidRepo(String),

    /// Unexpected response payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, GitHubError>;
