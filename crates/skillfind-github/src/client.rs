//! Thin GitHub REST client
//!
//! Wraps `reqwest::Client` with bearer-token auth, status mapping and a
//! per-run budget on API calls. Base URLs are injectable so tests can point
//! the client at a mock server.

use crate::error::{GitHubError, Result};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skillfind_types::GitHubConfig;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::debug;

/// Public REST API base
pub const GITHUB_API_BASE: &str = "https://api.github.com";
/// Raw file content base
pub const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
/// Web UI base used to build human-facing locations
pub const GITHUB_WEB_BASE: &str = "https://github.com";

const USER_AGENT: &str = concat!("find-skill/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON_MIME_TYPE: &str = "application/vnd.github+json";
const HEADER_API_VERSION: &str = "x-github-api-version";
const HEADER_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const API_VERSION: &str = "2022-11-28";

/// A validated `owner/repo` identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// Account or organization
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoId {
    /// Parse `owner/repo`
    ///
    /// # Errors
    /// Returns [`GitHubError::InvalidRepo`] for anything else
    pub fn parse(s: &str) -> Result<Self> {
        let valid_part = |p: &str| {
            !p.is_empty()
                && p
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };

        match s.trim().split_once('/') {
            Some((owner, repo)) if valid_part(owner) && valid_part(repo) => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(GitHubError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Entry of `GET /repos/{owner}/{repo}/contents`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// File or directory name
    pub name: String,
    /// Path from the repository root
    #[serde(default)]
    pub path: String,
    /// `file`, `dir`, `symlink` or `submodule`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContentEntry {
    /// Whether this entry is a directory
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// Item of `GET /search/repositories`
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryItem {
    /// Repository name
    pub name: String,
    /// `owner/repo`
    #[serde(default)]
    pub full_name: String,
    /// Repository description
    #[serde(default)]
    pub description: Option<String>,
    /// Web URL
    pub html_url: String,
}

/// Item of `GET /search/code`
#[derive(Debug, Clone, Deserialize)]
pub struct CodeItem {
    /// File name
    #[serde(default)]
    pub name: String,
    /// Path from the repository root
    pub path: String,
    /// Web URL of the file
    #[serde(default)]
    pub html_url: String,
    /// Repository containing the file
    pub repository: CodeRepository,
}

/// Repository summary embedded in a code search item
#[derive(Debug, Clone, Deserialize)]
pub struct CodeRepository {
    /// Repository name
    pub name: String,
    /// `owner/repo`
    #[serde(default)]
    pub full_name: String,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
}

#[derive(Deserialize)]
struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// GitHub client shared by the remote searchers
#[derive(Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
    token: Option<String>,
    budget: u32,
    used: AtomicU32,
}

impl GitHubClient {
    /// Create a client with the public GitHub endpoints
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            http,
            api_base: GITHUB_API_BASE.to_string(),
            raw_base: GITHUB_RAW_BASE.to_string(),
            token,
            budget: u32::MAX,
            used: AtomicU32::new(0),
        })
    }

    /// Create a client using timeout and budget from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &GitHubConfig, token: Option<String>) -> Result<Self> {
        Ok(Self::new(token, config.timeout())?.with_request_budget(config.request_budget))
    }

    /// Override the REST API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the raw content base URL
    #[must_use]
    pub fn with_raw_base(mut self, base: impl Into<String>) -> Self {
        self.raw_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Cap the number of REST API calls this client may issue
    #[must_use]
    pub fn with_request_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    /// Whether a token is attached to requests
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// REST API calls issued so far
    #[must_use]
    pub fn requests_used(&self) -> u32 {
        self.used.load(Ordering::Relaxed)
    }

    /// Raw content base URL in use
    #[must_use]
    pub fn raw_base(&self) -> &str {
        &self.raw_base
    }

    /// Raw URL of `path` in `repo` at `git_ref`
    #[must_use]
    pub fn raw_url(&self, repo: &RepoId, git_ref: &str, path: &str) -> String {
        format!("{}/{}/{}/{}", self.raw_base, repo, git_ref, path)
    }

    /// List top-level contents of a repository
    ///
    /// # Errors
    /// Any transport, status, budget or payload error
    pub async fn list_contents(&self, repo: &RepoId) -> Result<Vec<ContentEntry>> {
        self.api_get(&format!("/repos/{repo}/contents"), &[]).await
    }

    /// Search repositories
    ///
    /// # Errors
    /// Any transport, status, budget or payload error
    pub async fn search_repositories(&self, q: &str, per_page: u32) -> Result<Vec<RepositoryItem>> {
        let response: SearchResponse<RepositoryItem> = self
            .api_get(
                "/search/repositories",
                &[("q", q.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;
        Ok(response.items)
    }

    /// Search code
    ///
    /// # Errors
    /// Any transport, status, budget or payload error
    pub async fn search_code(&self, q: &str, per_page: u32) -> Result<Vec<CodeItem>> {
        let response: SearchResponse<CodeItem> = self
            .api_get(
                "/search/code",
                &[("q", q.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;
        Ok(response.items)
    }

    /// Fetch a raw file. `Ok(None)` means the file does not exist.
    ///
    /// Raw content is not served by the REST API and does not count against
    /// the request budget.
    ///
    /// # Errors
    /// Transport errors and non-404 failure statuses
    pub async fn fetch_raw(&self, url: &str) -> Result<Option<String>> {
        let response = self.authorize(self.http.get(url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(%url, "raw file not found");
            return Ok(None);
        }

        let response = check_status(response).await?;
        Ok(Some(response.text().await?))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn take_budget(&self) -> Result<()> {
        let budget = self.budget;
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < budget).then_some(used + 1)
            })
            .map(|_| ())
            .map_err(|_| GitHubError::BudgetExhausted { budget })
    }

    async fn api_get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.take_budget()?;

        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, GITHUB_JSON_MIME_TYPE)
            .header(HEADER_API_VERSION, API_VERSION);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.authorize(request).send().await?;
        debug!(status = %response.status(), %url, authenticated = self.is_authenticated(), "GitHub API response received");

        let response = check_status(response).await?;

        // text() + from_str() so payload errors surface as Json, not Http
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map failure statuses to typed errors
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let quota_exhausted = response
        .headers()
        .get(HEADER_RATELIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let body = response.text().await.unwrap_or_default();
    let rate_limited = quota_exhausted || body.to_lowercase().contains("rate limit");

    Err(match status.as_u16() {
        401 => GitHubError::Unauthorized,
        403 | 429 if rate_limited => GitHubError::RateLimited,
        403 => GitHubError::Forbidden(error_message(&body)),
        422 => GitHubError::InvalidQuery(error_message(&body)),
        code => GitHubError::Status {
            status: code,
            message: error_message(&body),
        },
    })
}

/// Prefer the `message` field of a GitHub error payload
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.chars().take(200).collect(),
    }
}
