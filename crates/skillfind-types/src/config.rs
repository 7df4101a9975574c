//! Discovery configuration, read-only after load

use serde::Deserialize;
use std::time::Duration;

/// Default topic used for topic-tagged repository lookup
pub const DEFAULT_TOPIC: &str = "agentskills";

fn default_local_paths() -> Vec<String> {
    vec!["~/skills/".to_string()]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_per_page() -> u32 {
    10
}

fn default_request_budget() -> u32 {
    30
}

fn default_enabled() -> bool {
    true
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

/// Top-level configuration for one discovery run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveryConfig {
    /// Directories scanned for local skills, in priority order
    #[serde(default = "default_local_paths")]
    pub local_paths: Vec<String>,

    /// Remote search settings
    #[serde(default)]
    pub github: GitHubConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            local_paths: default_local_paths(),
            github: GitHubConfig::default(),
        }
    }
}

/// Remote (GitHub) search settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubConfig {
    /// Gate for all remote lookups
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Topic label for repository search
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Curated `owner/repo` identifiers, searched first
    #[serde(default)]
    pub repos: Vec<String>,

    /// Per-adapter timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for search queries
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Maximum REST API calls per invocation
    #[serde(default = "default_request_budget")]
    pub request_budget: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            topic: default_topic(),
            repos: Vec::new(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
            request_budget: default_request_budget(),
        }
    }
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
