//! Search service behind `find-skill`

use anyhow::{Context, Result};
use skillfind_discovery::{DiscoverOptions, DiscoveryEngine, DiscoveryReport};
use skillfind_github::{fetch_document, GitHubClient};
use skillfind_types::{DiscoveryConfig, Query};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

use crate::render;

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Numbered human-readable listing
    #[default]
    Listing,
    /// JSON array
    Json,
    /// Full SKILL.md of every result
    Fetch,
}

/// Search service - wires configuration, sources and rendering together
pub struct SearchService {
    config: Arc<DiscoveryConfig>,
    engine: DiscoveryEngine,
    client: Option<Arc<GitHubClient>>,
}

impl SearchService {
    /// Create a service for one invocation.
    ///
    /// The GitHub client is only built when remote search can actually run.
    pub fn new(config: DiscoveryConfig, token: Option<String>, local_only: bool) -> Result<Self> {
        let remote = !local_only && config.github.enabled;
        let client = if remote {
            let client = GitHubClient::from_config(&config.github, token)
                .context("Failed to create GitHub client")?;
            info!(authenticated = client.is_authenticated(), "GitHub search enabled");
            Some(Arc::new(client))
        } else {
            None
        };

        let engine = match &client {
            Some(client) => DiscoveryEngine::with_github(Arc::clone(client)),
            None => DiscoveryEngine::local(),
        };

        Ok(Self {
            config: Arc::new(config),
            engine,
            client,
        })
    }

    /// Run the query and return the ranked report
    pub async fn search(&self, query: &Query, options: DiscoverOptions) -> DiscoveryReport {
        self.engine
            .discover(query, Arc::clone(&self.config), options)
            .await
    }

    /// Run the query and print the results
    pub async fn run(
        &self,
        query: &Query,
        options: DiscoverOptions,
        mode: OutputMode,
        out: &mut impl Write,
    ) -> Result<()> {
        let report = self.search(query, options).await;
        if let Some(client) = &self.client {
            info!(api_calls = client.requests_used(), "GitHub API usage");
        }

        match mode {
            OutputMode::Json => render::render_json(&report.results, out)?,
            OutputMode::Listing => render::render_listing(query.as_str(), &report.results, out)?,
            OutputMode::Fetch if report.results.is_empty() => {
                render::render_empty(query.as_str(), out)?;
            }
            OutputMode::Fetch => {
                for (i, record) in report.results.iter().enumerate() {
                    let content = fetch_document(record, self.client.as_deref()).await;
                    render::render_fetched(i + 1, record, content.as_deref(), out)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }
}
