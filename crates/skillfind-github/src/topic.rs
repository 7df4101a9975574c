//! Repository search restricted to the configured topic

use async_trait::async_trait;
use skillfind_types::{DiscoveryConfig, Query, SearchOutcome, SkillRecord, SkillSearcher, SkillSource};
use std::sync::Arc;
use tracing::info;

use crate::client::GitHubClient;
use crate::sanitize::sanitize_search_terms;

/// Finds repositories tagged with `github.topic` whose name or description
/// match the query. Each hit is a candidate rooted at the repository.
pub struct TopicSearcher {
    client: Arc<GitHubClient>,
}

impl TopicSearcher {
    /// Create a searcher backed by `client`
    #[must_use]
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SkillSearcher for TopicSearcher {
    fn tier(&self) -> SkillSource {
        SkillSource::TopicSearch
    }

    async fn search(&self, query: &Query, config: &DiscoveryConfig) -> SearchOutcome {
        let topic = config.github.topic.trim();
        if topic.is_empty() {
            return SearchOutcome::failed(SkillSource::TopicSearch, "No topic configured, skipping topic search");
        }

        let Some(terms) = sanitize_search_terms(query.as_str()) else {
            return SearchOutcome::failed(
                SkillSource::TopicSearch,
                "Query has no searchable terms after removing search qualifiers",
            );
        };

        let q = format!("{terms} topic:{topic}");
        let items = match self.client.search_repositories(&q, config.github.per_page).await {
            Ok(items) => items,
            Err(e) => {
                return SearchOutcome::failed(
                    SkillSource::TopicSearch,
                    format!("GitHub repository search failed: {e}"),
                )
            }
        };

        let mut outcome = SearchOutcome::new();
        for item in items {
            match SkillRecord::new(
                item.name,
                item.description.unwrap_or_default(),
                item.html_url,
                SkillSource::TopicSearch,
            ) {
                Ok(record) => outcome.push(record),
                Err(e) => outcome.warn(SkillSource::TopicSearch, format!("Skipping repository: {e}")),
            }
        }

        info!(topic, "Topic search produced {} repositories", outcome.records.len());
        outcome
    }
}
