//! Full-text search for SKILL.md files

use async_trait::async_trait;
use skillfind_skills::SKILL_FILE;
use skillfind_types::{DiscoveryConfig, Query, SearchOutcome, SkillRecord, SkillSearcher, SkillSource};
use std::sync::Arc;
use tracing::info;

use crate::client::{CodeItem, GitHubClient};
use crate::sanitize::sanitize_search_terms;

/// Searches GitHub's code index for SKILL.md documents whose content
/// matches the query. Broadest reach, lowest precision.
///
/// Code search requires authentication; without a token GitHub answers 401
/// and this searcher contributes a warning only.
pub struct CodeSearcher {
    client: Arc<GitHubClient>,
}

impl CodeSearcher {
    /// Create a searcher backed by `client`
    #[must_use]
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

/// Name of the folder holding the document, or the repository name for a
/// root-level SKILL.md
fn skill_name(item: &CodeItem) -> String {
    let mut parts = item.path.rsplit('/');
    parts.next();
    match parts.next() {
        Some(parent) if !parent.is_empty() => parent.to_string(),
        _ => item.repository.name.clone(),
    }
}

fn record_from_item(item: CodeItem) -> Result<SkillRecord, skillfind_types::RecordError> {
    let name = skill_name(&item);
    let full_name = if item.repository.full_name.is_empty() {
        item.repository.name.clone()
    } else {
        item.repository.full_name.clone()
    };
    let description = format!("In {}: {}", full_name, item.path);
    let location = if item.html_url.is_empty() {
        item.repository.html_url
    } else {
        item.html_url
    };
    SkillRecord::new(name, description, location, SkillSource::CodeSearch)
}

#[async_trait]
impl SkillSearcher for CodeSearcher {
    fn tier(&self) -> SkillSource {
        SkillSource::CodeSearch
    }

    async fn search(&self, query: &Query, config: &DiscoveryConfig) -> SearchOutcome {
        let Some(terms) = sanitize_search_terms(query.as_str()) else {
            return SearchOutcome::failed(
                SkillSource::CodeSearch,
                "Query has no searchable terms after removing search qualifiers",
            );
        };

        let q = format!("{terms} filename:{SKILL_FILE}");
        let items = match self.client.search_code(&q, config.github.per_page).await {
            Ok(items) => items,
            Err(e) => {
                return SearchOutcome::failed(
                    SkillSource::CodeSearch,
                    format!("GitHub code search failed: {e}"),
                )
            }
        };

        let mut outcome = SearchOutcome::new();
        for item in items {
            match record_from_item(item) {
                Ok(record) => outcome.push(record),
                Err(e) => outcome.warn(SkillSource::CodeSearch, format!("Skipping code result: {e}")),
            }
        }

        info!("Code search produced {} documents", outcome.records.len());
        outcome
    }
}
