//! Search the curated `github.repos` list

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use skillfind_skills::{SkillDocument, SKILL_FILE};
use skillfind_types::{DiscoveryConfig, Query, SearchOutcome, SkillRecord, SkillSearcher, SkillSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use crate::client::{GitHubClient, RepoId, GITHUB_WEB_BASE};
use crate::error::Result;

/// Raw document fetches in flight per repository
const MAX_CONCURRENT_FETCHES: usize = 8;

/// Repositories searched at the same time
const MAX_CONCURRENT_REPOS: usize = 4;

/// Time every repository has to finish: four fifths of the adapter
/// deadline, so finished repositories are reported before the engine gives
/// up on the whole tier.
pub fn repo_deadline(adapter_timeout: Duration) -> Duration {
    adapter_timeout * 4 / 5
}

/// Searches the top-level skill folders of each configured repository.
///
/// One API call per repository lists its contents; SKILL.md files are read
/// from raw content and filtered exactly like local documents.
pub struct KnownReposSearcher {
    client: Arc<GitHubClient>,
}

impl KnownReposSearcher {
    /// Create a searcher backed by `client`
    #[must_use]
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }

    async fn search_repo(&self, repo: &RepoId, query: &Query) -> Result<SearchOutcome> {
        let entries = self.client.list_contents(repo).await?;

        let dirs: Vec<String> = entries
            .into_iter()
            .filter(|e| e.is_dir() && !e.name.starts_with('.'))
            .map(|e| e.name)
            .collect();
        debug!(%repo, candidates = dirs.len(), "listing repository skill folders");

        let fetched: Vec<_> = stream::iter(dirs)
            .map(|dir| {
                let url = self
                    .client
                    .raw_url(repo, "HEAD", &format!("{dir}/{SKILL_FILE}"));
                async move {
                    let content = self.client.fetch_raw(&url).await;
                    (dir, content)
                }
            })
            .buffered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        let mut outcome = SearchOutcome::new();
        for (dir, content) in fetched {
            let content = match content {
                Ok(Some(content)) => content,
                Ok(None) => continue,
                Err(e) => {
                    outcome.warn(
                        SkillSource::KnownRepo,
                        format!("Failed to fetch {repo}/{dir}/{SKILL_FILE}: {e}"),
                    );
                    continue;
                }
            };

            let document = match SkillDocument::parse_in_folder(&content, &dir) {
                Ok(document) => document,
                Err(e) => {
                    outcome.warn(
                        SkillSource::KnownRepo,
                        format!("Skipping {repo}/{dir}: {e:#}"),
                    );
                    continue;
                }
            };

            if !document.matches(query) {
                continue;
            }

            let location = format!("{GITHUB_WEB_BASE}/{repo}/tree/HEAD/{dir}");
            match SkillRecord::new(
                document.name(),
                document.description(),
                location,
                SkillSource::KnownRepo,
            ) {
                Ok(record) => outcome.push(record),
                Err(e) => outcome.warn(SkillSource::KnownRepo, format!("Skipping {repo}/{dir}: {e}")),
            }
        }

        Ok(outcome)
    }
}

#[async_trait]
impl SkillSearcher for KnownReposSearcher {
    fn tier(&self) -> SkillSource {
        SkillSource::KnownRepo
    }

    async fn search(&self, query: &Query, config: &DiscoveryConfig) -> SearchOutcome {
        let mut outcome = SearchOutcome::new();

        let mut repos = Vec::with_capacity(config.github.repos.len());
        for repo in &config.github.repos {
            match RepoId::parse(repo) {
                Ok(id) => repos.push(id),
                Err(e) => outcome.warn(SkillSource::KnownRepo, e.to_string()),
            }
        }

        // One shared deadline: a slow repository costs only its own results
        let budget = repo_deadline(config.github.timeout());
        let deadline = Instant::now() + budget;

        let searches: Vec<_> = repos
            .iter()
            .map(|repo| async move {
                let result = timeout_at(deadline, self.search_repo(repo, query)).await;
                (repo, result)
            })
            .collect();
        let searched: Vec<_> = stream::iter(searches)
            .buffered(MAX_CONCURRENT_REPOS)
            .collect()
            .await;

        for (repo, result) in searched {
            match result {
                Ok(Ok(found)) => outcome.extend(found),
                Ok(Err(e)) => outcome.warn(
                    SkillSource::KnownRepo,
                    format!("Failed to search {repo}: {e}"),
                ),
                Err(_) => outcome.warn(
                    SkillSource::KnownRepo,
                    format!("Timed out searching {repo} after {}ms", budget.as_millis()),
                ),
            }
        }

        info!(
            "Known repositories produced {} matching skills from {} repos",
            outcome.records.len(),
            config.github.repos.len()
        );
        outcome
    }
}
