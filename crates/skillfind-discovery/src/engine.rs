//! Discovery engine: local scan, concurrent remote searches, merge

use skillfind_github::{CodeSearcher, GitHubClient, KnownReposSearcher, TopicSearcher};
use skillfind_skills::LocalScanner;
use skillfind_types::{
    DiscoveryConfig, Query, SearchOutcome, SearchWarning, SkillRecord, SkillSearcher, SkillSource,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info};

use crate::merge::merge_ranked;

/// Default number of results returned
pub const DEFAULT_LIMIT: usize = 10;

/// Per-invocation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Skip every remote searcher
    pub local_only: bool,
    /// Maximum number of results after merging
    pub limit: usize,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            local_only: false,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Ranked results plus every warning raised along the way
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Merged, deduplicated and capped results
    pub results: Vec<SkillRecord>,
    /// Problems that cost results but did not stop the run
    pub warnings: Vec<SearchWarning>,
}

/// Runs a query across the local searcher and the remote searchers
pub struct DiscoveryEngine {
    local: Arc<dyn SkillSearcher>,
    remote: Vec<Arc<dyn SkillSearcher>>,
}

impl DiscoveryEngine {
    /// Build an engine from explicit searchers
    pub fn new(local: Arc<dyn SkillSearcher>, remote: Vec<Arc<dyn SkillSearcher>>) -> Self {
        Self { local, remote }
    }

    /// Local scanner plus the three GitHub searchers sharing one client
    pub fn with_github(client: Arc<GitHubClient>) -> Self {
        let remote: Vec<Arc<dyn SkillSearcher>> = vec![
            Arc::new(KnownReposSearcher::new(Arc::clone(&client))),
            Arc::new(TopicSearcher::new(Arc::clone(&client))),
            Arc::new(CodeSearcher::new(client)),
        ];
        Self::new(Arc::new(LocalScanner::new()), remote)
    }

    /// Local scanner only
    pub fn local() -> Self {
        Self::new(Arc::new(LocalScanner::new()), Vec::new())
    }

    /// Run one discovery.
    ///
    /// The local scan completes first. Remote searchers then run concurrently,
    /// each under `github.timeout_secs`, unless `local_only` is set or GitHub
    /// is disabled. Nothing here fails: a source that errors, times out or
    /// panics contributes a warning instead of records.
    pub async fn discover(
        &self,
        query: &Query,
        config: Arc<DiscoveryConfig>,
        options: DiscoverOptions,
    ) -> DiscoveryReport {
        let mut warnings = Vec::new();
        let mut slots = Vec::with_capacity(1 + self.remote.len());

        let local = self.local.search(query, &config).await;
        warnings.extend(local.warnings);
        slots.push((self.local.tier(), local.records));

        if options.local_only {
            info!("Local-only search, skipping remote sources");
        } else if !config.github.enabled {
            info!("GitHub search disabled in configuration");
        } else {
            for (tier, outcome) in self.search_remote(query, &config).await {
                warnings.extend(outcome.warnings);
                slots.push((tier, outcome.records));
            }
        }

        let results = merge_ranked(query, slots, options.limit);
        info!(
            query = query.as_str(),
            results = results.len(),
            warnings = warnings.len(),
            "Discovery complete"
        );

        DiscoveryReport { results, warnings }
    }

    /// Fan out to the remote searchers. Each task owns an indexed slot, so the
    /// result order is the searcher order regardless of completion order.
    async fn search_remote(
        &self,
        query: &Query,
        config: &Arc<DiscoveryConfig>,
    ) -> Vec<(SkillSource, SearchOutcome)> {
        let limit = config.github.timeout();
        let mut slots: Vec<Option<SearchOutcome>> = vec![None; self.remote.len()];
        let mut tasks = JoinSet::new();

        for (index, searcher) in self.remote.iter().enumerate() {
            let searcher = Arc::clone(searcher);
            let config = Arc::clone(config);
            let query = query.clone();

            tasks.spawn(async move {
                let tier = searcher.tier();
                let outcome = match timeout(limit, searcher.search(&query, &config)).await {
                    Ok(outcome) => outcome,
                    Err(_) => SearchOutcome::failed(
                        tier,
                        format!("Search timed out after {}s", limit.as_secs()),
                    ),
                };
                (index, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => error!("Remote search task failed: {}", e),
            }
        }

        self.remote
            .iter()
            .zip(slots)
            .map(|(searcher, slot)| {
                let tier = searcher.tier();
                let outcome = slot.unwrap_or_else(|| {
                    SearchOutcome::failed(tier, "Search task aborted before completing")
                });
                (tier, outcome)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DiscoverOptions::default();
        assert!(!options.local_only);
        assert_eq!(options.limit, DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn test_local_engine_with_missing_paths() {
        let engine = DiscoveryEngine::local();
        let config = DiscoveryConfig {
            local_paths: vec!["/nonexistent/skillfind/path".into()],
            ..DiscoveryConfig::default()
        };

        let report = engine
            .discover(
                &Query::parse("anything").unwrap(),
                Arc::new(config),
                DiscoverOptions::default(),
            )
            .await;
        assert!(report.results.is_empty());
        assert!(report.warnings.is_empty());
    }
}
