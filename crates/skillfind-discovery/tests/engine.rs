//! Engine behaviour with stub searchers and real local folders

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use skillfind_discovery::{DiscoverOptions, DiscoveryEngine};
use skillfind_skills::LocalScanner;
use skillfind_types::{DiscoveryConfig, Query, SearchOutcome, SkillRecord, SkillSearcher, SkillSource};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Returns fixed records and counts its invocations
struct StubSearcher {
    tier: SkillSource,
    names: Vec<&'static str>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubSearcher {
    fn new(tier: SkillSource, names: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            tier,
            names: names.to_vec(),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(tier: SkillSource, names: &[&'static str], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            tier,
            names: names.to_vec(),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillSearcher for StubSearcher {
    fn tier(&self) -> SkillSource {
        self.tier
    }

    async fn search(&self, _query: &Query, _config: &DiscoveryConfig) -> SearchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut outcome = SearchOutcome::new();
        for name in &self.names {
            let location = format!("https://github.com/stub/{name}");
            outcome.push(SkillRecord::new(*name, format!("{name} skill"), location, self.tier).unwrap());
        }
        outcome
    }
}

/// Stub whose search panics
struct PanickingSearcher;

#[async_trait]
impl SkillSearcher for PanickingSearcher {
    fn tier(&self) -> SkillSource {
        SkillSource::TopicSearch
    }

    async fn search(&self, _query: &Query, _config: &DiscoveryConfig) -> SearchOutcome {
        panic!("searcher exploded");
    }
}

fn write_skill(root: &Path, name: &str, description: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("SKILL.md"),
        format!("---\nname: {name}\ndescription: {description}\n---\n\n# {name}\n"),
    )
    .unwrap();
}

fn config_for(dir: &TempDir) -> DiscoveryConfig {
    let mut config = DiscoveryConfig {
        local_paths: vec![dir.path().display().to_string()],
        ..DiscoveryConfig::default()
    };
    config.github.repos = vec!["acme/skills".into()];
    config
}

fn dynamic(searcher: &Arc<StubSearcher>) -> Arc<dyn SkillSearcher> {
    searcher.clone()
}

fn options(local_only: bool, limit: usize) -> DiscoverOptions {
    DiscoverOptions { local_only, limit }
}

fn names(records: &[SkillRecord]) -> Vec<&str> {
    records.iter().map(SkillRecord::name).collect()
}

#[tokio::test]
async fn test_local_results_rank_first() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "silence-detect", "Detects silence gaps in audio");

    let remote = StubSearcher::new(SkillSource::KnownRepo, &["detect-silence-pro"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&remote)]);

    let report = engine
        .discover(&Query::parse("detect silence").unwrap(), Arc::new(config_for(&dir)), options(false, 10))
        .await;

    assert_eq!(names(&report.results), vec!["silence-detect", "detect-silence-pro"]);
    assert_eq!(report.results[0].source(), SkillSource::Local);
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_local_only_never_calls_remote() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");

    let known = StubSearcher::new(SkillSource::KnownRepo, &["a"]);
    let topic = StubSearcher::new(SkillSource::TopicSearch, &["b"]);
    let code = StubSearcher::new(SkillSource::CodeSearch, &["c"]);
    let engine = DiscoveryEngine::new(
        Arc::new(LocalScanner::new()),
        vec![dynamic(&known), dynamic(&topic), dynamic(&code)],
    );

    let report = engine
        .discover(&Query::parse("audio").unwrap(), Arc::new(config_for(&dir)), options(true, 10))
        .await;

    assert_eq!(names(&report.results), vec!["audio-tools"]);
    assert_eq!(known.calls() + topic.calls() + code.calls(), 0);
}

#[tokio::test]
async fn test_github_disabled_uses_local_only() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");
    let mut config = config_for(&dir);
    config.github.enabled = false;

    let known = StubSearcher::new(SkillSource::KnownRepo, &["audio-remote"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&known)]);

    let report = engine
        .discover(&Query::parse("audio").unwrap(), Arc::new(config), options(false, 10))
        .await;

    assert_eq!(names(&report.results), vec!["audio-tools"]);
    assert_eq!(known.calls(), 0);
}

#[tokio::test]
async fn test_duplicate_name_keeps_local() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");

    let known = StubSearcher::new(SkillSource::KnownRepo, &["audio-tools", "audio-extra"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&known)]);

    let report = engine
        .discover(&Query::parse("audio").unwrap(), Arc::new(config_for(&dir)), options(false, 10))
        .await;

    let hits: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.name() == "audio-tools")
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source(), SkillSource::Local);
    assert_eq!(report.results.len(), 2);
}

#[tokio::test]
async fn test_merge_is_independent_of_completion_order() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.github.timeout_secs = 5;

    // the code searcher finishes first, the known-repo searcher last
    let known = StubSearcher::slow(SkillSource::KnownRepo, &["shared", "known-only"], Duration::from_millis(150));
    let topic = StubSearcher::slow(SkillSource::TopicSearch, &["topic-only"], Duration::from_millis(50));
    let code = StubSearcher::new(SkillSource::CodeSearch, &["shared", "code-only"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&code), dynamic(&topic), dynamic(&known)]);

    let report = engine
        .discover(&Query::parse("skill").unwrap(), Arc::new(config), options(false, 10))
        .await;

    assert_eq!(
        names(&report.results),
        vec!["shared", "known-only", "topic-only", "code-only"]
    );
    assert_eq!(report.results[0].source(), SkillSource::KnownRepo);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "pdf-tools", "Merge pdf files");
    write_skill(dir.path(), "pdf-reader", "Read pdf files");

    let topic = StubSearcher::new(SkillSource::TopicSearch, &["pdf-kit"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&topic)]);
    let config = Arc::new(config_for(&dir));
    let query = Query::parse("pdf merge").unwrap();

    let first = engine.discover(&query, Arc::clone(&config), options(false, 10)).await;
    let second = engine.discover(&query, config, options(false, 10)).await;

    assert_eq!(first.results, second.results);
    assert_eq!(names(&first.results), vec!["pdf-tools", "pdf-kit"]);
}

#[tokio::test]
async fn test_limit_and_starvation() {
    let dir = TempDir::new().unwrap();
    for name in ["tool-a", "tool-b", "tool-c"] {
        write_skill(dir.path(), name, "A tool");
    }

    let topic = StubSearcher::new(SkillSource::TopicSearch, &["tool-remote"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&topic)]);

    let report = engine
        .discover(&Query::parse("tool").unwrap(), Arc::new(config_for(&dir)), options(false, 3))
        .await;

    assert_eq!(report.results.len(), 3);
    assert!(report.results.iter().all(|r| r.source() == SkillSource::Local));
}

#[tokio::test]
async fn test_timed_out_searcher_contributes_warning() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");
    let mut config = config_for(&dir);
    config.github.timeout_secs = 1;

    let slow = StubSearcher::slow(SkillSource::CodeSearch, &["audio-slow"], Duration::from_secs(30));
    let fast = StubSearcher::new(SkillSource::TopicSearch, &["audio-fast"]);
    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![dynamic(&fast), dynamic(&slow)]);

    let report = engine
        .discover(&Query::parse("audio").unwrap(), Arc::new(config), options(false, 10))
        .await;

    assert_eq!(names(&report.results), vec!["audio-tools", "audio-fast"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].source, SkillSource::CodeSearch);
    assert!(report.warnings[0].message.contains("timed out"));
}

#[tokio::test]
async fn test_panicking_searcher_contributes_warning() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");

    let engine = DiscoveryEngine::new(Arc::new(LocalScanner::new()), vec![Arc::new(PanickingSearcher) as Arc<dyn SkillSearcher>]);

    let report = engine
        .discover(&Query::parse("audio").unwrap(), Arc::new(config_for(&dir)), options(false, 10))
        .await;

    assert_eq!(names(&report.results), vec!["audio-tools"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].source, SkillSource::TopicSearch);
}

#[tokio::test]
async fn test_malformed_local_document_is_skipped_with_warning() {
    let dir = TempDir::new().unwrap();
    write_skill(dir.path(), "audio-tools", "Audio helpers");
    let broken = dir.path().join("audio-broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("SKILL.md"), "---\nname: audio-broken\n---\nno description\n").unwrap();

    let report = DiscoveryEngine::local()
        .discover(&Query::parse("audio").unwrap(), Arc::new(config_for(&dir)), options(false, 10))
        .await;

    assert_eq!(names(&report.results), vec!["audio-tools"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].source, SkillSource::Local);
}
