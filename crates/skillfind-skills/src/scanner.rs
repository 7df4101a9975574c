//! Local filesystem skill scanner
//!
//! Walks each configured directory a bounded number of levels deep so that
//! skills grouped into category folders (monorepos) are found too.

use async_trait::async_trait;
use skillfind_types::{DiscoveryConfig, Query, SearchOutcome, SkillRecord, SkillSearcher, SkillSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

use crate::skill::{SkillDocument, SKILL_FILE};

/// Levels below each configured path that are searched for skill folders
pub const MAX_SCAN_DEPTH: usize = 2;

/// Searcher over `local_paths`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScanner;

impl LocalScanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SkillSearcher for LocalScanner {
    fn tier(&self) -> SkillSource {
        SkillSource::Local
    }

    async fn search(&self, query: &Query, config: &DiscoveryConfig) -> SearchOutcome {
        let paths: Vec<PathBuf> = config.local_paths.iter().map(|p| expand_tilde(p)).collect();
        let query = query.clone();

        // Directory walks block; keep them off the async workers
        match tokio::task::spawn_blocking(move || scan_paths(&paths, &query)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Local scan task failed: {}", e);
                SearchOutcome::failed(SkillSource::Local, format!("Local scan failed: {e}"))
            }
        }
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Scan directories in order and return matching skills.
///
/// Missing or unreadable directories are skipped without a warning; broken
/// SKILL.md files are skipped with one.
pub fn scan_paths(paths: &[PathBuf], query: &Query) -> SearchOutcome {
    let mut outcome = SearchOutcome::new();

    for base in paths {
        if !base.is_dir() {
            debug!("Skills directory does not exist or is not a directory: {:?}", base);
            continue;
        }
        scan_directory(base, query, &mut outcome);
    }

    info!(
        "Local scan found {} matching skills in {} directories",
        outcome.records.len(),
        paths.len()
    );
    outcome
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Scan a single directory tree for skills
fn scan_directory(base: &Path, query: &Query, outcome: &mut SearchOutcome) {
    let walker = WalkDir::new(base)
        .max_depth(MAX_SCAN_DEPTH)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {:?}: {}", base, e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if !dir.join(SKILL_FILE).is_file() {
            continue;
        }

        let document = match SkillDocument::from_dir(dir) {
            Ok(document) => document,
            Err(e) => {
                outcome.warn(SkillSource::Local, format!("Skipping {:?}: {:#}", dir, e));
                continue;
            }
        };

        if !document.matches(query) {
            continue;
        }

        let location = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        match SkillRecord::new(
            document.name(),
            document.description(),
            location.display().to_string(),
            SkillSource::Local,
        ) {
            Ok(record) => {
                debug!("Discovered skill: {} at {:?}", record.name(), location);
                outcome.push(record);
            }
            Err(e) => outcome.warn(SkillSource::Local, format!("Skipping {:?}: {}", dir, e)),
        }
    }
}
