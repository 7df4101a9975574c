//! The capability shared by every search source

use async_trait::async_trait;
use tracing::warn;

use crate::config::DiscoveryConfig;
use crate::query::Query;
use crate::record::{SkillRecord, SkillSource};

/// A non-fatal problem reported by one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWarning {
    pub source: SkillSource,
    pub message: String,
}

/// Records found by one source plus whatever went wrong on the way
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub records: Vec<SkillRecord>,
    pub warnings: Vec<SearchWarning>,
}

impl SearchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty result carrying a single warning
    pub fn failed(source: SkillSource, message: impl Into<String>) -> Self {
        let mut outcome = Self::new();
        outcome.warn(source, message);
        outcome
    }

    /// Record a warning and emit it through tracing
    pub fn warn(&mut self, source: SkillSource, message: impl Into<String>) {
        let message = message.into();
        warn!(%source, "{}", message);
        self.warnings.push(SearchWarning { source, message });
    }

    pub fn push(&mut self, record: SkillRecord) {
        self.records.push(record);
    }

    /// Append records and warnings from another outcome
    pub fn extend(&mut self, other: SearchOutcome) {
        self.records.extend(other.records);
        self.warnings.extend(other.warnings);
    }
}

/// One searchable origin of skills.
///
/// Implementations must not fail the whole run: errors become warnings on the
/// returned outcome and the record list is left empty (or partial).
#[async_trait]
pub trait SkillSearcher: Send + Sync {
    /// Merge priority tier of every record this searcher returns
    fn tier(&self) -> SkillSource;

    async fn search(&self, query: &Query, config: &DiscoveryConfig) -> SearchOutcome;
}
