//! Skillfind Types - Core types shared by the discovery crates
//!
//! Search records and their sources, the validated query, the read-only
//! discovery configuration and the `SkillSearcher` capability.

pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod searcher;

pub use config::{DiscoveryConfig, GitHubConfig, DEFAULT_TOPIC};
pub use error::{QueryError, RecordError};
pub use query::Query;
pub use record::{truncate_chars, SkillRecord, SkillSource, MAX_RECORD_DESCRIPTION_CHARS};
pub use searcher::{SearchOutcome, SearchWarning, SkillSearcher};
