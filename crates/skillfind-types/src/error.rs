//! Error types for core value construction

use thiserror::Error;

/// Rejected search input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Query was empty or whitespace only
    #[error("search query must not be empty")]
    Empty,
}

/// A record that would violate the `SkillRecord` invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("skill record name must not be empty")]
    EmptyName,

    #[error("skill record '{name}' has an empty location")]
    EmptyLocation { name: String },
}
