//! Search result records and the sources they come from

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecordError;

/// Maximum description length kept on a record
pub const MAX_RECORD_DESCRIPTION_CHARS: usize = 300;

/// Where a search result came from.
///
/// Variants are declared in merge priority order: deriving `Ord` makes
/// `Local < KnownRepo < TopicSearch < CodeSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillSource {
    Local,
    KnownRepo,
    TopicSearch,
    CodeSearch,
}

impl SkillSource {
    /// All sources, highest priority first
    pub const ALL: [SkillSource; 4] = [
        SkillSource::Local,
        SkillSource::KnownRepo,
        SkillSource::TopicSearch,
        SkillSource::CodeSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillSource::Local => "local",
            SkillSource::KnownRepo => "known-repo",
            SkillSource::TopicSearch => "topic-search",
            SkillSource::CodeSearch => "code-search",
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, SkillSource::Local)
    }
}

impl fmt::Display for SkillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search result
///
/// Deserialization goes through [`SkillRecord::new`], so JSON read back from
/// `--json` output obeys the same invariants as freshly built records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct SkillRecord {
    name: String,
    description: String,
    location: String,
    source: SkillSource,
}

impl SkillRecord {
    /// Build a record, enforcing non-empty `name` and `location`.
    ///
    /// The description is capped at [`MAX_RECORD_DESCRIPTION_CHARS`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        source: SkillSource,
    ) -> Result<Self, RecordError> {
        let name = name.into().trim().to_string();
        let location = location.into().trim().to_string();

        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if location.is_empty() {
            return Err(RecordError::EmptyLocation { name });
        }

        let description = truncate_chars(description.into().trim(), MAX_RECORD_DESCRIPTION_CHARS);

        Ok(Self {
            name,
            description,
            location,
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn source(&self) -> SkillSource {
        self.source
    }

    /// Case-insensitive deduplication key
    pub fn dedup_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Deserialize)]
struct RecordFields {
    name: String,
    #[serde(default)]
    description: String,
    location: String,
    source: SkillSource,
}

impl TryFrom<RecordFields> for SkillRecord {
    type Error = RecordError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        SkillRecord::new(fields.name, fields.description, fields.location, fields.source)
    }
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
