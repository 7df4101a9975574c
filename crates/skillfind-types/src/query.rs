//! Search query parsing, matching and relevance scoring

use crate::error::QueryError;

/// A validated, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    phrase: String,
    terms: Vec<String>,
}

impl Query {
    /// Parse user input. Empty or whitespace-only input is rejected.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(QueryError::Empty);
        }

        let phrase = raw.to_lowercase();
        let mut terms: Vec<String> = Vec::new();
        for term in phrase.split_whitespace() {
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            phrase,
            terms,
        })
    }

    /// The query as typed (trimmed)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercase, deduplicated terms in input order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when the whole phrase occurs in any field, or every term occurs
    /// in at least one field. Case-insensitive.
    pub fn matches(&self, fields: &[&str]) -> bool {
        let lowered: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();

        if lowered.iter().any(|f| f.contains(&self.phrase)) {
            return true;
        }

        self.terms
            .iter()
            .all(|term| lowered.iter().any(|f| f.contains(term.as_str())))
    }

    /// Number of distinct terms found in `name` + `description`
    pub fn relevance(&self, name: &str, description: &str) -> usize {
        let haystack = format!("{} {}", name, description).to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .count()
    }
}
