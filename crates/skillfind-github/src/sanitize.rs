//! Strip GitHub search qualifiers from user input so it cannot change the
//! scope of a search (e.g. `repo:`, `org:`, `filename:`).

use regex::Regex;

const QUALIFIER_PATTERN: &str = r#"(?i)\b(?:repo|org|user|in|size|fork|forks|stars|topics|topic|created|pushed|updated|is|archived|license|language|filename|path|extension):(?:"[^"]*"?|\S*)"#;

const BOOLEAN_OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// Sanitized search terms, or `None` when nothing searchable is left
#[must_use]
pub fn sanitize_search_terms(query: &str) -> Option<String> {
    let stripped = match Regex::new(QUALIFIER_PATTERN) {
        Ok(re) => re.replace_all(query, " ").into_owned(),
        Err(_) => return None,
    };

    let terms: Vec<&str> = stripped
        .split_whitespace()
        .filter(|word| {
            !BOOLEAN_OPERATORS
                .iter()
                .any(|op| word.eq_ignore_ascii_case(op))
        })
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}
