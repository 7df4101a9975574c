//! Merge per-source results into one ranked, capped list

use skillfind_types::{Query, SkillRecord, SkillSource};
use std::collections::HashSet;
use tracing::debug;

/// Merge result slots into a ranked list of at most `limit` records.
///
/// - Slots are visited in tier order (local, known repos, topic, code
///   search), whatever order they were handed in.
/// - A name seen earlier, case-insensitively, is dropped. Within a tier the
///   source order decides which duplicate survives.
/// - Survivors of a tier are ranked by relevance, highest first; equal scores
///   keep their source order.
/// - The cap is applied last, so a tier that fills the limit on its own
///   pushes later tiers out entirely.
#[must_use]
pub fn merge_ranked(
    query: &Query,
    mut slots: Vec<(SkillSource, Vec<SkillRecord>)>,
    limit: usize,
) -> Vec<SkillRecord> {
    slots.sort_by_key(|(tier, _)| *tier);

    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for (tier, records) in slots {
        let before = records.len();
        let mut kept: Vec<(usize, SkillRecord)> = records
            .into_iter()
            .filter(|record| seen.insert(record.dedup_key()))
            .map(|record| (query.relevance(record.name(), record.description()), record))
            .collect();
        debug!(%tier, found = before, kept = kept.len(), "merging tier");

        // sort_by is stable
        kept.sort_by(|a, b| b.0.cmp(&a.0));
        merged.extend(kept.into_iter().map(|(_, record)| record));
    }

    merged.truncate(limit);
    merged
}
