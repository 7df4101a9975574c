//! Dereference a result location into its SKILL.md text

use regex::Regex;
use skillfind_skills::SKILL_FILE;
use skillfind_types::SkillRecord;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::client::GitHubClient;

fn github_location_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^https://github\.com/([^/\s]+)/([^/\s]+?)(?:\.git)?(?:/(blob|tree)/([^/\s]+)(?:/(.*?))?)?/?$",
        )
        .ok()
    })
    .as_ref()
}

/// Raw URL of the SKILL.md behind a GitHub web location.
///
/// - `https://github.com/o/r` maps to `{raw}/o/r/HEAD/SKILL.md`
/// - `.../blob/{ref}/{path}` maps to `{raw}/o/r/{ref}/{path}`
/// - `.../tree/{ref}/{dir}` maps to `{raw}/o/r/{ref}/{dir}/SKILL.md`
///
/// Returns `None` for anything that is not a GitHub repository URL.
#[must_use]
pub fn raw_document_url(location: &str, raw_base: &str) -> Option<String> {
    let caps = github_location_re()?.captures(location.trim())?;
    let raw_base = raw_base.trim_end_matches('/');
    let owner = &caps[1];
    let repo = &caps[2];

    let Some(kind) = caps.get(3) else {
        return Some(format!("{raw_base}/{owner}/{repo}/HEAD/{SKILL_FILE}"));
    };
    let git_ref = &caps[4];
    let path = caps.get(5).map_or("", |m| m.as_str()).trim_end_matches('/');

    match (kind.as_str(), path.is_empty()) {
        ("blob", true) => None,
        ("blob", false) => Some(format!("{raw_base}/{owner}/{repo}/{git_ref}/{path}")),
        (_, true) => Some(format!("{raw_base}/{owner}/{repo}/{git_ref}/{SKILL_FILE}")),
        (_, false) => Some(format!(
            "{raw_base}/{owner}/{repo}/{git_ref}/{path}/{SKILL_FILE}"
        )),
    }
}

/// Full SKILL.md text for a result, or `None` when it cannot be read.
///
/// Local records read `<location>/SKILL.md` from disk. Remote records need
/// a client; their web location is converted with [`raw_document_url`].
pub async fn fetch_document(record: &SkillRecord, client: Option<&GitHubClient>) -> Option<String> {
    if !record.source().is_remote() {
        let path = Path::new(record.location()).join(SKILL_FILE);
        return match tokio::fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        };
    }

    let Some(client) = client else {
        debug!(name = record.name(), "no GitHub client, cannot fetch remote document");
        return None;
    };

    let Some(url) = raw_document_url(record.location(), client.raw_base()) else {
        debug!(location = record.location(), "location is not a GitHub URL");
        return None;
    };

    match client.fetch_raw(&url).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            None
        }
    }
}
