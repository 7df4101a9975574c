//! Output formatting for `find-skill`

use anyhow::Result;
use skillfind_types::{truncate_chars, SkillRecord};
use std::io::Write;

/// Description length shown in the listing
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

const BANNER_WIDTH: usize = 60;

/// Pretty-printed JSON array in rank order
pub fn render_json(results: &[SkillRecord], out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

/// Numbered listing, or a hint when nothing was found
pub fn render_listing(query: &str, results: &[SkillRecord], out: &mut impl Write) -> Result<()> {
    if results.is_empty() {
        return render_empty(query, out);
    }

    writeln!(out, "Found {} skill(s) for \"{}\":", results.len(), query)?;
    writeln!(out)?;
    for (i, record) in results.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, record.name())?;
        writeln!(out, "   Location: {}", record.location())?;
        writeln!(out, "   Description: {}", preview(record.description()))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Message printed for an empty result set
pub fn render_empty(query: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "No skills found for: {query}")?;
    writeln!(out, "Try broader terms, or create the skill yourself.")?;
    Ok(())
}

/// Banner plus document body (or a placeholder) for one fetched result
pub fn render_fetched(
    index: usize,
    record: &SkillRecord,
    content: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "[{}] {} ({})", index, record.name(), record.source())?;
    writeln!(out, "Location: {}", record.location())?;
    writeln!(out, "{rule}")?;
    match content {
        Some(content) => writeln!(out, "{}", content.trim_end())?,
        None => writeln!(out, "[Could not fetch SKILL.md content]")?,
    }
    writeln!(out)?;
    Ok(())
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        format!("{}...", truncate_chars(description, DESCRIPTION_PREVIEW_CHARS))
    } else {
        description.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillfind_types::SkillSource;

    fn record(name: &str, description: &str, source: SkillSource) -> SkillRecord {
        SkillRecord::new(name, description, format!("/skills/{name}"), source).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_listing_layout() {
        let results = vec![
            record("silence-detect", "Detects silence gaps in audio", SkillSource::Local),
            record("pdf-tools", "PDF helpers", SkillSource::TopicSearch),
        ];
        let text = render(|out| render_listing("detect silence", &results, out));

        assert_eq!(
            text,
            "Found 2 skill(s) for \"detect silence\":\n\n\
             1. silence-detect\n   Location: /skills/silence-detect\n   Description: Detects silence gaps in audio\n\n\
             2. pdf-tools\n   Location: /skills/pdf-tools\n   Description: PDF helpers\n\n"
        );
    }

    #[test]
    fn test_long_description_is_cut() {
        let long = "é".repeat(150);
        let results = vec![record("wide", &long, SkillSource::Local)];
        let text = render(|out| render_listing("wide", &results, out));

        let expected = format!("   Description: {}...\n", "é".repeat(120));
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_exact_limit_is_not_cut() {
        let exact = "a".repeat(120);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_empty_listing() {
        let text = render(|out| render_listing("nothing", &[], out));
        assert_eq!(
            text,
            "No skills found for: nothing\nTry broader terms, or create the skill yourself.\n"
        );
    }

    #[test]
    fn test_json_preserves_order_and_fields() {
        let results = vec![
            record("b-skill", "second", SkillSource::KnownRepo),
            record("a-skill", "first", SkillSource::Local),
        ];
        let text = render(|out| render_json(&results, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["name"], "b-skill");
        assert_eq!(value[0]["source"], "known-repo");
        assert_eq!(value[0]["location"], "/skills/b-skill");
        assert_eq!(value[1]["description"], "first");
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_fetched_banner() {
        let r = record("pdf-tools", "PDF helpers", SkillSource::Local);
        let text = render(|out| render_fetched(1, &r, Some("---\nname: pdf-tools\n---\n"), out));
        let rule = "=".repeat(60);
        assert!(text.starts_with(&format!("{rule}\n[1] pdf-tools (local)\nLocation: /skills/pdf-tools\n{rule}\n")));
        assert!(text.contains("name: pdf-tools"));

        let text = render(|out| render_fetched(2, &r, None, out));
        assert!(text.contains("[Could not fetch SKILL.md content]"));
    }
}
