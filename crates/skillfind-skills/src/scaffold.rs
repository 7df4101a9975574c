//! Create new skill folders from the built-in template

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::skill::{validate_name, SkillDocument, SKILL_FILE};

/// Template written to SKILL.md for every new skill
const SKILL_TEMPLATE: &str = r#"---
name: my-skill
description: "[What it does]. Use when [specific situation]. [Key capability or output]."
license: MIT
metadata:
  author: "[you]"
  version: "0.1.0"
---

# My Skill

[One sentence summary.]

## When to Use

- [Situation where this skill applies]

## Instructions

1. [First step]
2. [Second step]

## Resources

- `scripts/`: helper code the agent can run
- `references/`: background documents loaded on demand
- `assets/`: templates and static files
"#;

const DESCRIPTION_PLACEHOLDER: &str =
    "\"[What it does]. Use when [specific situation]. [Key capability or output].\"";
const SUMMARY_PLACEHOLDER: &str = "[One sentence summary.]";
const AUTHOR_PLACEHOLDER: &str = "\"[you]\"";

/// Sub-folders created next to SKILL.md
pub const SKILL_SUBDIRS: [&str; 3] = ["scripts", "references", "assets"];

/// Optional values substituted into the template
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Author written into `metadata.author`
    pub author: String,
    /// One-line description; replaces both description placeholders
    pub description: String,
}

/// Create `output_dir/<name>/` with a SKILL.md and empty resource folders.
///
/// Returns the new skill directory.
pub fn create_skill(name: &str, output_dir: &Path, options: &ScaffoldOptions) -> Result<PathBuf> {
    validate_name(name)?;

    let skill_dir = output_dir.join(name);
    if skill_dir.exists() {
        bail!("Directory already exists: {}", skill_dir.display());
    }

    let content = render_template(name, options);

    fs::create_dir_all(&skill_dir)
        .with_context(|| format!("Failed to create {}", skill_dir.display()))?;

    if let Err(e) = write_skill_files(&skill_dir, &content) {
        let _ = fs::remove_dir_all(&skill_dir);
        return Err(e);
    }

    info!(skill = name, path = %skill_dir.display(), "Created skill");
    Ok(skill_dir)
}

fn write_skill_files(skill_dir: &Path, content: &str) -> Result<()> {
    fs::write(skill_dir.join(SKILL_FILE), content)
        .with_context(|| format!("Failed to write {}", SKILL_FILE))?;

    for sub in SKILL_SUBDIRS {
        let dir = skill_dir.join(sub);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        fs::write(dir.join(".gitkeep"), "")?;
    }

    // The template must always produce a document the scanner accepts
    SkillDocument::from_dir(skill_dir)?;
    Ok(())
}

/// Fill the template placeholders
fn render_template(name: &str, options: &ScaffoldOptions) -> String {
    let mut content = SKILL_TEMPLATE
        .replace("my-skill", name)
        .replace("My Skill", &title_case(name));

    let author = options.author.trim();
    if !author.is_empty() {
        content = content.replace(AUTHOR_PLACEHOLDER, &yaml_quote(author));
    }

    let description = options.description.trim();
    if !description.is_empty() {
        content = content
            .replace(DESCRIPTION_PLACEHOLDER, &yaml_quote(description))
            .replace(SUMMARY_PLACEHOLDER, description);
    }

    content
}

/// `silence-detect` -> `Silence Detect`
fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Double-quoted YAML scalar
fn yaml_quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', " ");
    format!("\"{}\"", escaped)
}
