//! Skill document parsing and validation
//!
//! Each skill is a folder containing SKILL.md with YAML frontmatter

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use skillfind_types::Query;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name that marks a folder as a skill
pub const SKILL_FILE: &str = "SKILL.md";

/// Maximum allowed name length
pub const MAX_NAME_LENGTH: usize = 64;
/// Maximum allowed description length
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;
/// Maximum allowed compatibility note length
pub const MAX_COMPATIBILITY_LENGTH: usize = 500;

/// Skill metadata extracted from YAML frontmatter
#[derive(Debug, Clone, Deserialize)]
pub struct SkillMetadata {
    /// Skill name (lowercase letters, digits, single hyphens; equals folder name)
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    /// What the skill does and when to use it
    #[serde(deserialize_with = "scalar_text")]
    pub description: String,
    /// License identifier or note
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub license: Option<String>,
    /// Environment requirements
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub compatibility: Option<String>,
    /// Open-ended key/value block (author, version, parent, ...)
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, serde_yaml::Value>>,
}

/// Text of a YAML scalar. Unquoted `2024` or `true` are numbers and bools
/// to YAML but plain text to a skill author.
fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| D::Error::custom("expected a text value"))
}

fn optional_scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        value => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a text value")),
    }
}

/// A parsed and validated SKILL.md
#[derive(Debug, Clone)]
pub struct SkillDocument {
    /// Frontmatter fields
    pub metadata: SkillMetadata,
    /// Everything after the closing frontmatter fence
    pub body: String,
}

impl SkillDocument {
    /// Parse and validate document content without a folder check
    pub fn parse(content: &str) -> Result<Self> {
        let (metadata, body) = parse_skill_content(content)?;
        validate_metadata(&metadata)?;
        Ok(Self { metadata, body })
    }

    /// Parse and validate content that lives in a folder named `folder_name`
    pub fn parse_in_folder(content: &str, folder_name: &str) -> Result<Self> {
        let document = Self::parse(content)?;
        if document.metadata.name != folder_name {
            bail!(
                "Skill name '{}' does not match its folder '{}'",
                document.metadata.name,
                folder_name
            );
        }
        Ok(document)
    }

    /// Load SKILL.md from a skill directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let skill_file = dir.join(SKILL_FILE);

        if !skill_file.is_file() {
            return Err(anyhow!("{} not found in {:?}", SKILL_FILE, dir));
        }

        let content = fs::read_to_string(&skill_file)
            .with_context(|| format!("Failed to read {:?}", skill_file))?;

        let folder_name = folder_name(dir)?;

        Self::parse_in_folder(&content, &folder_name)
            .with_context(|| format!("Invalid skill at {:?}", skill_file))
    }

    /// Skill name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Skill description
    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    /// Whether the query hits the name, description or body
    pub fn matches(&self, query: &Query) -> bool {
        query.matches(&[self.name(), self.description(), &self.body])
    }
}

/// Last path component of a directory, resolving `.` and relative paths
fn folder_name(dir: &Path) -> Result<String> {
    let resolved = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Cannot determine folder name of {:?}", dir))
}

/// Parse skill content to extract frontmatter metadata and body
fn parse_skill_content(content: &str) -> Result<(SkillMetadata, String)> {
    let frontmatter_re =
        Regex::new(r"^(?:\x{FEFF})?---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n([\s\S]*))?$")
            .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    let captures = frontmatter_re
        .captures(content)
        .ok_or_else(|| anyhow!("No valid YAML frontmatter found"))?;

    let yaml_str = captures
        .get(1)
        .ok_or_else(|| anyhow!("Failed to extract frontmatter"))?
        .as_str();

    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let metadata: SkillMetadata =
        serde_yaml::from_str(yaml_str).with_context(|| "Failed to parse YAML frontmatter")?;

    Ok((metadata, body.to_string()))
}

/// Check a skill name against the naming convention
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("Skill name cannot be empty"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(anyhow!(
            "Skill name '{}' exceeds {} characters",
            name,
            MAX_NAME_LENGTH
        ));
    }

    let name_re = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
        .map_err(|e| anyhow!("Failed to compile name validation regex: {}", e))?;

    if !name_re.is_match(name) {
        return Err(anyhow!(
            "Skill name '{}' must contain only lowercase letters, numbers, and single hyphens, \
             and must not start or end with a hyphen",
            name
        ));
    }

    Ok(())
}

/// Validate skill metadata against the document convention
fn validate_metadata(metadata: &SkillMetadata) -> Result<()> {
    validate_name(&metadata.name)?;

    if metadata.description.trim().is_empty() {
        return Err(anyhow!("Skill description cannot be empty"));
    }

    let description_len = metadata.description.chars().count();
    if description_len > MAX_DESCRIPTION_LENGTH {
        return Err(anyhow!(
            "Skill '{}' description exceeds {} characters (was {})",
            metadata.name,
            MAX_DESCRIPTION_LENGTH,
            description_len
        ));
    }

    if let Some(compatibility) = &metadata.compatibility {
        let len = compatibility.chars().count();
        if len > MAX_COMPATIBILITY_LENGTH {
            return Err(anyhow!(
                "Skill '{}' compatibility exceeds {} characters (was {})",
                metadata.name,
                MAX_COMPATIBILITY_LENGTH,
                len
            ));
        }
    }

    Ok(())
}
