//! Command-line arguments of the `find-skill` and `make-skill` binaries

use clap::Parser;
use skillfind_discovery::DEFAULT_LIMIT;
use skillfind_logging::LogFormat;
use skillfind_skills::expand_tilde;
use std::path::PathBuf;

/// Find agent skills in local folders and on GitHub
#[derive(Debug, Parser)]
#[command(name = "find-skill", version, about)]
pub struct FindArgs {
    /// What the skill should do, e.g. "detect silence"
    pub query: String,

    /// Only search local skill folders
    #[arg(long, default_value_t = false)]
    pub local_only: bool,

    /// Print results as a JSON array
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the full SKILL.md of every result
    #[arg(long, default_value_t = false)]
    pub fetch: bool,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Extra configuration file, applied over the discovered ones
    #[arg(long, env = "FIND_SKILL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (RUST_LOG wins when set)
    #[arg(long, env = "FIND_SKILL_LOG", default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Log output format: text or json
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub log_format: LogFormat,
}

/// Create a new skill folder from the built-in template
#[derive(Debug, Parser)]
#[command(name = "make-skill", version, about)]
pub struct MakeArgs {
    /// Skill name: lowercase letters, digits and single hyphens
    pub name: String,

    /// Parent directory of the new skill
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output: PathBuf,

    /// Author recorded in the skill metadata
    #[arg(short, long)]
    pub author: Option<String>,

    /// One-line description of the skill
    #[arg(short, long)]
    pub description: Option<String>,

    /// Log level or filter directive (RUST_LOG wins when set)
    #[arg(long, env = "MAKE_SKILL_LOG", default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Log output format: text or json
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub log_format: LogFormat,
}

impl MakeArgs {
    /// Parent directory of the new skill, with a leading `~` expanded
    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(&self.output.to_string_lossy())
    }
}
