//! Layered configuration loading for `find-skill`

use anyhow::{Context, Result};
use skillfind_types::DiscoveryConfig;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Per-user and per-project settings directory
pub const CONFIG_DIR: &str = ".agent-skills";

/// File stem of every configuration layer; the extension picks the format
const CONFIG_STEM: &str = "config";

/// Prefix of environment overrides, e.g. `FIND_SKILL__GITHUB__ENABLED=false`
const ENV_PREFIX: &str = "FIND_SKILL";

/// Where configuration layers are looked up
#[derive(Debug, Clone, Default)]
pub struct ConfigLocations {
    /// Directory holding the running executable
    pub exe_dir: Option<PathBuf>,
    /// Nearest ancestor of the working directory containing `.git`
    pub project_root: Option<PathBuf>,
    /// User home directory
    pub home: Option<PathBuf>,
    /// File given with `--config`; must exist when set
    pub explicit: Option<PathBuf>,
}

impl ConfigLocations {
    /// Resolve the standard locations for this process
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let cwd = env::current_dir().ok();
        Self {
            exe_dir: env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            project_root: cwd.as_deref().and_then(find_project_root),
            home: dirs::home_dir(),
            explicit,
        }
    }

    /// Candidate file stems, lowest precedence first
    fn layers(&self) -> Vec<PathBuf> {
        let mut layers = Vec::new();
        if let Some(dir) = &self.exe_dir {
            layers.push(dir.join(CONFIG_STEM));
        }
        if let Some(root) = &self.project_root {
            layers.push(root.join(CONFIG_DIR).join(CONFIG_STEM));
        }
        if let Some(home) = &self.home {
            layers.push(home.join(CONFIG_DIR).join(CONFIG_STEM));
        }
        layers
    }
}

/// Nearest ancestor of `start` (inclusive) that contains `.git`
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Load configuration with layered approach (later layers override earlier
/// ones):
/// 1. `<exe dir>/config.*`
/// 2. `<project root>/.agent-skills/config.*`
/// 3. `~/.agent-skills/config.*`
/// 4. `--config` file
/// 5. `FIND_SKILL__SECTION__KEY` environment variables
///
/// Any failure falls back to defaults with a warning.
pub fn load_config(locations: &ConfigLocations) -> DiscoveryConfig {
    match build_config(locations, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {:#}", e);
            DiscoveryConfig::default()
        }
    }
}

/// Build the layered configuration. `env_source` replaces the process
/// environment when given.
pub fn build_config(
    locations: &ConfigLocations,
    env_source: Option<config::Map<String, String>>,
) -> Result<DiscoveryConfig> {
    let mut builder = config::Config::builder();

    for layer in locations.layers() {
        debug!("Config layer: {}.*", layer.display());
        builder = builder.add_source(
            config::File::with_name(&layer.to_string_lossy()).required(false),
        );
    }

    if let Some(explicit) = &locations.explicit {
        debug!("Config layer: {}", explicit.display());
        builder = builder.add_source(config::File::from(explicit.as_path()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("local_paths")
            .with_list_parse_key("github.repos")
            .source(env_source),
    );

    let config: DiscoveryConfig = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;
    Ok(config)
}
