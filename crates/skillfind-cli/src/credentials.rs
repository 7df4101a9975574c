//! GitHub token lookup

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{find_project_root, CONFIG_DIR};

/// Variables holding a GitHub token, in lookup order
pub const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

const DOTENV_FILE: &str = ".env";

/// Resolve a token for this process: environment first, then the first
/// `.env` file found in the working directory, `~/.agent-skills/`, the
/// project root or the executable directory.
///
/// `.env` values are read, never exported into the environment.
pub fn resolve_token() -> Option<String> {
    if let Some(token) = token_from_lookup(|key| env::var(key).ok()) {
        debug!("Using GitHub token from environment");
        return Some(token);
    }

    let cwd = env::current_dir().ok();
    let candidates = dotenv_candidates(
        cwd.as_deref(),
        dirs::home_dir().as_deref(),
        cwd.as_deref().and_then(find_project_root).as_deref(),
        env::current_exe()
            .ok()
            .as_deref()
            .and_then(Path::parent),
    );
    token_from_dotenv(&candidates)
}

/// First non-blank value among [`TOKEN_VARS`]
pub fn token_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// `.env` locations in search order
pub fn dotenv_candidates(
    cwd: Option<&Path>,
    home: Option<&Path>,
    project_root: Option<&Path>,
    exe_dir: Option<&Path>,
) -> Vec<PathBuf> {
    [
        cwd.map(|dir| dir.join(DOTENV_FILE)),
        home.map(|dir| dir.join(CONFIG_DIR).join(DOTENV_FILE)),
        project_root.map(|dir| dir.join(DOTENV_FILE)),
        exe_dir.map(|dir| dir.join(DOTENV_FILE)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Token from the first existing file among `candidates`. Later files are not
/// consulted even when the first one holds no token.
pub fn token_from_dotenv(candidates: &[PathBuf]) -> Option<String> {
    let path = candidates.iter().find(|path| path.is_file())?;
    debug!("Reading GitHub token from {}", path.display());

    let entries = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    let mut values = Vec::new();
    for entry in entries {
        match entry {
            Ok(pair) => values.push(pair),
            Err(e) => warn!("Skipping malformed line in {}: {}", path.display(), e),
        }
    }

    token_from_lookup(|key| {
        values
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_order_and_blank_values() {
        let vars: HashMap<&str, &str> = [("GITHUB_TOKEN", "  "), ("GH_TOKEN", "gh-tok")].into();
        let token = token_from_lookup(|key| vars.get(key).map(|v| (*v).to_string()));
        assert_eq!(token.as_deref(), Some("gh-tok"));

        let vars: HashMap<&str, &str> = [("GITHUB_TOKEN", "main"), ("GH_TOKEN", "gh-tok")].into();
        let token = token_from_lookup(|key| vars.get(key).map(|v| (*v).to_string()));
        assert_eq!(token.as_deref(), Some("main"));

        assert_eq!(token_from_lookup(|_| None), None);
    }

    #[test]
    fn test_candidate_order() {
        let candidates = dotenv_candidates(
            Some(Path::new("/work")),
            Some(Path::new("/home/me")),
            None,
            Some(Path::new("/usr/local/bin")),
        );
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/work/.env"),
                PathBuf::from("/home/me/.agent-skills/.env"),
                PathBuf::from("/usr/local/bin/.env"),
            ]
        );
    }

    #[test]
    fn test_first_existing_file_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join(".env"), "# comment\nOTHER=1\n").unwrap();
        fs::write(second.path().join(".env"), "GITHUB_TOKEN=second\n").unwrap();

        let candidates = vec![
            first.path().join(".env"),
            second.path().join(".env"),
        ];
        assert_eq!(token_from_dotenv(&candidates), None);
    }

    #[test]
    fn test_dotenv_token() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env"),
            "GITHUB_TOKEN=\"\"\nGH_TOKEN='from-file'\n",
        )
        .unwrap();

        let candidates = vec![
            dir.path().join("missing").join(".env"),
            dir.path().join(".env"),
        ];
        assert_eq!(token_from_dotenv(&candidates).as_deref(), Some("from-file"));
    }
}
