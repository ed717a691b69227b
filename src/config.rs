use crate::error::{FilterError, Result};
use crate::filter::IgnoreRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the ignore list, looked up in the working and home directories
pub const CONFIG_DIR: &str = ".muffet-filter";

/// File name of the ignore list inside [`CONFIG_DIR`]
pub const IGNORES_FILENAME: &str = "ignores.json";

/// Options controlling how a raw report is parsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Log diagnostics for invalid links
    #[serde(default)]
    pub verbose: bool,

    /// Accept error links with an empty url, replacing it with a placeholder
    #[serde(default)]
    pub ignore_empty_error_url: bool,
}

/// Configuration for a full filter run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Explicit ignore list file. When set, the file must exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignores_path: Option<PathBuf>,

    /// Directories searched, in order, for `.muffet-filter/ignores.json`
    /// when no explicit file is given
    #[serde(default = "default_search_dirs")]
    pub search_dirs: Vec<PathBuf>,

    /// Log parse diagnostics and every ignored link
    #[serde(default)]
    pub verbose: bool,

    /// Accept error links with an empty url
    #[serde(default)]
    pub ignore_empty_error_url: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignores_path: None,
            search_dirs: default_search_dirs(),
            verbose: false,
            ignore_empty_error_url: false,
        }
    }
}

impl FilterConfig {
    /// Options handed to the report parser
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            verbose: self.verbose,
            ignore_empty_error_url: self.ignore_empty_error_url,
        }
    }
}

/// Default search directories: the working directory, then the user's home
fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(home) = home_dir() {
        dirs.push(home);
    }
    dirs
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Location of the ignore list below `dir`
pub fn default_ignores_file(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR).join(IGNORES_FILENAME)
}

/// Resolve which ignore list file applies, if any
pub fn resolve_ignores_file(config: &FilterConfig) -> Result<Option<PathBuf>> {
    if let Some(path) = &config.ignores_path {
        if !path.is_file() {
            return Err(FilterError::IgnoreList {
                path: path.display().to_string(),
                reason: "file does not exist".to_string(),
            });
        }
        return Ok(Some(path.clone()));
    }

    let found = config
        .search_dirs
        .iter()
        .map(|dir| default_ignores_file(dir))
        .find(|candidate| candidate.is_file());

    if found.is_none() {
        ::log::debug!(
            "No {}/{} found in {:?}",
            CONFIG_DIR,
            IGNORES_FILENAME,
            config.search_dirs
        );
    }
    Ok(found)
}

/// Load the ignore rules for a run.
///
/// A missing default file means no rules. An explicitly requested file that is
/// missing, or any ignore file that is not a JSON array of rules, is an error.
pub fn load_ignore_list(config: &FilterConfig) -> Result<Vec<IgnoreRule>> {
    let Some(path) = resolve_ignores_file(config)? else {
        if config.verbose {
            ::log::info!("No ignore list found, keeping every error link");
        }
        return Ok(Vec::new());
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if config.ignores_path.is_none() => {
            ::log::debug!("Ignoring unreadable ignore list {}: {}", path.display(), e);
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(FilterError::IgnoreList {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    let rules: Vec<IgnoreRule> =
        serde_json::from_str(&contents).map_err(|e| FilterError::IgnoreList {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    if config.verbose {
        ::log::info!("Loaded {} ignore rules from {}", rules.len(), path.display());
    }
    Ok(rules)
}
