//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! git-whence has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$WHENCE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/whence/config.toml`
//! 3. `~/.whence/config.toml`
//!
//! # Repo Config Location
//!
//! `<git_dir>/whence/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use whence::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("window: {} days", config.fuzzy_window_days());
//! println!("host: {}", config.web_host());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::types::BranchName;

/// Recognized mainline names when none are configured.
pub const DEFAULT_BRANCH_NAMES: [&str; 2] = ["main", "master"];

/// Half-width of the fuzzy match window when none is configured.
pub const DEFAULT_FUZZY_WINDOW_DAYS: u32 = 30;

/// Hosting service used for URLs when none is configured.
pub const DEFAULT_WEB_HOST: &str = "https://github.com";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo overrides global,
/// global overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if present)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed,
    /// or validated. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let global_path = Self::find_global();
        let repo_path = git_dir
            .map(Self::repo_config_path)
            .filter(|path| path.exists());

        Self::load_from(global_path.as_deref(), repo_path.as_deref())
    }

    /// Load configuration from explicit file paths.
    pub fn load_from(
        global_path: Option<&Path>,
        repo_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let global: GlobalConfig = match global_path {
            Some(path) => read_toml(path)?,
            None => GlobalConfig::default(),
        };
        let repo: Option<RepoConfig> = repo_path.map(read_toml::<RepoConfig>).transpose()?;

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Config {
            global,
            repo,
            global_path: global_path.map(Path::to_path_buf),
            repo_path: repo_path.map(Path::to_path_buf),
        })
    }

    /// Build a configuration from already-parsed layers.
    pub fn from_parts(global: GlobalConfig, repo: Option<RepoConfig>) -> Self {
        Config {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    /// First existing global config file.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("WHENCE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("whence/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".whence/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the repo config file for a given git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("whence/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Explicitly configured mainline branch, if any.
    pub fn default_branch(&self) -> Option<&BranchName> {
        self.repo.as_ref().and_then(|r| r.default_branch.as_ref())
    }

    /// Branch names recognized as a mainline.
    ///
    /// Defaults to `main` and `master`.
    pub fn default_branch_names(&self) -> Vec<BranchName> {
        let configured = self
            .repo
            .as_ref()
            .and_then(|r| r.default_branch_names.clone())
            .or_else(|| self.global.default_branch_names.clone());

        configured.unwrap_or_else(|| {
            DEFAULT_BRANCH_NAMES
                .iter()
                .filter_map(|name| BranchName::new(*name).ok())
                .collect()
        })
    }

    /// Half-width of the fuzzy match window in days.
    ///
    /// Defaults to 30.
    pub fn fuzzy_window_days(&self) -> u32 {
        self.repo
            .as_ref()
            .and_then(|r| r.fuzzy_window_days)
            .or(self.global.fuzzy_window_days)
            .unwrap_or(DEFAULT_FUZZY_WINDOW_DAYS)
    }

    /// Base URL of the hosting service, without a trailing slash.
    ///
    /// Defaults to `https://github.com`.
    pub fn web_host(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.web_host.as_deref())
            .or(self.global.web_host.as_deref())
            .unwrap_or(DEFAULT_WEB_HOST)
            .trim_end_matches('/')
    }

    /// Application used to open URLs, if configured.
    pub fn browser(&self) -> Option<&str> {
        self.global.browser.as_deref()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
