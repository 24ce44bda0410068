//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$WHENCE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/whence/config.toml`
//! 3. `~/.whence/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git_dir>/whence/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., branch names must be valid refnames).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Largest accepted `fuzzy_window_days` (about ten years).
pub const MAX_FUZZY_WINDOW_DAYS: u32 = 3650;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_branch_names = ["main", "master", "trunk"]
/// fuzzy_window_days = 45
/// web_host = "https://github.example.com"
/// browser = "firefox"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Branch names recognized as a mainline
    pub default_branch_names: Option<Vec<BranchName>>,

    /// Half-width of the fuzzy match window in days
    pub fuzzy_window_days: Option<u32>,

    /// Base URL of the hosting service
    pub web_host: Option<String>,

    /// Application used to open URLs (system default if unset)
    pub browser: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_names(self.default_branch_names.as_deref())?;
        validate_window(self.fuzzy_window_days)?;
        validate_host(self.web_host.as_deref())?;

        if let Some(browser) = &self.browser {
            if browser.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "browser cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// default_branch = "production"
/// fuzzy_window_days = 14
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Mainline branch; disables inference when set
    pub default_branch: Option<BranchName>,

    /// Branch names recognized as a mainline
    pub default_branch_names: Option<Vec<BranchName>>,

    /// Half-width of the fuzzy match window in days
    pub fuzzy_window_days: Option<u32>,

    /// Base URL of the hosting service
    pub web_host: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_names(self.default_branch_names.as_deref())?;
        validate_window(self.fuzzy_window_days)?;
        validate_host(self.web_host.as_deref())
    }
}

fn validate_names(names: Option<&[BranchName]>) -> Result<(), ConfigError> {
    if let Some(names) = names {
        if names.is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_branch_names cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_window(days: Option<u32>) -> Result<(), ConfigError> {
    if let Some(days) = days {
        if days == 0 || days > MAX_FUZZY_WINDOW_DAYS {
            return Err(ConfigError::InvalidValue(format!(
                "fuzzy_window_days must be between 1 and {}, got {}",
                MAX_FUZZY_WINDOW_DAYS, days
            )));
        }
    }
    Ok(())
}

fn validate_host(host: Option<&str>) -> Result<(), ConfigError> {
    if let Some(host) = host {
        if !(host.starts_with("https://") || host.starts_with("http://")) {
            return Err(ConfigError::InvalidValue(format!(
                "web_host must start with http:// or https://, got '{}'",
                host
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.default_branch_names.is_none());
            assert!(config.fuzzy_window_days.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn parses_all_fields() {
            let config: GlobalConfig = toml::from_str(
                r#"
                default_branch_names = ["trunk", "main"]
                fuzzy_window_days = 45
                web_host = "https://github.example.com"
                browser = "firefox"
                "#,
            )
            .unwrap();

            assert_eq!(config.fuzzy_window_days, Some(45));
            assert_eq!(config.default_branch_names.as_ref().unwrap().len(), 2);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn invalid_branch_name_rejected_at_parse() {
            let parsed: Result<GlobalConfig, _> =
                toml::from_str(r#"default_branch_names = ["bad..name"]"#);
            assert!(parsed.is_err());
        }

        #[test]
        fn window_bounds() {
            for days in [0, MAX_FUZZY_WINDOW_DAYS + 1] {
                let config = GlobalConfig {
                    fuzzy_window_days: Some(days),
                    ..Default::default()
                };
                assert!(config.validate().is_err(), "{days} should be rejected");
            }
        }

        #[test]
        fn host_needs_scheme() {
            let config = GlobalConfig {
                web_host: Some("github.com".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn blank_browser_rejected() {
            let config = GlobalConfig {
                browser: Some("  ".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn default_branch_parses() {
            let config: RepoConfig = toml::from_str(r#"default_branch = "production""#).unwrap();
            assert_eq!(
                config.default_branch.as_ref().map(|b| b.as_str()),
                Some("production")
            );
        }

        #[test]
        fn empty_name_list_rejected() {
            let config = RepoConfig {
                default_branch_names: Some(Vec::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn browser_is_global_only() {
            let parsed: Result<RepoConfig, _> = toml::from_str(r#"browser = "firefox""#);
            assert!(parsed.is_err());
        }
    }
}
