//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/foxmarks/foxmarks.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `FOXMARKS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{LengthCheck, DEFAULT_ROOTS};

/// Unified configuration for foxmarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Firefox profile (or profiles root) to search for bookmark backups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
    /// Top-level containers to flatten, by title or root marker ("*" = all)
    pub roots: Vec<String>,
    /// Handling of a header length that differs from the decompressed size
    pub length_check: LengthCheck,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile_dir: None,
            roots: DEFAULT_ROOTS.iter().map(|r| r.to_string()).collect(),
            length_check: LengthCheck::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub profile_dir: Option<PathBuf>,
    pub roots: Option<Vec<String>>,
    pub length_check: Option<LengthCheck>,
}

/// Get the XDG config directory for foxmarks.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "foxmarks").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("foxmarks.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`, leaving the input as is on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(dir) = &self.profile_dir {
            let expanded = expand_env_vars(dir.to_string_lossy().as_ref());
            self.profile_dir = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value; lists are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            profile_dir: overlay
                .profile_dir
                .clone()
                .or_else(|| self.profile_dir.clone()),
            roots: overlay.roots.clone().unwrap_or_else(|| self.roots.clone()),
            length_check: overlay.length_check.unwrap_or(self.length_check),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_layers(global.as_deref(), config_file)
    }

    /// Load from explicit layer files (global, then local), then env vars.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        if let Some(path) = local {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FOXMARKS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FOXMARKS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("roots")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("profile_dir") {
            settings.profile_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get::<Vec<String>>("roots") {
            settings.roots = val;
        }
        if let Ok(val) = config.get_string("length_check") {
            settings.length_check = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("FOXMARKS_LENGTH_CHECK: {message}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# foxmarks configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/foxmarks/foxmarks.toml
#   File:   --config <path>
#   Env:    FOXMARKS_* environment variables (FOXMARKS_ROOTS is comma-separated)

# Firefox profile or profiles root searched for bookmarkbackups/*.jsonlz4
# (default: the platform's Firefox profiles directory)
# profile_dir = "~/.mozilla/firefox"

# Top-level bookmark containers to flatten, by title or root marker
# (bookmarksMenuFolder, toolbarFolder, unfiledBookmarksFolder, mobileFolder).
# "*" selects all of them.
# roots = ["Bookmark Menu", "bookmarksMenuFolder"]

# Header length vs. decompressed size: "ignore", "warn" or "strict"
# length_check = "warn"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
