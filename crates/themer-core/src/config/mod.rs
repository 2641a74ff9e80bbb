//! Configuration management for Themer.
//!
//! ## Configuration File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/themer/config.toml` |
//! | macOS | `~/Library/Application Support/com.themer.Themer/config.toml` |
//!
//! Every section is optional; missing keys take their defaults.
//!
//! ```toml
//! [general]
//! root = "/home/me/.themer"
//!
//! [scripts]
//! interpreter = "bash"
//!
//! [install]
//! target_dir = "/usr/local/bin"
//! link_name = "themer"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Main configuration struct for Themer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Control script settings
    pub scripts: ScriptsConfig,
    /// Installer settings
    pub install: InstallConfig,
}

/// General configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Install root holding `themes/` and `.theme_cache`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Control script configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Interpreter to run scripts with (None = execute the script itself)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
}

/// Installer configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Directory the entry command is symlinked into
    pub target_dir: PathBuf,
    /// Name of the symlink
    pub link_name: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("/usr/local/bin"),
            link_name: "themer".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// If the configuration file doesn't exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from the default location, falling back to the
    /// defaults (with a warning) when the file cannot be read or parsed.
    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load_from_or_default(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to the
    /// defaults (with a warning) when it cannot be read or parsed.
    #[must_use]
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Ignoring configuration at {}: {e}", path.display());
            Self::default()
        })
    }

    /// Save configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create config directory: {e}"))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| Error::ConfigError(format!("Failed to write config: {e}")))
    }

    /// Get the default configuration directory path.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "themer", "Themer")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the full path to the configuration file.
    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Resolve the install root.
    ///
    /// An explicit override wins, then `general.root`, then the platform
    /// data directory, then the current directory.
    #[must_use]
    pub fn install_root(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.general.root.clone())
            .or_else(|| {
                directories::ProjectDirs::from("com", "themer", "Themer")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.general.root.is_none());
        assert!(config.scripts.interpreter.is_none());
        assert_eq!(config.install.target_dir, PathBuf::from("/usr/local/bin"));
        assert_eq!(config.install.link_name, "themer");
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config").join("config.toml");

        let mut original = Config::default();
        original.general.root = Some(PathBuf::from("/opt/themer"));
        original.scripts.interpreter = Some("bash".to_string());
        original.save_to(&config_path).expect("save");

        let loaded = Config::load_from(&config_path).expect("load");

        assert_eq!(loaded.general.root, Some(PathBuf::from("/opt/themer")));
        assert_eq!(loaded.scripts.interpreter.as_deref(), Some("bash"));
        assert_eq!(loaded.install.link_name, "themer");
    }

    #[test]
    fn test_config_deserialization_partial() {
        let partial_toml = r#"
[install]
target_dir = "/home/me/bin"
"#;

        let config: Config = toml::from_str(partial_toml).expect("parse partial config");

        assert_eq!(config.install.target_dir, PathBuf::from("/home/me/bin"));
        assert_eq!(config.install.link_name, "themer");
        assert!(config.general.root.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("nope.toml")).expect("load");
        assert!(config.general.root.is_none());
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[general\nroot = ").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_load_or_default_ignores_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[install]\ntarget_dir = 42\n").unwrap();

        let config = Config::load_from_or_default(&path);
        assert_eq!(config.install.target_dir, PathBuf::from("/usr/local/bin"));

        std::fs::write(&path, "[install]\ntarget_dir = \"/home/me/bin\"\n").unwrap();
        let config = Config::load_from_or_default(&path);
        assert_eq!(config.install.target_dir, PathBuf::from("/home/me/bin"));
    }

    #[test]
    fn test_install_root_precedence() {
        let mut config = Config::default();
        config.general.root = Some(PathBuf::from("/from/config"));

        assert_eq!(
            config.install_root(Some(Path::new("/from/flag"))),
            PathBuf::from("/from/flag")
        );
        assert_eq!(config.install_root(None), PathBuf::from("/from/config"));
    }

    #[test]
    fn test_config_path() {
        let path = Config::config_path();
        assert!(
            path.ends_with("config.toml"),
            "Config path should end with config.toml"
        );
    }
}
