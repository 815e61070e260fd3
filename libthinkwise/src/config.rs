//! Configuration management for ThinkWise
//!
//! Everything has a default: a missing config file is not an error, it just
//! means the defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV: &str = "THINKWISE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long the simulated backend takes to answer a login or register
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory downloads are written to. `~` is expanded.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_simulated_delay_ms() -> u64 {
    1000
}

fn default_output_dir() -> String {
    "~/Downloads".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AuthConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

impl ExportConfig {
    /// Output directory with `~` expanded
    pub fn resolved_output_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir).to_string())
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if no file exists
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("thinkwise").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.auth.simulated_delay_ms, 1000);
        assert_eq!(config.auth.simulated_delay(), Duration::from_secs(1));
        assert_eq!(config.export.output_dir, "~/Downloads");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml("[auth]\nsimulated_delay_ms = 5\n").unwrap();
        assert_eq!(config.auth.simulated_delay_ms, 5);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml("[auth]\nsimulated_delay_ms = \"soon\"\n").unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config"));
    }

    #[test]
    fn test_output_dir_tilde_expansion() {
        let export = ExportConfig {
            output_dir: "~/thinkwise-exports".to_string(),
        };
        let resolved = export.resolved_output_dir();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with("thinkwise-exports"));
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[export]\noutput_dir = \"/tmp/tw\"").unwrap();

        std::env::set_var(CONFIG_ENV, file.path());
        let config = Config::load().unwrap();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(config.export.output_dir, "/tmp/tw");
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_ENV, dir.path().join("absent.toml"));
        let config = Config::load().unwrap();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(config, Config::default());
    }
}
