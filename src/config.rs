// Configuration module for ldfq
// This module handles loading and parsing configuration from ~/.config/ldfq/config.toml

mod types;

pub use types::{ClipboardBackend, Config, HttpConfig, QueryConfig, default_prefixes};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/ldfq/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", config_path);

    if !config_path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!(
                "Config parsed: {} start fragments, {} queries",
                config.query.start_fragments.len(),
                config.query.queries.len()
            );
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/ldfq/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ldfq")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("absent.toml"));

        assert!(result.warning.is_none());
        assert_eq!(result.config.clipboard.backend, ClipboardBackend::Auto);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clipboard]\nbackend = \"osc52\"").unwrap();

        let result = load_config_from(file.path());

        assert!(result.warning.is_none());
        assert_eq!(result.config.clipboard.backend, ClipboardBackend::Osc52);
    }

    #[test]
    fn test_malformed_file_falls_back_with_warning() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clipboard\nbackend = \"auto\"").unwrap();

        let result = load_config_from(file.path());

        let warning = result.warning.expect("malformed config should warn");
        assert!(warning.starts_with("Invalid config"));
        assert_eq!(result.config.clipboard.backend, ClipboardBackend::Auto);
        assert_eq!(result.config.http.page_limit, 100);
    }

    #[test]
    fn test_config_path_is_stable() {
        let path = get_config_path();
        assert_eq!(path, get_config_path());
        let path_str = path.to_string_lossy();
        assert!(path_str.ends_with("ldfq/config.toml") || path_str.ends_with("ldfq\\config.toml"));
    }
}
