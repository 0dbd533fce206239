//! Configuration resolution for kanon
//!
//! Service endpoints resolve with the following priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (~/.config/kanon/config.toml)
//! 4. Compiled default (fallback)
//!
//! The defaults mirror the original deployment, where both services sit
//! behind the same origin.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const API_URL_ENV: &str = "KANON_API_URL";
pub const CANONICAL_URL_ENV: &str = "KANON_CANONICAL_URL";

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_CANONICAL_URL: &str = "http://localhost:3000";

/// TOML config file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api_url: Option<String>,
    pub canonical_url: Option<String>,
}

/// Resolved service endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api_url: String,
    pub canonical_url: String,
}

/// Resolve both endpoints from the argument/environment/file/default
/// chain.
pub fn resolve_endpoints(
    cli_api_url: Option<&str>,
    cli_canonical_url: Option<&str>,
    file_config: &TomlConfig,
) -> Endpoints {
    Endpoints {
        api_url: resolve_url(
            cli_api_url,
            API_URL_ENV,
            file_config.api_url.as_deref(),
            DEFAULT_API_URL,
        ),
        canonical_url: resolve_url(
            cli_canonical_url,
            CANONICAL_URL_ENV,
            file_config.canonical_url.as_deref(),
            DEFAULT_CANONICAL_URL,
        ),
    }
}

fn resolve_url(
    cli_arg: Option<&str>,
    env_var_name: &str,
    file_value: Option<&str>,
    default: &str,
) -> String {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg {
        return url.to_string();
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(env_var_name) {
        if !url.trim().is_empty() {
            return url;
        }
    }

    // Priority 3: TOML config file
    if let Some(url) = file_value {
        return url.to_string();
    }

    // Priority 4: Compiled default
    default.to_string()
}

/// Load the config file from the platform config directory, if present.
///
/// A missing file is the normal case and yields the empty config; a
/// malformed file is ignored with a warning rather than aborting.
pub fn load_config_file() -> TomlConfig {
    match config_file_path() {
        Some(path) => load_config_from(&path),
        None => TomlConfig::default(),
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kanon").join("config.toml"))
}

fn load_config_from(path: &Path) -> TomlConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return TomlConfig::default(),
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_cli_argument_overrides_env_and_file() {
        std::env::set_var(API_URL_ENV, "http://env:1");
        let file_config = TomlConfig {
            api_url: Some("http://file:1".to_string()),
            canonical_url: None,
        };

        let endpoints = resolve_endpoints(Some("http://cli:1"), None, &file_config);
        assert_eq!(endpoints.api_url, "http://cli:1");

        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_env_fallback_when_no_cli_argument() {
        std::env::set_var(API_URL_ENV, "http://env:1");
        let file_config = TomlConfig {
            api_url: Some("http://file:1".to_string()),
            canonical_url: None,
        };

        let endpoints = resolve_endpoints(None, None, &file_config);
        assert_eq!(endpoints.api_url, "http://env:1");

        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_file_fallback_then_default() {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(CANONICAL_URL_ENV);

        let file_config = TomlConfig {
            api_url: Some("http://file:1".to_string()),
            canonical_url: None,
        };

        let endpoints = resolve_endpoints(None, None, &file_config);
        assert_eq!(endpoints.api_url, "http://file:1");
        assert_eq!(endpoints.canonical_url, DEFAULT_CANONICAL_URL);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://configured:9\"").unwrap();

        let config = load_config_from(file.path());
        assert_eq!(config.api_url.as_deref(), Some("http://configured:9"));
        assert_eq!(config.canonical_url, None);
    }

    #[test]
    fn test_missing_and_malformed_files_yield_default() {
        let config = load_config_from(Path::new("/nonexistent/kanon/config.toml"));
        assert!(config.api_url.is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = [not toml").unwrap();
        let config = load_config_from(file.path());
        assert!(config.api_url.is_none());
    }
}
