//! Configuration management for Redmine MCP
//!
//! Connection settings come from the process environment (after an optional
//! `.env` file) and may be seeded from a YAML file. Environment variables win
//! over file values. Every setting is required; when any is missing the error
//! lists all of them so the operator can fix the setup in one pass.

use secrecy::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the Redmine base URL
pub const ENV_URL: &str = "REDMINE_URL";
/// Environment variable holding the Redmine API key
pub const ENV_API_KEY: &str = "REDMINE_API_KEY";
/// Environment variable holding the basic-auth username
pub const ENV_USERNAME: &str = "REDMINE_USERNAME";
/// Environment variable holding the basic-auth password
pub const ENV_PASSWORD: &str = "REDMINE_PASSWORD";

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings were not provided
    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingSettings {
        /// Names of every missing variable, in a stable order
        names: Vec<&'static str>,
    },

    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Expected keys are url, api_key, username and password")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field that has an invalid value
        field: String,
        /// The invalid value that was provided
        value: String,
        /// Helpful hint about how to fix the issue
        hint: String,
    },
}

/// Settings as they may appear in a YAML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Redmine base URL
    pub url: Option<String>,
    /// Redmine API key
    pub api_key: Option<String>,
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
}

impl ConfigFile {
    /// Read and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Connection settings for a Redmine instance
///
/// `Debug` output never shows the API key or the password.
#[derive(Debug)]
pub struct RedmineConfig {
    /// Base URL without a trailing slash
    pub url: String,
    /// API key sent as `X-Redmine-API-Key`
    pub api_key: Secret<String>,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: Secret<String>,
}

impl RedmineConfig {
    /// Build a configuration from explicit values, validating the URL
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            url: normalize_url(url.into())?,
            api_key: Secret::new(api_key.into()),
            username: username.into(),
            password: Secret::new(password.into()),
        })
    }

    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load configuration, optionally seeded from a YAML file
    ///
    /// A `.env` file in the working directory is applied first when present.
    /// Environment variables override values from the YAML file.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let file = match config_path {
            Some(path) => {
                tracing::debug!("Reading configuration file {}", path.display());
                ConfigFile::load(path)?
            }
            None => ConfigFile::default(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Resolve every setting from a lookup function layered over a file
    ///
    /// Empty values count as missing.
    pub fn from_sources<F>(file: ConfigFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut resolve = |key: &'static str, fallback: Option<String>| {
            let value = lookup(key)
                .or(fallback)
                .filter(|value| !value.trim().is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let url = resolve(ENV_URL, file.url);
        let api_key = resolve(ENV_API_KEY, file.api_key);
        let username = resolve(ENV_USERNAME, file.username);
        let password = resolve(ENV_PASSWORD, file.password);

        if !missing.is_empty() {
            return Err(ConfigError::MissingSettings { names: missing });
        }

        Self::new(url, api_key, username, password)
    }
}

fn normalize_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        field: "url".to_string(),
        value: raw.clone(),
        hint: format!("Expected an absolute URL such as https://redmine.example.com ({e})"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: "url".to_string(),
            value: raw,
            hint: "Only http and https URLs are supported".to_string(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_all_settings_present() {
        let config = RedmineConfig::from_sources(
            ConfigFile::default(),
            lookup_from(&[
                (ENV_URL, "https://redmine.example.com/"),
                (ENV_API_KEY, "secret-key"),
                (ENV_USERNAME, "alice"),
                (ENV_PASSWORD, "hunter2"),
            ]),
        )
        .unwrap();

        assert_eq!(config.url, "https://redmine.example.com");
        assert_eq!(config.api_key.expose_secret(), "secret-key");
        assert_eq!(config.username, "alice");
        assert_eq!(config.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_missing_settings_are_all_listed() {
        let err = RedmineConfig::from_sources(
            ConfigFile::default(),
            lookup_from(&[(ENV_URL, "https://redmine.example.com"), (ENV_PASSWORD, "")]),
        )
        .unwrap_err();

        match err {
            ConfigError::MissingSettings { names } => {
                assert_eq!(names, vec![ENV_API_KEY, ENV_USERNAME, ENV_PASSWORD]);
            }
            other => panic!("Expected MissingSettings, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_settings_message() {
        let err = ConfigError::MissingSettings {
            names: vec![ENV_URL, ENV_API_KEY],
        };
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: REDMINE_URL, REDMINE_API_KEY"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = RedmineConfig::new("not a url", "k", "u", "p").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "url"));

        let err = RedmineConfig::new("ftp://redmine.example.com", "k", "u", "p").unwrap_err();
        assert!(err.to_string().contains("http and https"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config =
            RedmineConfig::new("https://redmine.example.com", "secret-key", "alice", "hunter2")
                .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_yaml_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "url: https://file.example.com\napi_key: file-key\nusername: file-user\npassword: file-pass"
        )
        .unwrap();

        let parsed = ConfigFile::load(file.path()).unwrap();
        let config =
            RedmineConfig::from_sources(parsed, lookup_from(&[(ENV_USERNAME, "env-user")]))
                .unwrap();

        assert_eq!(config.url, "https://file.example.com");
        assert_eq!(config.api_key.expose_secret(), "file-key");
        assert_eq!(config.username, "env-user");
    }

    #[test]
    fn test_yaml_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "url: [unclosed").unwrap();

        let err = ConfigFile::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigFile::load(Path::new("/nonexistent/redmine.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var(ENV_URL, "http://localhost:3000");
        std::env::set_var(ENV_API_KEY, "env-key");
        std::env::set_var(ENV_USERNAME, "env-user");
        std::env::set_var(ENV_PASSWORD, "env-pass");

        let config = RedmineConfig::from_env();

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);

        let config = config.unwrap();
        assert_eq!(config.url, "http://localhost:3000");
        assert_eq!(config.username, "env-user");
    }

    #[test]
    #[serial]
    fn test_from_env_fails_fast_when_unset() {
        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);

        let err = RedmineConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_URL));
        assert!(err.to_string().contains(ENV_PASSWORD));
    }
}
