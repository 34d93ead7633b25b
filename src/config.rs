// Local configuration store: a single JSON file under the user's home
// directory holding the server URL, the bearer token and the currently
// selected project/environment ids.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const CONFIG_DIR_NAME: &str = ".envoy";
const CONFIG_FILE_NAME: &str = "config.json";

/// Fallback server URL when neither the config file nor the
/// `ENVOY_SERVER_URL` environment variable specifies one.
pub const DEFAULT_SERVER_URL: &str = "https://envoy.webiliti.com";

/// Environment variable consulted when the config file has no server URL.
pub const SERVER_URL_ENV: &str = "ENVOY_SERVER_URL";

/// Persisted CLI state. All fields are optional; an absent token means
/// "logged out".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Path of the config file: `~/.envoy/config.json`.
pub fn config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

impl Config {
    /// Load the config from the default location. A missing file yields
    /// an empty config rather than an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file missing, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Write the config to the default location, creating the directory
    /// on first use with owner-only permissions.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create config directory {}", dir.display()))?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
                }
            }
        }

        let data = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Resolve the server base URL: config file first, then the
    /// `ENVOY_SERVER_URL` environment variable, then the built-in default.
    pub fn server_url(&self) -> String {
        if let Some(url) = &self.server_url {
            if !url.is_empty() {
                return url.clone();
            }
        }
        if let Ok(url) = env::var(SERVER_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        DEFAULT_SERVER_URL.to_string()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Store a new token and persist immediately.
    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        self.save()
    }

    /// Remove the stored token and persist immediately.
    pub fn clear_token(&mut self) -> Result<()> {
        self.token = None;
        self.save()
    }

    pub fn set_project(&mut self, id: &str) -> Result<()> {
        self.project = Some(id.to_string());
        self.save()
    }

    pub fn clear_project(&mut self) -> Result<()> {
        self.project = None;
        self.save()
    }

    pub fn set_environment(&mut self, id: &str) -> Result<()> {
        self.environment = Some(id.to_string());
        self.save()
    }

    pub fn clear_environment(&mut self) -> Result<()> {
        self.environment = None;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::load_from(&path).unwrap();
        assert!(config.server_url.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            server_url: Some("https://example.com".into()),
            token: Some("abc".into()),
            project: Some("p-1".into()),
            environment: None,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server_url.as_deref(), Some("https://example.com"));
        assert_eq!(loaded.token.as_deref(), Some("abc"));
        assert_eq!(loaded.project.as_deref(), Some("p-1"));
        assert!(loaded.environment.is_none());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let config = Config {
            token: Some("abc".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"token":"abc"}"#);
    }

    #[test]
    fn config_url_takes_priority() {
        let config = Config {
            server_url: Some("https://from-config".into()),
            ..Default::default()
        };
        assert_eq!(config.server_url(), "https://from-config");
    }

    #[test]
    fn default_url_when_unset() {
        let config = Config::default();
        if env::var(SERVER_URL_ENV).is_err() {
            assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        }
    }

    #[test]
    fn empty_token_reads_as_none() {
        let config = Config {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    fn parses_empty_object() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        assert!(parsed.token.is_none());
    }
}
