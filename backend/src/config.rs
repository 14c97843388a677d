//! Server configuration.
//!
//! Settings come from an optional `exohunt.toml` file and are then overridden
//! by environment variables:
//!
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8080)
//! - `PREDICTION_API_URL`: base URL of the remote prediction service
//! - `PREDICTION_TIMEOUT_SECS`: request timeout (default: 30)
//! - `CONFIDENCE_POLICY`: `direct` or `disposition`

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::ConfidencePolicy;

pub const CONFIG_FILE_NAME: &str = "exohunt.toml";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Full configuration of the HTTP server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub prediction: PredictionSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

/// Bind address settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote prediction service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSettings {
    /// Base URL; prediction requests are refused when unset
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub policy: ConfidencePolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PredictionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the first `exohunt.toml` found in the current directory,
    /// `backend/` or the parent directory; defaults when none exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("'{}' is not a valid port number", port),
            })?;
        }
        if let Some(url) = lookup("PREDICTION_API_URL") {
            let url = url.trim().to_string();
            self.prediction.base_url = if url.is_empty() { None } else { Some(url) };
        }
        if let Some(secs) = lookup("PREDICTION_TIMEOUT_SECS") {
            self.prediction.timeout_secs = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PREDICTION_TIMEOUT_SECS".to_string(),
                message: format!("'{}' is not a whole number of seconds", secs),
            })?;
        }
        if let Some(policy) = lookup("CONFIDENCE_POLICY") {
            self.classifier.policy = policy.parse().map_err(|message| ConfigError::InvalidValue {
                key: "CONFIDENCE_POLICY".to_string(),
                message,
            })?;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "server.host".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.prediction.base_url, None);
        assert_eq!(config.prediction.timeout(), Duration::from_secs(30));
        assert_eq!(config.classifier.policy, ConfidencePolicy::DirectConfidence);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
[server]
port = 9000

[classifier]
policy = "disposition_label"
"#;
        let config = ServerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.classifier.policy, ConfidencePolicy::DispositionLabel);
        assert_eq!(config.prediction.timeout_secs, 30);
    }

    #[test]
    fn test_parse_error() {
        let err = ServerConfig::from_toml_str("[server]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[prediction]\nbase_url = \"http://localhost:5000\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.prediction.base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.prediction.timeout_secs, 5);
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file("/nonexistent/exohunt.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::default()
            .with_overrides(lookup(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "3000"),
                ("PREDICTION_API_URL", "https://models.example.org"),
                ("CONFIDENCE_POLICY", "disposition"),
            ]))
            .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.prediction.base_url.as_deref(),
            Some("https://models.example.org")
        );
        assert_eq!(config.classifier.policy, ConfidencePolicy::DispositionLabel);
    }

    #[test]
    fn test_invalid_overrides() {
        let err = ServerConfig::default()
            .with_overrides(lookup(&[("PORT", "99999")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));

        let err = ServerConfig::default()
            .with_overrides(lookup(&[("CONFIDENCE_POLICY", "vibes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_blank_url_clears_service() {
        let mut config = ServerConfig::default();
        config.prediction.base_url = Some("http://x".to_string());
        let config = config
            .with_overrides(lookup(&[("PREDICTION_API_URL", " ")]))
            .unwrap();
        assert_eq!(config.prediction.base_url, None);
    }
}
