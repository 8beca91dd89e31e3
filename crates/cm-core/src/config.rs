//! Configuration management
//!
//! Settings are read in the following priority order:
//! 1. Environment variables
//! 2. `contact-manager.toml` config file
//! 3. Defaults
//!
//! `${VAR_NAME}` references inside the config file are expanded from the
//! environment before parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// Default config file looked up by [`Config::load`]
pub const CONFIG_FILE: &str = "contact-manager.toml";

/// Main configuration for contact-manager
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// In-memory REST backend configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Contact service client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Edit form validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port for the HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Allowed CORS origins (e.g., ["http://localhost:4200"])
    /// If unset, any origin is allowed
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,

    /// JSON file with the contacts the store starts with
    #[serde(default)]
    pub seed_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            allowed_origins: None,
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server exposing `/api/contacts`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Client config pointing at `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Quiet window before validation messages are recomputed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ValidationConfig {
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_api_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    800
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment
    ///
    /// Unknown variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file
    ///
    /// Environment variables still override file values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let mut cfg: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        cfg.apply_env_overrides();

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Load configuration from the default path
    ///
    /// Falls back to environment variables only when `contact-manager.toml`
    /// does not exist in the current directory.
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Ok(Self::from_env())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    /// Override settings with environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid API_PORT: {}", port),
            }
        }
        if let Ok(origins) = std::env::var("API_ALLOWED_ORIGINS") {
            self.api.allowed_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        if let Ok(path) = std::env::var("CONTACTS_SEED_PATH") {
            if !path.is_empty() {
                self.api.seed_path = Some(path);
            }
        }

        if let Ok(base_url) = std::env::var("CONTACTS_BASE_URL") {
            if !base_url.is_empty() {
                self.client.base_url = base_url;
            }
        }
        if let Ok(timeout) = std::env::var("CONTACTS_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(t) => self.client.timeout_secs = t,
                Err(_) => tracing::warn!("Ignoring invalid CONTACTS_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(debounce) = std::env::var("VALIDATION_DEBOUNCE_MS") {
            match debounce.parse() {
                Ok(ms) => self.validation.debounce_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid VALIDATION_DEBOUNCE_MS: {}", debounce),
            }
        }

        self.sanitize();
    }

    /// Replace values that would make the client unusable
    fn sanitize(&mut self) {
        if self.client.timeout_secs == 0 {
            tracing::warn!(
                "Request timeout of 0 seconds is not allowed, using {}",
                default_timeout_secs()
            );
            self.client.timeout_secs = default_timeout_secs();
        }
    }
}
