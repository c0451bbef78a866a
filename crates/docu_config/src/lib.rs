//! Configuration management for Docuscribe
//!
//! Resolves the backend base URL and server settings from, in increasing
//! precedence: built-in defaults, `.docuscribe/config.toml`, `.env.local`,
//! and the `SERVER_BACKEND_URL` process variable.

use docu_common::{DocuError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the backend base URL
pub const BACKEND_URL_VAR: &str = "SERVER_BACKEND_URL";

/// Workspace-relative location of the TOML config file
pub const CONFIG_FILE: &str = ".docuscribe/config.toml";

/// Workspace-relative location of the dotenv file
pub const ENV_FILE: &str = ".env.local";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace root the config was resolved from (not in TOML)
    #[serde(skip)]
    pub root: PathBuf,

    /// Backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// MCP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend configuration ([backend])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

fn default_backend_url() -> String {
    "http://localhost:9002".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

impl BackendConfig {
    /// Parsed base URL; only absolute http(s) URLs are accepted
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url).map_err(|e| {
            DocuError::ConfigError(format!("Invalid backend URL '{}': {}", self.url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DocuError::ConfigError(format!(
                "Backend URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

/// MCP server configuration ([server])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,
}

fn default_server_name() -> String {
    "Docuscribe".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Logging configuration ([logging])
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            backend: BackendConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from workspace root and the process environment
    pub fn load(workspace_root: &Path) -> Result<Self> {
        Self::load_with_env(workspace_root, std::env::var(BACKEND_URL_VAR).ok())
    }

    /// Load configuration with an explicit `SERVER_BACKEND_URL` value
    ///
    /// `.env.local` is read without touching the process environment.
    pub fn load_with_env(workspace_root: &Path, backend_url: Option<String>) -> Result<Self> {
        let config_path = workspace_root.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| DocuError::ConfigError(format!("Failed to read config: {}", e)))?;

            toml::from_str::<Config>(&content)
                .map_err(|e| DocuError::ConfigError(format!("Failed to parse config: {}", e)))?
        } else {
            Config::default()
        };
        config.root = workspace_root.to_path_buf();

        if let Some(url) = read_env_file(&workspace_root.join(ENV_FILE), BACKEND_URL_VAR)? {
            tracing::debug!(file = ENV_FILE, "Backend URL taken from env file");
            config.backend.url = url;
        }

        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            config.backend.url = url;
        }

        config.backend.base_url()?;
        Ok(config)
    }
}

/// Look up a single key in a dotenv file, if the file exists
fn read_env_file(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| DocuError::ConfigError(format!("Failed to read {}: {}", ENV_FILE, e)))?;

    let mut found = None;
    for entry in entries {
        let (name, value) = entry
            .map_err(|e| DocuError::ConfigError(format!("Failed to parse {}: {}", ENV_FILE, e)))?;
        if name == key {
            found = Some(value);
        }
    }
    Ok(found)
}
