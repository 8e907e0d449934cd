//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Collection used when a caller does not name one.
pub const DEFAULT_COLLECTION: &str = "DefaultCollection";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Weaviate connection settings.
    pub weaviate: WeaviateConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Collection targeted when a call omits `collection`.
    pub default_collection: String,

    /// Deadline for a single tool call, in seconds.
    pub call_timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Weaviate connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct WeaviateConfig {
    /// `http` or `https`.
    pub scheme: String,

    /// Host and optional port, e.g. `localhost:8080`.
    pub host: String,

    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,

    /// Per-request timeout for the HTTP client, in seconds.
    pub request_timeout_secs: u64,
}

impl WeaviateConfig {
    /// Base URL without trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host.trim_end_matches('/'))
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for WeaviateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaviateConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_collection: DEFAULT_COLLECTION.to_string(),
            call_timeout_secs: 30,
        }
    }
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost:8080".to_string(),
            api_key: None,
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "Weaviate MCP Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            weaviate: WeaviateConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...); connection settings use `WEAVIATE_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(collection) = std::env::var("MCP_DEFAULT_COLLECTION") {
            if !collection.is_empty() {
                config.tools.default_collection = collection;
            }
        }

        if let Some(secs) = parse_env("MCP_CALL_TIMEOUT_SECS") {
            config.tools.call_timeout_secs = secs;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(scheme) = std::env::var("WEAVIATE_SCHEME") {
            config.weaviate.scheme = scheme;
        }

        if let Ok(host) = std::env::var("WEAVIATE_HOST") {
            config.weaviate.host = host;
        }

        if let Ok(api_key) = std::env::var("WEAVIATE_API_KEY") {
            config.weaviate.api_key = Some(api_key).filter(|k| !k.is_empty());
        }

        if let Some(secs) = parse_env("WEAVIATE_TIMEOUT_SECS") {
            config.weaviate.request_timeout_secs = secs;
        }

        config
    }

    /// Check values that cannot be caught when parsing.
    pub fn validate(&self) -> super::Result<()> {
        if !matches!(self.weaviate.scheme.as_str(), "http" | "https") {
            return Err(super::Error::config(format!(
                "WEAVIATE_SCHEME must be http or https, got '{}'",
                self.weaviate.scheme
            )));
        }
        if self.tools.call_timeout_secs == 0 {
            return Err(super::Error::config("MCP_CALL_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }
}

fn parse_env(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_collection_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DEFAULT_COLLECTION", "Articles");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.default_collection, "Articles");
        unsafe {
            std::env::remove_var("MCP_DEFAULT_COLLECTION");
        }
    }

    #[test]
    fn test_default_collection_fallback() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_DEFAULT_COLLECTION");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.default_collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_weaviate_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("WEAVIATE_HOST", "weaviate:8080");
            std::env::set_var("WEAVIATE_SCHEME", "https");
            std::env::set_var("WEAVIATE_API_KEY", "secret");
        }
        let config = Config::from_env();
        assert_eq!(config.weaviate.base_url(), "https://weaviate:8080");
        assert_eq!(config.weaviate.api_key.as_deref(), Some("secret"));
        unsafe {
            std::env::remove_var("WEAVIATE_HOST");
            std::env::remove_var("WEAVIATE_SCHEME");
            std::env::remove_var("WEAVIATE_API_KEY");
        }
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let weaviate = WeaviateConfig {
            api_key: Some("super_secret_key".to_string()),
            ..WeaviateConfig::default()
        };
        let debug_str = format!("{:?}", weaviate);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "Weaviate MCP Server");
        assert_eq!(config.tools.call_timeout_secs, 30);
        assert_eq!(config.weaviate.base_url(), "http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.weaviate.scheme = "ftp".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tools.call_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
