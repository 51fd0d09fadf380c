//! Configuration management for the Wood Traceability Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WTP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// EU TRACES registry configuration
    pub traces: TracesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Storage backend kind ("json-file" or "memory")
    pub backend: String,

    /// Directory holding the JSON collection files
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TracesConfig {
    /// Remote registry endpoint; the built-in reference table is used when unset
    pub api_endpoint: Option<String>,

    /// API key for the remote registry
    pub api_key: Option<String>,

    /// Artificial delay for built-in lookups, in milliseconds
    pub simulated_latency_ms: u64,

    /// Overall lookup timeout, in milliseconds
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WTP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "json-file")?
            .set_default("storage.data_dir", "data")?
            .set_default("traces.simulated_latency_ms", 0)?
            .set_default("traces.timeout_ms", 10_000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WTP_ prefix)
            .add_source(
                Environment::with_prefix("WTP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Whether the server runs in the development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
