//! Configuration management for the Cotton Waste Billing Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CWB_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Billing defaults
    pub billing: BillingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; the in-memory store is used when absent
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BillingConfig {
    /// Prefix of generated bale numbers
    pub bale_prefix: String,

    /// GST applied to invoices that do not specify a percentage
    pub default_gst_percent: Decimal,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CWB_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("billing.bale_prefix", shared::bale::DEFAULT_BALE_PREFIX)?
            .set_default("billing.default_gst_percent", "5")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CWB_ prefix)
            .add_source(
                Environment::with_prefix("CWB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                min_connections: 2,
            },
            billing: BillingConfig::default(),
        }
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

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            bale_prefix: shared::bale::DEFAULT_BALE_PREFIX.to_string(),
            default_gst_percent: shared::DEFAULT_GST_PERCENT,
        }
    }
}
