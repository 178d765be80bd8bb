//! Configuration types for the pool service

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind (e.g., "127.0.0.1")
    #[serde(default = "default_api_host")]
    pub host: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    3000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

/// Initial pool reserves, applied once at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Base asset (ETH) seeded into the pool
    #[serde(default = "default_eth_balance")]
    pub eth_balance: f64,

    /// Quote asset (USDC) seeded into the pool
    #[serde(default = "default_usdc_balance")]
    pub usdc_balance: f64,
}

fn default_eth_balance() -> f64 {
    1000.0
}

fn default_usdc_balance() -> f64 {
    1_000_000.0
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            eth_balance: default_eth_balance(),
            usdc_balance: default_usdc_balance(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listener settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Starting pool reserves
    #[serde(default)]
    pub pool: PoolConfig,
}

impl AppConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: AppConfig =
            serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject seed reserves the pool engine could never hold.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pool.eth_balance", self.pool.eth_balance),
            ("pool.usdc_balance", self.pool.usdc_balance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.pool.eth_balance, 1000.0);
        assert_eq!(config.pool.usdc_balance, 1_000_000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"api": {"port": 8080}}"#).unwrap();
        assert_eq!(parsed.api.port, 8080);
        assert_eq!(parsed.api.host, "127.0.0.1");
        assert_eq!(parsed.pool.eth_balance, 1000.0);
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = AppConfig::default();
        config.pool.usdc_balance = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.pool.usdc_balance = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/dex-config.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
