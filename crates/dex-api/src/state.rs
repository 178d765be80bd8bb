//! Application state shared across API handlers

use std::sync::Arc;

use amm::PoolEngine;
use dex_core::{AppConfig, PoolError};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors that can occur while setting up the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configured seed reserves rejected by the pool engine
    #[error("Invalid pool configuration: {0}")]
    InvalidPool(#[from] PoolError),

    /// Listener could not be bound or served
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    // Writers hold the lock across the whole read-modify-write of a trade
    pool: RwLock<PoolEngine>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::from_parts(AppConfig::default(), PoolEngine::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Result<Self, ApiError> {
        let pool = PoolEngine::from_config(&config.pool)?;
        Ok(Self::from_parts(config, pool))
    }

    fn from_parts(config: AppConfig, pool: PoolEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: RwLock::new(pool),
            }),
        }
    }

    /// Get current config
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Shared access for quotes and state reads
    pub async fn pool(&self) -> RwLockReadGuard<'_, PoolEngine> {
        self.inner.pool.read().await
    }

    /// Exclusive access for deposits and swaps
    pub async fn pool_mut(&self) -> RwLockWriteGuard<'_, PoolEngine> {
        self.inner.pool.write().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
