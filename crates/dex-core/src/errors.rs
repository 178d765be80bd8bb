//! Error types for the pool service

use thiserror::Error;

/// Core errors that can occur in the service
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by pool operations.
///
/// None of these are produced after a state mutation has been committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    /// Missing, non-numeric, or non-positive request field
    #[error("{message}")]
    Validation { message: String },

    /// Liquidity deposit does not match the current pool ratio
    #[error(
        "USDC quantity must match pool ratio (expected ~{expected_usdc:.2} USDC for {eth_quantity} ETH)"
    )]
    RatioMismatch { expected_usdc: f64, eth_quantity: f64 },

    /// Arithmetic produced a state the pool cannot hold
    #[error("{operation} failed: {reason}")]
    Internal {
        operation: &'static str,
        reason: String,
    },
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

impl PoolError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Internal {
            operation,
            reason: reason.into(),
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::RatioMismatch { .. } => "ratio_mismatch",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::RatioMismatch { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_error_codes() {
        let err = PoolError::validation("valid USDC quantity is required");
        assert_eq!(err.error_code(), "validation_error");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "valid USDC quantity is required");

        let err = PoolError::RatioMismatch {
            expected_usdc: 10_000.0,
            eth_quantity: 10.0,
        };
        assert_eq!(err.error_code(), "ratio_mismatch");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "USDC quantity must match pool ratio (expected ~10000.00 USDC for 10 ETH)"
        );

        let err = PoolError::internal("buy_asset", "eth balance is not finite");
        assert_eq!(err.status_code(), 500);
        assert!(err.is_internal());
    }
}
