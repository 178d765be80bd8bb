//! Data Transfer Objects for API requests and responses

use amm::{LiquidityReceipt, PoolState, SwapQuote, SwapReceipt};
use dex_core::{format_price, Quantity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned with every non-200 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }

    /// Generic 500 body; the cause is only logged
    pub fn internal() -> Self {
        Self::new("internal_error", "internal server error")
    }
}

/// A request field that should carry a positive number.
///
/// Bodies are parsed loosely so that a wrong type on one field reports a
/// validation message instead of a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityField {
    Missing,
    Invalid,
    Valid(Quantity),
}

impl QuantityField {
    /// Only JSON numbers are accepted; numeric strings count as invalid.
    pub fn parse(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(Quantity::new)
                .map_or(Self::Invalid, Self::Valid),
            Some(_) => Self::Invalid,
        }
    }

    pub fn valid(self) -> Option<Quantity> {
        match self {
            Self::Valid(q) => Some(q),
            _ => None,
        }
    }
}

/// POST /add-liquidity request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLiquidityRequest {
    #[serde(default)]
    pub eth_quantity: Option<Value>,
    #[serde(default)]
    pub usdc_quantity: Option<Value>,
}

/// POST /buy-asset request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyAssetRequest {
    #[serde(default)]
    pub usdc_quantity: Option<Value>,
}

/// POST /sell-asset request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellAssetRequest {
    #[serde(default)]
    pub eth_quantity: Option<Value>,
}

/// POST /quote request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub trade_type: Option<Value>,
    #[serde(default)]
    pub eth_quantity: Option<Value>,
    #[serde(default)]
    pub usdc_quantity: Option<Value>,
}

/// Pool snapshot embedded in the add-liquidity response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStateDto {
    pub eth_balance: f64,
    pub usdc_balance: f64,
    pub current_price: String,
}

impl From<&PoolState> for PoolStateDto {
    fn from(pool: &PoolState) -> Self {
        Self {
            eth_balance: pool.eth_balance(),
            usdc_balance: pool.usdc_balance(),
            current_price: format_price(pool.price()),
        }
    }
}

/// POST /add-liquidity response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLiquidityResponse {
    pub message: String,
    pub impermanent_loss: String,
    pub pool_state: PoolStateDto,
}

impl From<LiquidityReceipt> for AddLiquidityResponse {
    fn from(receipt: LiquidityReceipt) -> Self {
        Self {
            message: receipt.message(),
            impermanent_loss: receipt.impermanent_loss_message(),
            pool_state: (&receipt.pool).into(),
        }
    }
}

/// POST /buy-asset and /sell-asset response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub message: String,
    pub new_price: String,
}

impl From<SwapReceipt> for SwapResponse {
    fn from(receipt: SwapReceipt) -> Self {
        Self {
            message: receipt.message(),
            new_price: format_price(receipt.new_price()),
        }
    }
}

/// POST /quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub message: String,
    pub price_impact: String,
}

impl From<SwapQuote> for QuoteResponse {
    fn from(quote: SwapQuote) -> Self {
        Self {
            message: quote.message(),
            price_impact: quote.price_impact_display(),
        }
    }
}

/// GET /pool-state response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStateResponse {
    pub eth_balance: f64,
    pub usdc_balance: f64,
    pub constant_k: f64,
    pub current_price: String,
}

impl From<PoolState> for PoolStateResponse {
    fn from(pool: PoolState) -> Self {
        Self {
            eth_balance: pool.eth_balance(),
            usdc_balance: pool.usdc_balance(),
            constant_k: pool.constant_k(),
            current_price: format_price(pool.price()),
        }
    }
}
