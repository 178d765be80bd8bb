//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Assets held by the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    /// Base asset
    Eth,
    /// Quote asset
    Usdc,
}

impl Asset {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Usdc => "USDC",
        }
    }

    /// Decimal places used when reporting amounts of this asset
    pub fn display_decimals(&self) -> usize {
        match self {
            Self::Eth => 6,
            Self::Usdc => 2,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Direction of a swap, from the trader's point of view on the base asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Pay USDC, receive ETH
    Buy,
    /// Pay ETH, receive USDC
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Asset the trader pays into the pool
    pub fn input_asset(&self) -> Asset {
        match self {
            Self::Buy => Asset::Usdc,
            Self::Sell => Asset::Eth,
        }
    }

    /// Asset the trader receives from the pool
    pub fn output_asset(&self) -> Asset {
        match self {
            Self::Buy => Asset::Eth,
            Self::Sell => Asset::Usdc,
        }
    }
}

impl FromStr for TradeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strictly positive, finite asset amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    /// Returns `None` for zero, negative, NaN, or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a price the way every response reports it (two decimals).
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
