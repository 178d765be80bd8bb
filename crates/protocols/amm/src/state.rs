//! AMM State Types
//!
//! Pool reserves and the receipts returned by pool operations.

use dex_core::{format_price, Asset, PoolError, Quantity, TradeType};
use serde::Serialize;
use std::fmt;

use crate::calculator::calculate_spot_price;
use crate::constants::initial;

/// Reserves of the ETH/USDC pool.
///
/// Built through [`PoolState::new`] (or `Default` for the seed reserves), so
/// every instance holds finite, strictly positive balances and a `constant_k`
/// equal to their product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolState {
    eth_balance: f64,
    usdc_balance: f64,
    constant_k: f64,
}

impl PoolState {
    /// Build a state from raw balances, recomputing `constant_k`.
    ///
    /// `operation` names the caller for the internal error raised when the
    /// balances cannot be held.
    pub fn new(
        operation: &'static str,
        eth_balance: f64,
        usdc_balance: f64,
    ) -> Result<Self, PoolError> {
        for (asset, balance) in [(Asset::Eth, eth_balance), (Asset::Usdc, usdc_balance)] {
            if !balance.is_finite() || balance <= 0.0 {
                return Err(PoolError::internal(
                    operation,
                    format!("{} balance would become {}", asset, balance),
                ));
            }
        }

        let constant_k = eth_balance * usdc_balance;
        if !constant_k.is_finite() {
            return Err(PoolError::internal(operation, "constant product overflowed"));
        }

        let price = calculate_spot_price(eth_balance, usdc_balance);
        if !price.is_finite() || price <= 0.0 {
            return Err(PoolError::internal(
                operation,
                format!("pool price would become {}", price),
            ));
        }

        Ok(Self {
            eth_balance,
            usdc_balance,
            constant_k,
        })
    }

    pub fn eth_balance(&self) -> f64 {
        self.eth_balance
    }

    pub fn usdc_balance(&self) -> f64 {
        self.usdc_balance
    }

    pub fn constant_k(&self) -> f64 {
        self.constant_k
    }

    /// Current price in USDC per ETH
    pub fn price(&self) -> f64 {
        calculate_spot_price(self.eth_balance, self.usdc_balance)
    }

    /// Reserve of `asset`
    pub fn balance(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Eth => self.eth_balance,
            Asset::Usdc => self.usdc_balance,
        }
    }
}

impl Default for PoolState {
    fn default() -> Self {
        Self {
            eth_balance: initial::ETH_BALANCE,
            usdc_balance: initial::USDC_BALANCE,
            constant_k: initial::ETH_BALANCE * initial::USDC_BALANCE,
        }
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ETH: {} | USDC: {} | price: {}",
            self.eth_balance,
            self.usdc_balance,
            format_price(self.price())
        )
    }
}

/// Outcome of a successful liquidity deposit
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityReceipt {
    pub eth_added: Quantity,
    pub usdc_added: Quantity,
    /// Illustrative loss (percent) for a 50% price rise after the deposit
    pub impermanent_loss_pct: f64,
    /// Pool after the deposit
    pub pool: PoolState,
}

impl LiquidityReceipt {
    pub fn message(&self) -> String {
        format!(
            "added {} ETH and {} USDC to the pool",
            self.eth_added, self.usdc_added
        )
    }

    pub fn impermanent_loss_message(&self) -> String {
        format!(
            "potential impermanent loss with 50% ETH price increase: {:.2}%",
            self.impermanent_loss_pct
        )
    }
}

/// Outcome of an executed swap
#[derive(Debug, Clone, PartialEq)]
pub struct SwapReceipt {
    pub trade_type: TradeType,
    pub amount_in: Quantity,
    pub amount_out: f64,
    /// Pool after the swap
    pub pool: PoolState,
}

impl SwapReceipt {
    pub fn new_price(&self) -> f64 {
        self.pool.price()
    }

    pub fn message(&self) -> String {
        let out = self.trade_type.output_asset();
        let amount_out = format!("{:.*}", out.display_decimals(), self.amount_out);
        match self.trade_type {
            TradeType::Buy => format!("You paid {} USDC for {} ETH", self.amount_in, amount_out),
            TradeType::Sell => format!("You got {} USDC for {} ETH", amount_out, self.amount_in),
        }
    }
}

/// Projection of a swap against the current pool, without executing it
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub trade_type: TradeType,
    pub amount_in: Quantity,
    pub amount_out: f64,
    /// Pool price if the swap were executed
    pub projected_price: f64,
    /// Price change in percent; negative when the ETH price would rise
    pub price_impact_pct: f64,
}

impl SwapQuote {
    pub fn message(&self) -> String {
        let out = self.trade_type.output_asset();
        format!(
            "You will receive {:.*} {} for {} {}",
            out.display_decimals(),
            self.amount_out,
            out,
            self.amount_in,
            self.trade_type.input_asset()
        )
    }

    pub fn price_impact_display(&self) -> String {
        format!("{:.2}%", self.price_impact_pct)
    }
}
