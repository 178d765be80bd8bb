//! Constant-Product Pool Implementation
//!
//! This crate implements a single ETH/USDC liquidity pool priced by the
//! x * y = k invariant: deposits, swaps in both directions, and read-only
//! swap quotes.

pub mod calculator;
pub mod constants;
pub mod pool;
pub mod state;

// Re-exports
pub use calculator::{calculate_price_impact, calculate_spot_price, calculate_swap, SwapStep};
pub use constants::{initial, liquidity};
pub use pool::PoolEngine;
pub use state::{LiquidityReceipt, PoolState, SwapQuote, SwapReceipt};
