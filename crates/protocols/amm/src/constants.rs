//! AMM Constants
//!
//! Seed reserves and tolerances for the ETH/USDC pool.

/// Reserves the pool starts with
pub mod initial {
    /// ETH in the pool at startup
    pub const ETH_BALANCE: f64 = 1000.0;

    /// USDC in the pool at startup (price 1000 USDC/ETH)
    pub const USDC_BALANCE: f64 = 1_000_000.0;
}

/// Liquidity deposit parameters
pub mod liquidity {
    /// Largest absolute USDC deviation from the pool ratio accepted on deposit
    pub const RATIO_TOLERANCE_USDC: f64 = 0.01;

    /// Price multiplier used for the impermanent-loss illustration (+50%)
    pub const IL_PRICE_MULTIPLIER: f64 = 1.5;
}
