//! Pool Engine
//!
//! Owns the pool reserves and applies deposits and swaps to them. Every
//! mutating operation computes a candidate [`PoolState`] first and commits it
//! only after all checks pass, so a failed call leaves the pool untouched.

use dex_core::{PoolConfig, PoolError, Quantity, TradeType};

use crate::calculator::{
    calculate_deposit_usdc_needed, calculate_impermanent_loss, calculate_price_impact,
    calculate_swap,
};
use crate::constants::liquidity;
use crate::state::{LiquidityReceipt, PoolState, SwapQuote, SwapReceipt};

/// Single ETH/USDC constant-product pool
#[derive(Debug, Clone, Default)]
pub struct PoolEngine {
    state: PoolState,
}

impl PoolEngine {
    /// Create an engine seeded with the given reserves
    pub fn new(eth_balance: f64, usdc_balance: f64) -> Result<Self, PoolError> {
        Ok(Self {
            state: PoolState::new("init", eth_balance, usdc_balance)?,
        })
    }

    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        Self::new(config.eth_balance, config.usdc_balance)
    }

    /// Current reserves
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Deposit both assets at the current pool ratio.
    pub fn add_liquidity(
        &mut self,
        eth_quantity: Quantity,
        usdc_quantity: Quantity,
    ) -> Result<LiquidityReceipt, PoolError> {
        let current_price = self.state.price();
        let expected_usdc = calculate_deposit_usdc_needed(current_price, eth_quantity.value());
        if (usdc_quantity.value() - expected_usdc).abs() > liquidity::RATIO_TOLERANCE_USDC {
            tracing::debug!(
                "Rejecting deposit of {} ETH / {} USDC, expected ~{:.2} USDC",
                eth_quantity,
                usdc_quantity,
                expected_usdc
            );
            return Err(PoolError::RatioMismatch {
                expected_usdc,
                eth_quantity: eth_quantity.value(),
            });
        }

        let updated = PoolState::new(
            "add_liquidity",
            self.state.eth_balance() + eth_quantity.value(),
            self.state.usdc_balance() + usdc_quantity.value(),
        )?;

        // Illustration only: priced from the pre-deposit price
        let new_price = current_price * liquidity::IL_PRICE_MULTIPLIER;
        let impermanent_loss_pct =
            calculate_impermanent_loss(new_price, eth_quantity.value(), usdc_quantity.value());

        self.state = updated;
        tracing::debug!("Liquidity added, pool now {}", self.state);

        Ok(LiquidityReceipt {
            eth_added: eth_quantity,
            usdc_added: usdc_quantity,
            impermanent_loss_pct,
            pool: self.state,
        })
    }

    /// Pay USDC into the pool and receive ETH.
    pub fn buy_asset(&mut self, usdc_quantity: Quantity) -> Result<SwapReceipt, PoolError> {
        self.execute(TradeType::Buy, usdc_quantity)
    }

    /// Pay ETH into the pool and receive USDC.
    pub fn sell_asset(&mut self, eth_quantity: Quantity) -> Result<SwapReceipt, PoolError> {
        self.execute(TradeType::Sell, eth_quantity)
    }

    /// Project a swap without touching the reserves.
    pub fn quote(
        &self,
        trade_type: TradeType,
        amount_in: Quantity,
    ) -> Result<SwapQuote, PoolError> {
        let (projected, amount_out) = self.project(trade_type, amount_in, "quote")?;
        let projected_price = projected.price();
        Ok(SwapQuote {
            trade_type,
            amount_in,
            amount_out,
            projected_price,
            price_impact_pct: calculate_price_impact(self.state.price(), projected_price),
        })
    }

    fn execute(
        &mut self,
        trade_type: TradeType,
        amount_in: Quantity,
    ) -> Result<SwapReceipt, PoolError> {
        let operation = match trade_type {
            TradeType::Buy => "buy_asset",
            TradeType::Sell => "sell_asset",
        };
        let (updated, amount_out) = self.project(trade_type, amount_in, operation)?;

        self.state = updated;
        tracing::debug!(
            "{}: {} {} in, {} {} out, pool now {}",
            operation,
            amount_in,
            trade_type.input_asset(),
            amount_out,
            trade_type.output_asset(),
            self.state
        );

        Ok(SwapReceipt {
            trade_type,
            amount_in,
            amount_out,
            pool: self.state,
        })
    }

    /// Reserves and output amount after swapping `amount_in` of the trade's
    /// input asset.
    fn project(
        &self,
        trade_type: TradeType,
        amount_in: Quantity,
        operation: &'static str,
    ) -> Result<(PoolState, f64), PoolError> {
        let input = trade_type.input_asset();
        let output = trade_type.output_asset();
        let step = calculate_swap(
            self.state.balance(input),
            self.state.balance(output),
            amount_in.value(),
        );

        let updated = match trade_type {
            TradeType::Buy => PoolState::new(operation, step.reserves_out, step.reserves_in)?,
            TradeType::Sell => PoolState::new(operation, step.reserves_in, step.reserves_out)?,
        };
        if !step.output.is_finite() {
            return Err(PoolError::internal(operation, "swap output is not finite"));
        }
        Ok((updated, step.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(value: f64) -> Quantity {
        Quantity::new(value).unwrap()
    }

    fn assert_invariant(engine: &PoolEngine) {
        let s = engine.state();
        assert!(s.eth_balance() > 0.0);
        assert!(s.usdc_balance() > 0.0);
        assert_eq!(s.constant_k(), s.eth_balance() * s.usdc_balance());
    }

    #[test]
    fn test_default_pool() {
        let engine = PoolEngine::default();
        assert_eq!(engine.state().eth_balance(), 1000.0);
        assert_eq!(engine.state().usdc_balance(), 1_000_000.0);
        assert_eq!(engine.state().price(), 1000.0);
        assert_invariant(&engine);
    }

    #[test]
    fn test_buy_asset_scenario() {
        let mut engine = PoolEngine::default();
        let receipt = engine.buy_asset(qty(1000.0)).unwrap();

        assert!((receipt.amount_out - 0.999001).abs() < 1e-6);
        assert_eq!(engine.state().usdc_balance(), 1_001_000.0);
        assert!((engine.state().eth_balance() - 999.000999).abs() < 1e-6);
        assert_eq!(format!("{:.2}", receipt.new_price()), "1002.00");
        assert_eq!(receipt.message(), "You paid 1000 USDC for 0.999001 ETH");
        assert_invariant(&engine);
    }

    #[test]
    fn test_buy_raises_price_and_never_drains() {
        for amount in [0.01, 1.0, 5_000.0, 1e7, 1e12] {
            let mut engine = PoolEngine::default();
            let before = engine.state();
            let receipt = engine.buy_asset(qty(amount)).unwrap();
            assert!(receipt.amount_out > 0.0);
            assert!(receipt.amount_out < before.eth_balance());
            assert!(receipt.new_price() > before.price());
            assert_invariant(&engine);
        }
    }

    #[test]
    fn test_sell_asset() {
        let mut engine = PoolEngine::default();
        let receipt = engine.sell_asset(qty(1.0)).unwrap();

        // 1e9 / 1001 = 999000.999..., so 999.000999 USDC out
        assert!((receipt.amount_out - 999.000999).abs() < 1e-5);
        assert_eq!(engine.state().eth_balance(), 1001.0);
        assert!(receipt.new_price() < 1000.0);
        assert_eq!(receipt.message(), "You got 999.00 USDC for 1 ETH");
        assert_invariant(&engine);
    }

    #[test]
    fn test_add_liquidity_matching_ratio() {
        let mut engine = PoolEngine::default();
        let receipt = engine.add_liquidity(qty(10.0), qty(10_000.0)).unwrap();

        assert_eq!(engine.state().eth_balance(), 1010.0);
        assert_eq!(engine.state().usdc_balance(), 1_010_000.0);
        assert_eq!(format!("{:.2}", receipt.pool.price()), "1000.00");
        assert_eq!(receipt.message(), "added 10 ETH and 10000 USDC to the pool");
        assert_eq!(
            receipt.impermanent_loss_message(),
            "potential impermanent loss with 50% ETH price increase: 0.00%"
        );
        assert_invariant(&engine);
    }

    #[test]
    fn test_add_liquidity_ratio_mismatch_leaves_pool() {
        let mut engine = PoolEngine::default();
        let before = engine.state();

        let err = engine.add_liquidity(qty(10.0), qty(5000.0)).unwrap_err();
        assert_eq!(
            err,
            PoolError::RatioMismatch {
                expected_usdc: 10_000.0,
                eth_quantity: 10.0
            }
        );
        assert_eq!(engine.state(), before);

        let err = engine.add_liquidity(qty(10.0), qty(10_001.0)).unwrap_err();
        assert_eq!(err.error_code(), "ratio_mismatch");
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_add_liquidity_within_tolerance() {
        let mut engine = PoolEngine::default();
        assert!(engine.add_liquidity(qty(10.0), qty(10_000.005)).is_ok());
        assert_invariant(&engine);
    }

    #[test]
    fn test_add_liquidity_after_price_move() {
        let mut engine = PoolEngine::default();
        engine.buy_asset(qty(50_000.0)).unwrap();
        let price = engine.state().price();

        assert!(engine.add_liquidity(qty(2.0), qty(2.0 * price)).is_ok());
        assert!((engine.state().price() - price).abs() < 1e-9);
        assert!(engine.add_liquidity(qty(2.0), qty(2.0 * price + 1.0)).is_err());
    }

    #[test]
    fn test_overflow_is_internal_and_not_committed() {
        let mut engine = PoolEngine::new(1e154, 1e154).unwrap();
        let before = engine.state();

        let err = engine.add_liquidity(qty(1e154), qty(1e154)).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.status_code(), 500);
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_huge_swaps_fail_without_draining() {
        for amount in [1e300, 1e308] {
            let mut engine = PoolEngine::default();
            let before = engine.state();

            let err = engine.buy_asset(qty(amount)).unwrap_err();
            assert!(err.is_internal());
            assert_eq!(engine.state(), before);

            let err = engine.sell_asset(qty(amount)).unwrap_err();
            assert!(err.is_internal());
            assert_eq!(engine.state(), before);

            assert!(engine.quote(TradeType::Buy, qty(amount)).unwrap_err().is_internal());
            assert!(engine.quote(TradeType::Sell, qty(amount)).unwrap_err().is_internal());
        }
    }

    #[test]
    fn test_extreme_swaps_keep_pool_usable() {
        for amount in [1e50, 1e100, 1e200, 1e300, 1e308] {
            for trade_type in [TradeType::Buy, TradeType::Sell] {
                let mut engine = PoolEngine::default();
                let before = engine.state();

                let result = match trade_type {
                    TradeType::Buy => engine.buy_asset(qty(amount)),
                    TradeType::Sell => engine.sell_asset(qty(amount)),
                };
                match result {
                    Ok(receipt) => {
                        let price = receipt.new_price();
                        assert!(price.is_finite() && price > 0.0);
                        assert!(engine.state().balance(trade_type.output_asset()) > 0.0);
                        assert_invariant(&engine);
                    }
                    Err(err) => {
                        assert!(err.is_internal());
                        assert_eq!(engine.state(), before);
                    }
                }

                // Whatever happened, later quotes stay finite
                let quote = engine.quote(TradeType::Sell, qty(1.0)).unwrap();
                assert!(quote.price_impact_pct.is_finite());
            }
        }
    }

    #[test]
    fn test_new_rejects_empty_reserves() {
        assert!(PoolEngine::new(0.0, 1000.0).is_err());
        let engine = PoolEngine::from_config(&PoolConfig::default()).unwrap();
        assert_eq!(engine.state(), PoolEngine::default().state());
    }

    #[test]
    fn test_quote_matches_trade() {
        let mut engine = PoolEngine::default();
        let before = engine.state();

        let quote = engine.quote(TradeType::Buy, qty(1000.0)).unwrap();
        assert_eq!(engine.state(), before);
        assert_eq!(quote.price_impact_display(), "-0.20%");

        let receipt = engine.buy_asset(qty(1000.0)).unwrap();
        assert_eq!(quote.amount_out, receipt.amount_out);
        assert_eq!(quote.projected_price, receipt.new_price());
    }

    #[test]
    fn test_quote_sell_matches_trade() {
        let mut engine = PoolEngine::default();
        let quote = engine.quote(TradeType::Sell, qty(3.0)).unwrap();
        assert!(quote.price_impact_pct > 0.0);
        assert_eq!(
            quote.message(),
            format!("You will receive {:.2} USDC for 3 ETH", quote.amount_out)
        );

        let receipt = engine.sell_asset(qty(3.0)).unwrap();
        assert_eq!(quote.amount_out, receipt.amount_out);
    }
}
