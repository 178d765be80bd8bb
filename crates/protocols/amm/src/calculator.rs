//! AMM Calculator
//!
//! Swap math using constant product formula (x * y = k).

/// Result of pushing `input_amount` into one side of a constant-product pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapStep {
    /// Reserve of the input asset after the swap
    pub reserves_in: f64,
    /// Reserve of the output asset after the swap
    pub reserves_out: f64,
    /// Amount of the output asset leaving the pool
    pub output: f64,
}

/// Calculate swap output using constant product formula
///
/// Formula: new_out = (reserves_in * reserves_out) / (reserves_in + input);
/// output = reserves_out - new_out
pub fn calculate_swap(reserves_in: f64, reserves_out: f64, input_amount: f64) -> SwapStep {
    let product = reserves_in * reserves_out;
    let updated_in = reserves_in + input_amount;
    let updated_out = product / updated_in;
    SwapStep {
        reserves_in: updated_in,
        reserves_out: updated_out,
        output: reserves_out - updated_out,
    }
}

/// Calculate spot price in USDC per ETH
pub fn calculate_spot_price(eth_balance: f64, usdc_balance: f64) -> f64 {
    usdc_balance / eth_balance
}

/// Calculate price impact as percentage.
///
/// Positive when the price falls, negative when it rises.
pub fn calculate_price_impact(old_price: f64, new_price: f64) -> f64 {
    (old_price - new_price) / old_price * 100.0
}

/// USDC a deposit of `eth_quantity` must carry to keep the pool price unchanged
pub fn calculate_deposit_usdc_needed(current_price: f64, eth_quantity: f64) -> f64 {
    eth_quantity * current_price
}

/// Illustrative impermanent loss for a deposit, in percent.
///
/// Both the held value and the post-move position value are priced as
/// `eth_amount * new_price + usdc_amount`; the reported figure therefore does
/// not model the pool rebalancing the position.
pub fn calculate_impermanent_loss(new_price: f64, eth_amount: f64, usdc_amount: f64) -> f64 {
    let new_eth_value = eth_amount * new_price;
    let new_usdc_value = usdc_amount;
    let new_total_value = new_eth_value + new_usdc_value;
    let hold_value = eth_amount * new_price + usdc_amount;
    (hold_value - new_total_value) / hold_value * 100.0
}
