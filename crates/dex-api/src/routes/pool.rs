//! Pool endpoints: deposits, swaps, quotes, and state inspection

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dex_core::{PoolError, TradeType};
use serde_json::Value;

use crate::dto::{
    AddLiquidityRequest, AddLiquidityResponse, ApiError, BuyAssetRequest, PoolStateResponse,
    QuantityField, QuoteRequest, QuoteResponse, SellAssetRequest, SwapResponse,
};
use crate::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Create pool routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-liquidity", post(add_liquidity))
        .route("/buy-asset", post(buy_asset))
        .route("/sell-asset", post(sell_asset))
        .route("/quote", post(get_quote))
        .route("/pool-state", get(get_pool_state))
}

/// Map an engine error to a response. Internal causes are logged, not returned.
fn pool_error(operation: &str, err: PoolError) -> (StatusCode, Json<ApiError>) {
    if err.is_internal() {
        tracing::error!("Error in {}: {}", operation, err);
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::internal()));
    }

    tracing::debug!("Rejected {}: {}", operation, err);
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST),
        Json(ApiError::new(err.error_code(), err.to_string())),
    )
}

fn rejected_body(operation: &str, rejection: JsonRejection) -> (StatusCode, Json<ApiError>) {
    pool_error(
        operation,
        PoolError::validation(format!("invalid JSON body: {}", rejection.body_text())),
    )
}

/// POST /add-liquidity - Deposit ETH and USDC at the current pool ratio
async fn add_liquidity(
    State(state): State<AppState>,
    payload: Result<Json<AddLiquidityRequest>, JsonRejection>,
) -> ApiResult<AddLiquidityResponse> {
    const OP: &str = "add-liquidity";
    let Json(request) = payload.map_err(|e| rejected_body(OP, e))?;

    let eth = QuantityField::parse(request.eth_quantity.as_ref());
    let usdc = QuantityField::parse(request.usdc_quantity.as_ref());
    if eth == QuantityField::Missing || usdc == QuantityField::Missing {
        return Err(pool_error(
            OP,
            PoolError::validation("both ethQuantity and usdcQuantity are required"),
        ));
    }
    let (Some(eth), Some(usdc)) = (eth.valid(), usdc.valid()) else {
        return Err(pool_error(
            OP,
            PoolError::validation("quantities must be positive numbers"),
        ));
    };

    let receipt = state
        .pool_mut()
        .await
        .add_liquidity(eth, usdc)
        .map_err(|e| pool_error(OP, e))?;

    Ok(Json(receipt.into()))
}

/// POST /buy-asset - Swap USDC for ETH
async fn buy_asset(
    State(state): State<AppState>,
    payload: Result<Json<BuyAssetRequest>, JsonRejection>,
) -> ApiResult<SwapResponse> {
    const OP: &str = "buy-asset";
    let Json(request) = payload.map_err(|e| rejected_body(OP, e))?;

    let usdc = QuantityField::parse(request.usdc_quantity.as_ref())
        .valid()
        .ok_or_else(|| pool_error(OP, PoolError::validation("valid USDC quantity is required")))?;

    let receipt = state
        .pool_mut()
        .await
        .buy_asset(usdc)
        .map_err(|e| pool_error(OP, e))?;

    Ok(Json(receipt.into()))
}

/// POST /sell-asset - Swap ETH for USDC
async fn sell_asset(
    State(state): State<AppState>,
    payload: Result<Json<SellAssetRequest>, JsonRejection>,
) -> ApiResult<SwapResponse> {
    const OP: &str = "sell-asset";
    let Json(request) = payload.map_err(|e| rejected_body(OP, e))?;

    let eth = QuantityField::parse(request.eth_quantity.as_ref())
        .valid()
        .ok_or_else(|| pool_error(OP, PoolError::validation("valid ETH quantity is required")))?;

    let receipt = state
        .pool_mut()
        .await
        .sell_asset(eth)
        .map_err(|e| pool_error(OP, e))?;

    Ok(Json(receipt.into()))
}

/// POST /quote - Project a swap without executing it
async fn get_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApiResult<QuoteResponse> {
    const OP: &str = "quote";
    let Json(request) = payload.map_err(|e| rejected_body(OP, e))?;

    let trade_type = match &request.trade_type {
        Some(Value::String(s)) => s.parse::<TradeType>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        pool_error(
            OP,
            PoolError::validation("valid tradeType (buy or sell) is required"),
        )
    })?;

    let (field, message) = match trade_type {
        TradeType::Buy => (
            &request.usdc_quantity,
            "valid USDC quantity is required for buy",
        ),
        TradeType::Sell => (
            &request.eth_quantity,
            "valid ETH quantity is required for sell",
        ),
    };
    let amount_in = QuantityField::parse(field.as_ref())
        .valid()
        .ok_or_else(|| pool_error(OP, PoolError::validation(message)))?;

    let quote = state
        .pool()
        .await
        .quote(trade_type, amount_in)
        .map_err(|e| pool_error(OP, e))?;

    Ok(Json(quote.into()))
}

/// GET /pool-state - Current reserves and price
async fn get_pool_state(State(state): State<AppState>) -> Json<PoolStateResponse> {
    Json(state.pool().await.state().into())
}
