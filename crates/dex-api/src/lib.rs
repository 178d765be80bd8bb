//! dex-api: HTTP API layer for the AMM pool service
//!
//! Exposes the pool engine over a small JSON API.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{ApiError, AppState};
