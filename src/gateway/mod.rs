//! Axum-based HTTP control surface with body limits and timeouts.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /status.json`: merged view model
//! - `POST /censor_on`, `POST /censor_off`: cooldown-gated
//! - `POST /start`, `POST /stop`
//! - `POST /destination`: form or JSON field `key`, empty key clears

mod handlers;
mod server;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::panel::ControlPanel;

/// Maximum request body size (64KB) -- prevents memory exhaustion
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) -- prevents slow-loris attacks
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub panel: ControlPanel,
}

/// `POST /destination` body (form or JSON)
#[derive(serde::Deserialize, serde::Serialize)]
pub struct DestinationBody {
    #[serde(default, alias = "yt_key")]
    pub key: String,
}
