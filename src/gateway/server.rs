use super::handlers::{
    handle_censor_off, handle_censor_on, handle_destination, handle_health, handle_start,
    handle_status, handle_stop,
};
use super::{AppState, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS};

use crate::config::Config;
use crate::panel::ControlPanel;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Run the control surface on `host:port`.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the control panel would be reachable off this machine.\n\
             Fix: use --host 127.0.0.1 (default) behind a reverse proxy, or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, ControlPanel::from_config(config)).await
}

/// Run the control surface from a pre-bound listener until Ctrl-C.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    panel: ControlPanel,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    print_gateway_banner(&format!("{host}:{actual_port}"), &panel);

    let app = build_app(AppState { panel });
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    Ok(())
}

fn print_gateway_banner(display_addr: &str, panel: &ControlPanel) {
    println!("Control panel listening on {display_addr}");
    println!("  GET  /status.json");
    println!("  POST /censor_on | /censor_off");
    println!("  POST /start | /stop");
    println!("  POST /destination");
    println!("  GET  /health");
    println!(
        "  Toggle cooldown: {}s",
        panel.guard().cooldown().as_secs()
    );
    if !panel.destination().is_configured() {
        println!("  Destination not configured, stream start is disabled");
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/status.json", get(handle_status))
        .route("/censor_on", post(handle_censor_on))
        .route("/censor_off", post(handle_censor_off))
        .route("/start", post(handle_start))
        .route("/stop", post(handle_stop))
        .route("/destination", post(handle_destination))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
