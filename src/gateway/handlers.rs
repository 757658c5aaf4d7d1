use crate::panel::{CensorOutcome, StreamOutcome};
use axum::{
    extract::{Form, FromRequest, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Json},
};
use chrono::Utc;

use super::{AppState, DestinationBody};

/// GET /health: liveness only, no upstream call
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /status.json: merged status, lock and destination view
pub(super) async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.panel.view(Utc::now()).await)
}

/// POST /censor_on
pub(super) async fn handle_censor_on(State(state): State<AppState>) -> impl IntoResponse {
    censor_response(state.panel.set_censorship(true, Utc::now()).await)
}

/// POST /censor_off
pub(super) async fn handle_censor_off(State(state): State<AppState>) -> impl IntoResponse {
    censor_response(state.panel.set_censorship(false, Utc::now()).await)
}

/// POST /start
pub(super) async fn handle_start(State(state): State<AppState>) -> impl IntoResponse {
    stream_response(state.panel.set_stream_running(true).await)
}

/// POST /stop
pub(super) async fn handle_stop(State(state): State<AppState>) -> impl IntoResponse {
    stream_response(state.panel.set_stream_running(false).await)
}

/// POST /destination: store a new stream key and reload the streaming service.
/// Accepts a urlencoded form or a JSON body.
pub(super) async fn handle_destination(
    State(state): State<AppState>,
    request: Request,
) -> impl IntoResponse {
    let destination = match parse_destination_body(request).await {
        Ok(body) => body,
        Err(e) => {
            let err = serde_json::json!({
                "error": format!("Invalid body: {e}. Expected field `key`")
            });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    match state.panel.set_destination_secret(&destination.key).await {
        Ok(update) => (StatusCode::OK, Json(serde_json::json!(update))),
        Err(error) => {
            tracing::error!(error = %error, "destination update failed");
            let err = serde_json::json!({"error": format!("destination update failed: {error}")});
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err))
        }
    }
}

async fn parse_destination_body(request: Request) -> Result<DestinationBody, String> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        Form::<DestinationBody>::from_request(request, &())
            .await
            .map(|Form(body)| body)
            .map_err(|rejection| rejection.body_text())
    } else {
        Json::<DestinationBody>::from_request(request, &())
            .await
            .map(|Json(body)| body)
            .map_err(|rejection| rejection.body_text())
    }
}

fn censor_response(outcome: CensorOutcome) -> (StatusCode, Json<CensorOutcome>) {
    let status = match &outcome {
        CensorOutcome::Applied { .. } => StatusCode::OK,
        CensorOutcome::Locked { .. } => StatusCode::LOCKED,
        CensorOutcome::PatchFailed { .. } => StatusCode::BAD_GATEWAY,
        CensorOutcome::StoreFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome))
}

fn stream_response(outcome: StreamOutcome) -> (StatusCode, Json<StreamOutcome>) {
    let status = match &outcome {
        StreamOutcome::Applied { .. } => StatusCode::OK,
        StreamOutcome::DestinationMissing => StatusCode::CONFLICT,
        StreamOutcome::PatchFailed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome))
}
