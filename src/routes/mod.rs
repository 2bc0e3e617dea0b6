//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the rendered index page at `/`, the color channel
//! at `/ws`, and everything else straight out of the public asset directory.

pub mod page;
pub mod ws;

use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus the current broadcast group size. 503 once the relay is gone.
async fn healthz(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.relay.member_count().await {
        Ok(clients) => Ok(Json(serde_json::json!({ "status": "ok", "clients": clients }))),
        Err(e) => {
            tracing::error!(error = %e, "healthz: relay unavailable");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
