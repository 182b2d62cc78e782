use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 503 until the database answers.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = state.svc.db().ping().await;
    if let Err(ref e) = db {
        tracing::warn!(error = %e, "readiness check failed");
    }
    let status = if db.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = json!({
        "status": if db.is_ok() { "ready" } else { "unavailable" },
        "database": db.is_ok(),
        "storage_configured": state.storage.can_presign(),
        "jobs": state.jobs.stats(),
    });
    (status, Json(body))
}

pub async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "vitrine",
        "version": env!("CARGO_PKG_VERSION"),
        "schemas": state.svc.schema().schema_count(),
    }))
}
