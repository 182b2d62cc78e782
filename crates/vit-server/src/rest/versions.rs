use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use vit_core::entities::AppVersion;
use vit_core::inputs::CreateAppVersionInput;

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{JsonObject, validate_into};
use crate::ops;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<Vec<AppVersion>>, ApiError> {
    Ok(Json(state.svc.list_app_versions(&app_id).await?))
}

pub async fn latest(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<Option<AppVersion>>, ApiError> {
    Ok(Json(state.svc.latest_app_version(&app_id).await?))
}

/// The app id comes from the path; one in the body is overwritten.
pub async fn create(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    actor: Actor,
    JsonObject(mut body): JsonObject,
) -> Result<(StatusCode, Json<AppVersion>), ApiError> {
    body.insert("app_id".into(), Value::String(app_id));
    let input: CreateAppVersionInput = validate_into(&state, Value::Object(body))?;
    let version = ops::create_app_version(&state, actor.as_deref(), input).await?;
    Ok((StatusCode::CREATED, Json(version)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppVersion>, ApiError> {
    Ok(Json(state.svc.get_app_version(&id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_app_version(actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
