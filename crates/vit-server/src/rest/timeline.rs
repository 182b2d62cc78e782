use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use vit_core::entities::TimelineEvent;
use vit_core::inputs::{CreateTimelineEventInput, UpdateTimelineEventInput};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{JsonObject, ValidatedJson, validate_into};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<Vec<TimelineEvent>>, ApiError> {
    Ok(Json(state.svc.list_timeline(&app_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    actor: Actor,
    JsonObject(mut body): JsonObject,
) -> Result<(StatusCode, Json<TimelineEvent>), ApiError> {
    body.insert("app_id".into(), Value::String(app_id));
    let input: CreateTimelineEventInput = validate_into(&state, Value::Object(body))?;
    let event = state
        .svc
        .create_timeline_event(actor.as_deref(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TimelineEvent>, ApiError> {
    Ok(Json(state.svc.get_timeline_event(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateTimelineEventInput>,
) -> Result<Json<TimelineEvent>, ApiError> {
    let event = state
        .svc
        .update_timeline_event(actor.as_deref(), &id, input)
        .await?;
    Ok(Json(event))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_timeline_event(actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
