use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use vit_core::inputs::{RequestUploadInput, UpdateMediaInput};
use vit_core::responses::{MediaWithUrl, PresignedUpload};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{ApiQuery, ValidatedJson};
use crate::ops;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MediaListQuery {
    #[serde(default)]
    ready_only: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    ApiQuery(q): ApiQuery<MediaListQuery>,
) -> Result<Json<Vec<MediaWithUrl>>, ApiError> {
    Ok(Json(ops::list_media(&state, &app_id, q.ready_only).await?))
}

pub async fn request_upload(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<RequestUploadInput>,
) -> Result<(StatusCode, Json<PresignedUpload>), ApiError> {
    let upload = ops::request_upload(&state, actor.as_deref(), input).await?;
    Ok((StatusCode::CREATED, Json(upload)))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<Json<MediaWithUrl>, ApiError> {
    Ok(Json(ops::complete_upload(&state, actor.as_deref(), &id).await?))
}

pub async fn retry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<Json<PresignedUpload>, ApiError> {
    Ok(Json(ops::retry_upload(&state, actor.as_deref(), &id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MediaWithUrl>, ApiError> {
    Ok(Json(ops::get_media(&state, &id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateMediaInput>,
) -> Result<Json<MediaWithUrl>, ApiError> {
    let media = state.svc.update_media(actor.as_deref(), &id, input).await?;
    Ok(Json(ops::with_url(&state, media).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    ops::delete_media(&state, actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
