use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use vit_core::entities::App;
use vit_core::inputs::{CreateAppInput, TransitionAppInput, UpdateAppInput};
use vit_core::responses::Page;

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{ApiQuery, AppListQuery, ValidatedJson};
use crate::ops;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AppListQuery>,
) -> Result<Json<Page<App>>, ApiError> {
    let limit = state.page_limit(q.limit);
    let page = state
        .svc
        .list_apps(&q.filter(), limit, q.offset.unwrap_or(0))
        .await?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateAppInput>,
) -> Result<(StatusCode, Json<App>), ApiError> {
    let app = state.svc.create_app(actor.as_deref(), input).await?;
    Ok((StatusCode::CREATED, Json(app)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<App>, ApiError> {
    Ok(Json(state.svc.get_app(&id).await?))
}

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<App>, ApiError> {
    Ok(Json(state.svc.get_app_by_slug(&slug).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateAppInput>,
) -> Result<Json<App>, ApiError> {
    Ok(Json(state.svc.update_app(actor.as_deref(), &id, input).await?))
}

pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<TransitionAppInput>,
) -> Result<Json<App>, ApiError> {
    let app = ops::transition_app(&state, actor.as_deref(), &id, input.status).await?;
    Ok(Json(app))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    ops::delete_app(&state, actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
