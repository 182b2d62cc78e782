//! Public, read-only view of published apps. Anything else is a 404.

use axum::Json;
use axum::extract::{Path, State};
use vit_core::entities::{App, AppVersion, TimelineEvent};
use vit_core::responses::{MediaWithUrl, Page};

use crate::error::ApiError;
use crate::extract::{ApiQuery, AppListQuery};
use crate::ops;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AppListQuery>,
) -> Result<Json<Page<App>>, ApiError> {
    let limit = state.page_limit(q.limit);
    let page = state
        .svc
        .catalog(&q.filter(), limit, q.offset.unwrap_or(0))
        .await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<App>, ApiError> {
    Ok(Json(state.svc.get_published_app(&slug).await?))
}

pub async fn versions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<AppVersion>>, ApiError> {
    let app = state.svc.get_published_app(&slug).await?;
    Ok(Json(state.svc.list_app_versions(&app.id).await?))
}

pub async fn timeline(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<TimelineEvent>>, ApiError> {
    let app = state.svc.get_published_app(&slug).await?;
    Ok(Json(state.svc.list_timeline(&app.id).await?))
}

/// Ready media only.
pub async fn media(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<MediaWithUrl>>, ApiError> {
    let app = state.svc.get_published_app(&slug).await?;
    Ok(Json(ops::list_media(&state, &app.id, true).await?))
}
