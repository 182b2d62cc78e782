use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use vit_core::entities::User;
use vit_core::inputs::{CreateUserInput, UpdateUserInput};
use vit_core::responses::Page;

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{ApiQuery, ValidatedJson};
use crate::ops;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    organization_id: Option<String>,
    email: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

/// `?email=` looks up a single user and returns a one-item page.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<UserListQuery>,
) -> Result<Json<Page<User>>, ApiError> {
    let limit = state.page_limit(q.limit);
    if let Some(email) = q.email.as_deref() {
        let items = match state.svc.get_user_by_email(email).await {
            Ok(user) => vec![user],
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let total = items.len() as u64;
        return Ok(Json(Page::new(items, total, limit, 0)));
    }
    let page = state
        .svc
        .list_users(q.organization_id.as_deref(), limit, q.offset.unwrap_or(0))
        .await?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = ops::create_user(&state, actor.as_deref(), input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.svc.get_user(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateUserInput>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.svc.update_user(actor.as_deref(), &id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_user(actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
