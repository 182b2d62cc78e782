use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use vit_core::entities::Organization;
use vit_core::inputs::{CreateOrganizationInput, UpdateOrganizationInput};
use vit_core::responses::Page;

use crate::auth::Actor;
use crate::error::ApiError;
use crate::extract::{ApiQuery, Paging, ValidatedJson};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(paging): ApiQuery<Paging>,
) -> Result<Json<Page<Organization>>, ApiError> {
    let limit = state.page_limit(paging.limit);
    let page = state
        .svc
        .list_organizations(limit, paging.offset.unwrap_or(0))
        .await?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateOrganizationInput>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    let org = state.svc.create_organization(actor.as_deref(), input).await?;
    Ok((StatusCode::CREATED, Json(org)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>, ApiError> {
    Ok(Json(state.svc.get_organization(&id).await?))
}

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Organization>, ApiError> {
    Ok(Json(state.svc.get_organization_by_slug(&slug).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateOrganizationInput>,
) -> Result<Json<Organization>, ApiError> {
    let org = state
        .svc
        .update_organization(actor.as_deref(), &id, input)
        .await?;
    Ok(Json(org))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_organization(actor.as_deref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
