//! Request extractors that report failures in the API error shape.
//!
//! JSON bodies are checked against the registered JSON Schema before being
//! deserialized, so clients get field-level messages for malformed input.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use vit_core::enums::Platform;
use vit_core::inputs::{
    AppFilter, CreateAppInput, CreateAppVersionInput, CreateOrganizationInput,
    CreateTimelineEventInput, CreateUserInput, RequestUploadInput, TransitionAppInput,
    UpdateAppInput, UpdateMediaInput, UpdateOrganizationInput, UpdateTimelineEventInput,
    UpdateUserInput,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Input types with a schema in the registry.
pub trait NamedSchema {
    const SCHEMA: &'static str;
}

macro_rules! named_schema {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl NamedSchema for $ty { const SCHEMA: &'static str = $name; })*
    };
}

named_schema! {
    CreateOrganizationInput => "create_organization_input",
    UpdateOrganizationInput => "update_organization_input",
    CreateUserInput => "create_user_input",
    UpdateUserInput => "update_user_input",
    CreateAppInput => "create_app_input",
    UpdateAppInput => "update_app_input",
    TransitionAppInput => "transition_app_input",
    AppFilter => "app_filter",
    CreateAppVersionInput => "create_app_version_input",
    CreateTimelineEventInput => "create_timeline_event_input",
    UpdateTimelineEventInput => "update_timeline_event_input",
    RequestUploadInput => "request_upload_input",
    UpdateMediaInput => "update_media_input",
}

/// JSON body validated against `T::SCHEMA`.
///
/// Unparseable JSON is a 400; a schema or shape mismatch is a 422.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + NamedSchema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let JsonObject(object) = JsonObject::from_request(req, state).await?;
        validate_into(state, serde_json::Value::Object(object)).map(Self)
    }
}

/// Check `value` against `T::SCHEMA`, then deserialize it.
///
/// # Errors
///
/// `422` on a schema failure or a shape serde rejects.
pub fn validate_into<T>(state: &AppState, value: serde_json::Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + NamedSchema,
{
    state.svc.schema().validate(T::SCHEMA, &value)?;
    serde_json::from_value(value).map_err(|e| ApiError::validation(e.to_string()))
}

/// A JSON object body, for handlers that merge path parameters into it
/// before validation.
#[derive(Debug)]
pub struct JsonObject(pub serde_json::Map<String, serde_json::Value>);

impl<S: Send + Sync> FromRequest<S> for JsonObject {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::rejected(rejection.status(), rejection.body_text()))?;
        match value {
            serde_json::Value::Object(object) => Ok(Self(object)),
            _ => Err(ApiError::bad_request("request body must be a JSON object")),
        }
    }
}

/// Query string parsed into `T`, failing with a 400 in the API error shape.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(v)| Self(v))
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
    }
}

/// `?limit=&offset=` paging.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Paging {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Query parameters for app listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppListQuery {
    pub status: Option<vit_core::enums::AppStatus>,
    pub platform: Option<Platform>,
    pub organization_id: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AppListQuery {
    #[must_use]
    pub fn filter(&self) -> AppFilter {
        AppFilter {
            status: self.status,
            platform: self.platform,
            organization_id: self.organization_id.clone(),
            tag: self.tag.clone(),
            featured: self.featured,
            query: self.q.clone(),
        }
    }
}
