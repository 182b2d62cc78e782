//! API error type and its mapping onto HTTP statuses and GraphQL codes.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vit_core::errors::CoreError;
use vit_db::error::DatabaseError;
use vit_schema::SchemaError;
use vit_storage::StorageError;

/// An error ready to be rendered as `{"error":{"code","message"}}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// Map an axum body or query rejection, keeping its status.
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        let code = match status {
            StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
            _ => "bad_request",
        };
        Self::new(status, code, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_failed", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "a valid admin bearer token is required",
        )
    }

    pub fn upload_missing(key: &str) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            "upload_missing",
            format!("upload not found at '{key}'"),
        )
    }

    /// Log the detail, return a generic message.
    pub fn internal(detail: &impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "internal server error",
        )
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "not_found", e.to_string()),
            CoreError::InvalidTransition { .. } => {
                Self::new(StatusCode::CONFLICT, "invalid_transition", e.to_string())
            }
            CoreError::Validation { .. } => Self::validation(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Core(core) => core.into(),
            DatabaseError::NoResult => Self::new(StatusCode::NOT_FOUND, "not_found", e.to_string()),
            DatabaseError::Conflict(_) => Self::new(StatusCode::CONFLICT, "conflict", e.to_string()),
            DatabaseError::Constraint(_) => Self::validation(e.to_string()),
            other => Self::internal(&other),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotConfigured(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                e.to_string(),
            ),
            other => Self::internal(&other),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::ValidationFailed { .. } => Self::validation(e.to_string()),
            other => Self::internal(&other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code;
        async_graphql::Error::new(self.message.clone()).extend_with(|_, ext| ext.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(DatabaseError::not_found("app", "app-1"), StatusCode::NOT_FOUND, "not_found")]
    #[case(DatabaseError::Conflict("slug".into()), StatusCode::CONFLICT, "conflict")]
    #[case(
        DatabaseError::Constraint("referenced entity does not exist".into()),
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation_failed"
    )]
    #[case(
        DatabaseError::Core(CoreError::invalid("slug", "bad")),
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation_failed"
    )]
    #[case(
        DatabaseError::Core(CoreError::InvalidTransition {
            entity_type: "app".into(),
            id: "app-1".into(),
            from: "archived".into(),
            to: "published".into(),
        }),
        StatusCode::CONFLICT,
        "invalid_transition"
    )]
    #[case(DatabaseError::Query("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal")]
    fn database_errors_map_to_statuses(
        #[case] err: DatabaseError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let api = ApiError::from(err);
        assert_eq!(api.status, status);
        assert_eq!(api.code, code);
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = ApiError::from(DatabaseError::Query("secret table name".into()));
        assert_eq!(api.message, "internal server error");
    }

    #[test]
    fn storage_not_configured_is_unavailable() {
        let api = ApiError::from(StorageError::NotConfigured("no keys".into()));
        assert_eq!(api.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
