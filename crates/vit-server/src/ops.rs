//! Workflows shared by the REST and GraphQL surfaces.
//!
//! Each function combines the database service with object storage and the
//! notification queue. Storage cleanup and notifications are best-effort:
//! their failures are logged and never fail the request.

use serde_json::json;
use vit_core::entities::{App, AppVersion, Media, User};
use vit_core::enums::{AppStatus, MediaStatus};
use vit_core::ids::PREFIX_MEDIA;
use vit_core::inputs::{CreateAppVersionInput, CreateUserInput, RequestUploadInput};
use vit_core::responses::{HeaderPair, MediaWithUrl, PresignedUpload};
use vit_jobs::{EmailTemplate, Job, WebhookEvent};
use vit_storage::{PresignedRequest, media_key};

use crate::error::ApiError;
use crate::state::AppState;

fn enqueue_all(state: &AppState, jobs: impl IntoIterator<Item = Job>) {
    for job in jobs {
        let kind = job.kind();
        if let Err(e) = state.jobs.enqueue(job) {
            tracing::warn!(kind, error = %e, "notification dropped");
        }
    }
}

fn emit(state: &AppState, event: &str, data: serde_json::Value) {
    let event = WebhookEvent::new(event, data);
    enqueue_all(state, state.dispatcher.webhook_jobs(&event));
}

fn send_email(state: &AppState, template: EmailTemplate, to: &str, vars: &[(&str, &str)]) {
    match template.render(to, vars) {
        Ok(message) => enqueue_all(state, [Job::SendEmail(message)]),
        Err(e) => tracing::error!(error = %e, "email template failed to render"),
    }
}

async fn delete_object(state: &AppState, key: &str) {
    if let Err(e) = state.storage.delete(key).await {
        tracing::warn!(key, error = %e, "failed to delete stored object");
    }
}

fn app_url(state: &AppState, app: &App) -> String {
    format!(
        "{}/apps/{}",
        state.config.server.public_url.trim_end_matches('/'),
        app.slug
    )
}

/// Create a user and queue their welcome email.
///
/// # Errors
///
/// Propagates validation and conflict errors from the service.
pub async fn create_user(
    state: &AppState,
    actor: Option<&str>,
    input: CreateUserInput,
) -> Result<User, ApiError> {
    let user = state.svc.create_user(actor, input).await?;
    send_email(
        state,
        EmailTemplate::Welcome,
        &user.email,
        &[("name", &user.name), ("email", &user.email)],
    );
    Ok(user)
}

/// Move an app through its status machine and announce the change.
///
/// Publishing sends `app.published` plus an email to the owner, if any.
/// Every other move sends `app.status_changed`.
///
/// # Errors
///
/// `404` for an unknown app, `409` for a move the machine does not allow.
pub async fn transition_app(
    state: &AppState,
    actor: Option<&str>,
    id: &str,
    next: AppStatus,
) -> Result<App, ApiError> {
    let before = state.svc.get_app(id).await?;
    let app = state.svc.transition_app(actor, id, next).await?;
    let url = app_url(state, &app);

    if app.status == AppStatus::Published {
        emit(state, "app.published", json!({ "app": app, "url": url }));
        if let Some(owner_id) = app.owner_id.as_deref() {
            match state.svc.get_user(owner_id).await {
                Ok(owner) => send_email(
                    state,
                    EmailTemplate::AppPublished,
                    &owner.email,
                    &[("name", &owner.name), ("app_name", &app.name), ("app_url", &url)],
                ),
                Err(e) => tracing::warn!(owner_id, error = %e, "owner lookup failed, skipping email"),
            }
        }
    } else {
        emit(
            state,
            "app.status_changed",
            json!({ "app": app, "from": before.status, "to": app.status }),
        );
    }
    Ok(app)
}

/// Delete an app and its children, then remove its stored media objects.
///
/// # Errors
///
/// `404` for an unknown app.
pub async fn delete_app(state: &AppState, actor: Option<&str>, id: &str) -> Result<(), ApiError> {
    let keys = state.svc.delete_app(actor, id).await?;
    for key in &keys {
        delete_object(state, key).await;
    }
    tracing::debug!(app_id = id, objects = keys.len(), "app deleted");
    Ok(())
}

/// Record a release and send `app_version.created`.
///
/// # Errors
///
/// `404` for an unknown app, `409` for a duplicate version, `422` for bad
/// semver.
pub async fn create_app_version(
    state: &AppState,
    actor: Option<&str>,
    input: CreateAppVersionInput,
) -> Result<AppVersion, ApiError> {
    let version = state.svc.create_app_version(actor, input).await?;
    emit(state, "app_version.created", json!({ "version": version }));
    Ok(version)
}

fn presigned_upload(media: Media, request: PresignedRequest) -> PresignedUpload {
    PresignedUpload {
        media,
        upload_url: request.url,
        method: request.method,
        headers: request
            .headers
            .into_iter()
            .map(|(name, value)| HeaderPair { name, value })
            .collect(),
        expires_at: request.expires_at,
    }
}

/// Create a pending media row and presign the `PUT` its bytes go to.
///
/// The URL is signed before the row is written so a storage outage leaves no
/// orphaned pending rows.
///
/// # Errors
///
/// `422` for an invalid declaration, `404` for an unknown app, `503` when
/// storage cannot presign.
pub async fn request_upload(
    state: &AppState,
    actor: Option<&str>,
    input: RequestUploadInput,
) -> Result<PresignedUpload, ApiError> {
    let input = input.validated(state.storage.max_upload_bytes())?;
    state.svc.get_app(&input.app_id).await?;
    let id = state.svc.new_id(PREFIX_MEDIA).await?;
    let key = media_key(&input.app_id, &id, &input.file_name);
    let request = state
        .storage
        .presign_put(&key, &input.content_type, state.storage.presign_ttl())
        .await?;
    let media = state.svc.create_media(actor, &id, &input, &key).await?;
    Ok(presigned_upload(media, request))
}

/// Re-open a failed upload and presign a fresh `PUT` for it.
///
/// # Errors
///
/// `409` unless the media is `failed`, `503` when storage cannot presign.
pub async fn retry_upload(
    state: &AppState,
    actor: Option<&str>,
    id: &str,
) -> Result<PresignedUpload, ApiError> {
    let media = state.svc.get_media(id).await?;
    let request = state
        .storage
        .presign_put(&media.storage_key, &media.content_type, state.storage.presign_ttl())
        .await?;
    let media = state
        .svc
        .set_media_status(actor, id, MediaStatus::Pending, None)
        .await?;
    Ok(presigned_upload(media, request))
}

/// Confirm an upload by checking the stored object.
///
/// A missing object leaves the row pending. An object over the size limit
/// marks the row failed and is deleted. Completing a ready row is a no-op.
///
/// # Errors
///
/// `409 upload_missing` when nothing was uploaded, `422` when the object is
/// too large, `409` when the row is `failed`.
pub async fn complete_upload(
    state: &AppState,
    actor: Option<&str>,
    id: &str,
) -> Result<MediaWithUrl, ApiError> {
    let media = state.svc.get_media(id).await?;
    if media.status == MediaStatus::Ready {
        return with_url(state, media).await;
    }

    let Some(size) = state.storage.head(&media.storage_key).await? else {
        return Err(ApiError::upload_missing(&media.storage_key));
    };

    let limit = state.storage.max_upload_bytes();
    let Some(size) = i64::try_from(size).ok().filter(|_| size <= limit) else {
        state
            .svc
            .set_media_status(actor, id, MediaStatus::Failed, None)
            .await?;
        delete_object(state, &media.storage_key).await;
        tracing::warn!(media_id = id, size, limit, "uploaded object exceeds size limit");
        return Err(ApiError::validation(format!(
            "uploaded object is {size} bytes, the limit is {limit}"
        )));
    };

    let media = state
        .svc
        .set_media_status(actor, id, MediaStatus::Ready, Some(size))
        .await?;
    with_url(state, media).await
}

/// Attach a download URL to a ready media row.
///
/// # Errors
///
/// Propagates signing failures.
pub async fn with_url(state: &AppState, media: Media) -> Result<MediaWithUrl, ApiError> {
    let download_url = if media.status == MediaStatus::Ready {
        state.storage.download_url(&media.storage_key).await?
    } else {
        None
    };
    Ok(MediaWithUrl {
        media,
        download_url,
    })
}

/// # Errors
///
/// `404` for an unknown media id.
pub async fn get_media(state: &AppState, id: &str) -> Result<MediaWithUrl, ApiError> {
    let media = state.svc.get_media(id).await?;
    with_url(state, media).await
}

/// # Errors
///
/// `404` for an unknown app.
pub async fn list_media(
    state: &AppState,
    app_id: &str,
    ready_only: bool,
) -> Result<Vec<MediaWithUrl>, ApiError> {
    let rows = state.svc.list_media(app_id, ready_only).await?;
    let mut out = Vec::with_capacity(rows.len());
    for media in rows {
        out.push(with_url(state, media).await?);
    }
    Ok(out)
}

/// Remove the stored object, then the row.
///
/// # Errors
///
/// `404` for an unknown media id.
pub async fn delete_media(state: &AppState, actor: Option<&str>, id: &str) -> Result<(), ApiError> {
    let media = state.svc.get_media(id).await?;
    delete_object(state, &media.storage_key).await;
    state.svc.delete_media(actor, id).await?;
    Ok(())
}
