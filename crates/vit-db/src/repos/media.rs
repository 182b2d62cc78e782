//! Media repository: upload slots, status machine, and ordering.

use vit_core::entities::Media;
use vit_core::enums::{AuditAction, EntityType, MediaStatus};
use vit_core::errors::CoreError;
use vit_core::inputs::{RequestUploadInput, UpdateMediaInput};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, now, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::service::{VitService, to_detail};
use crate::updates::SetClauses;
use crate::updates::media::MediaUpdate;

const COLUMNS: &str = "id, app_id, kind, status, storage_key, file_name, content_type, \
     size_bytes, alt_text, position, uploaded_at, created_at, updated_at";

fn row_to_media(row: &libsql::Row) -> Result<Media, DatabaseError> {
    Ok(Media {
        id: row.get::<String>(0)?,
        app_id: row.get::<String>(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        storage_key: row.get::<String>(4)?,
        file_name: row.get::<String>(5)?,
        content_type: row.get::<String>(6)?,
        size_bytes: row.get::<Option<i64>>(7)?,
        alt_text: get_opt_string(row, 8)?,
        position: row.get::<i64>(9)?,
        uploaded_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

impl VitService {
    /// Insert a `pending` media row for an upload slot.
    ///
    /// The caller validates `input`, allocates `id` with [`Self::new_id`], and
    /// derives `storage_key` from it. Without an explicit position the asset
    /// goes after the app's existing media.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist or `Conflict` if the
    /// storage key is already used.
    pub async fn create_media(
        &self,
        actor: Option<&str>,
        id: &str,
        input: &RequestUploadInput,
        storage_key: &str,
    ) -> Result<Media, DatabaseError> {
        self.ensure_exists(EntityType::App, &input.app_id).await?;

        let position = match input.position {
            Some(p) => p,
            None => {
                let row = self
                    .db()
                    .query_one(
                        "SELECT COALESCE(MAX(position) + 1, 0) FROM media WHERE app_id = ?1",
                        || [input.app_id.as_str()],
                    )
                    .await?;
                row.get::<i64>(0)?
            }
        };
        let now = now();

        self.db()
            .execute_with(
                "INSERT INTO media (id, app_id, kind, status, storage_key, file_name, content_type,
                                    size_bytes, alt_text, position, uploaded_at, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 'pending', ?4, ?5, ?6, NULL, ?7, ?8, NULL, ?9, ?10)",
                || {
                    libsql::params![
                        id,
                        input.app_id.as_str(),
                        input.kind.as_str(),
                        storage_key,
                        input.file_name.as_str(),
                        input.content_type.as_str(),
                        input.alt_text.as_deref(),
                        position,
                        format_datetime(&now),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        self.audit(
            actor,
            EntityType::Media,
            id,
            AuditAction::Created,
            Some(serde_json::json!({
                "app_id": input.app_id,
                "kind": input.kind.as_str(),
                "storage_key": storage_key,
            })),
        )
        .await?;

        Ok(Media {
            id: id.to_string(),
            app_id: input.app_id.clone(),
            kind: input.kind,
            status: MediaStatus::Pending,
            storage_key: storage_key.to_string(),
            file_name: input.file_name.clone(),
            content_type: input.content_type.clone(),
            size_bytes: None,
            alt_text: input.alt_text.clone(),
            position,
            uploaded_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no media has this id.
    pub async fn get_media(&self, id: &str) -> Result<Media, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(&format!("SELECT {COLUMNS} FROM media WHERE id = ?1"), || [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("media", id))?;
        row_to_media(&row)
    }

    /// Update alt text and position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a validation error.
    pub async fn update_media(
        &self,
        actor: Option<&str>,
        id: &str,
        input: UpdateMediaInput,
    ) -> Result<Media, DatabaseError> {
        let update: MediaUpdate = input.validated()?.into();

        let mut set = SetClauses::default();
        if let Some(ref alt) = update.alt_text {
            set.push("alt_text", alt.as_deref());
        }
        if let Some(position) = update.position {
            set.push("position", position);
        }

        if set.is_empty() {
            return self.get_media(id).await;
        }
        set.push("updated_at", format_datetime(&now()));

        let (sql, params) = set.into_update("media", id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("media", id));
        }

        self.audit(
            actor,
            EntityType::Media,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_media(id).await
    }

    /// Move a media row through its upload status machine.
    ///
    /// Entering `ready` records the confirmed object size and `uploaded_at`.
    /// Returning to `pending` clears both so the slot can be re-uploaded.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `CoreError::InvalidTransition`.
    pub async fn set_media_status(
        &self,
        actor: Option<&str>,
        id: &str,
        next: MediaStatus,
        size_bytes: Option<i64>,
    ) -> Result<Media, DatabaseError> {
        let current = self.get_media(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "media".into(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        if !self
            .update_media_status(id, current.status, next, size_bytes)
            .await?
        {
            let actual = self.get_media(id).await?.status;
            return Err(CoreError::InvalidTransition {
                entity_type: "media".into(),
                id: id.to_string(),
                from: actual.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        self.audit(
            actor,
            EntityType::Media,
            id,
            AuditAction::StatusChanged,
            Some(serde_json::json!({
                "from": current.status.as_str(),
                "to": next.as_str(),
            })),
        )
        .await?;

        self.get_media(id).await
    }

    /// Move a media row from `from` to `next`. Entering `ready` records the
    /// size and upload time; re-entering `pending` clears both. Returns
    /// `false` when the stored status is no longer `from`.
    async fn update_media_status(
        &self,
        id: &str,
        from: MediaStatus,
        next: MediaStatus,
        size_bytes: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let now = format_datetime(&now());
        let changed = match next {
            MediaStatus::Ready => {
                self.db()
                    .execute_with(
                        "UPDATE media SET status = 'ready', size_bytes = ?1, uploaded_at = ?2,
                                          updated_at = ?2
                         WHERE id = ?3 AND status = ?4",
                        || libsql::params![size_bytes, now.as_str(), id, from.as_str()],
                    )
                    .await?
            }
            MediaStatus::Pending => {
                self.db()
                    .execute_with(
                        "UPDATE media SET status = 'pending', size_bytes = NULL, uploaded_at = NULL,
                                          updated_at = ?1
                         WHERE id = ?2 AND status = ?3",
                        || libsql::params![now.as_str(), id, from.as_str()],
                    )
                    .await?
            }
            MediaStatus::Failed => {
                self.db()
                    .execute_with(
                        "UPDATE media SET status = 'failed', updated_at = ?1
                         WHERE id = ?2 AND status = ?3",
                        || libsql::params![now.as_str(), id, from.as_str()],
                    )
                    .await?
            }
        };
        Ok(changed > 0)
    }

    /// Delete a media row and return it so the caller can remove the object.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no media has this id.
    pub async fn delete_media(&self, actor: Option<&str>, id: &str) -> Result<Media, DatabaseError> {
        let media = self.get_media(id).await?;
        let changed = self
            .db()
            .execute_with("DELETE FROM media WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("media", id));
        }
        self.audit(
            actor,
            EntityType::Media,
            id,
            AuditAction::Deleted,
            Some(serde_json::json!({ "storage_key": media.storage_key })),
        )
        .await?;
        Ok(media)
    }

    /// An app's media in display order. `ready_only` hides unfinished uploads.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist.
    pub async fn list_media(
        &self,
        app_id: &str,
        ready_only: bool,
    ) -> Result<Vec<Media>, DatabaseError> {
        self.ensure_exists(EntityType::App, app_id).await?;
        let status_clause = if ready_only { "AND status = 'ready'" } else { "" };
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {COLUMNS} FROM media WHERE app_id = ?1 {status_clause}
                     ORDER BY position ASC, created_at ASC"
                ),
                || [app_id],
            )
            .await?;

        let mut media = Vec::new();
        while let Some(row) = rows.next().await? {
            media.push(row_to_media(&row)?);
        }
        Ok(media)
    }
}
