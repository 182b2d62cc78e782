//! App version repository. Versions are immutable once recorded.

use vit_core::entities::AppVersion;
use vit_core::enums::{AuditAction, EntityType, TimelineKind};
use vit_core::ids::PREFIX_APP_VERSION;
use vit_core::inputs::{CreateAppVersionInput, CreateTimelineEventInput};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime, truncate_datetime};
use crate::service::VitService;

const COLUMNS: &str = "id, app_id, version, release_notes, released_at, created_at";

fn row_to_version(row: &libsql::Row) -> Result<AppVersion, DatabaseError> {
    Ok(AppVersion {
        id: row.get::<String>(0)?,
        app_id: row.get::<String>(1)?,
        version: row.get::<String>(2)?,
        release_notes: get_opt_string(row, 3)?,
        released_at: parse_datetime(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Newest semantic version first. Rows with an unparsable version sort last.
fn sort_by_semver_desc(versions: &mut [AppVersion]) {
    versions.sort_by(|a, b| {
        let va = semver::Version::parse(&a.version).ok();
        let vb = semver::Version::parse(&b.version).ok();
        vb.cmp(&va).then_with(|| b.released_at.cmp(&a.released_at))
    });
}

impl VitService {
    /// Record a release and add a matching `release` entry to the timeline.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `NotFound` if the app does not exist, or
    /// `Conflict` if the app already has this version.
    pub async fn create_app_version(
        &self,
        actor: Option<&str>,
        input: CreateAppVersionInput,
    ) -> Result<AppVersion, DatabaseError> {
        let input = input.validated()?;
        self.ensure_exists(EntityType::App, &input.app_id).await?;

        let now = now();
        let released_at = input.released_at.map_or(now, truncate_datetime);
        let id = self.db().generate_id(PREFIX_APP_VERSION).await?;

        self.db()
            .execute_with(
                "INSERT INTO app_versions (id, app_id, version, release_notes, released_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.app_id.as_str(),
                        input.version.as_str(),
                        input.release_notes.as_deref(),
                        format_datetime(&released_at),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        let version = AppVersion {
            id,
            app_id: input.app_id,
            version: input.version,
            release_notes: input.release_notes,
            released_at,
            created_at: now,
        };

        self.audit(
            actor,
            EntityType::AppVersion,
            &version.id,
            AuditAction::Created,
            Some(serde_json::json!({
                "app_id": version.app_id,
                "version": version.version,
            })),
        )
        .await?;

        self.create_timeline_event(
            actor,
            CreateTimelineEventInput {
                app_id: version.app_id.clone(),
                kind: TimelineKind::Release,
                title: format!("Released {}", version.version),
                body: version.release_notes.clone(),
                link_url: None,
                occurred_at: Some(released_at),
            },
        )
        .await?;

        Ok(version)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no version has this id.
    pub async fn get_app_version(&self, id: &str) -> Result<AppVersion, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM app_versions WHERE id = ?1"),
                || [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("app_version", id))?;
        row_to_version(&row)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no version has this id.
    pub async fn delete_app_version(
        &self,
        actor: Option<&str>,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .execute_with("DELETE FROM app_versions WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("app_version", id));
        }
        self.audit(actor, EntityType::AppVersion, id, AuditAction::Deleted, None)
            .await
    }

    /// All versions of an app, highest semantic version first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist.
    pub async fn list_app_versions(&self, app_id: &str) -> Result<Vec<AppVersion>, DatabaseError> {
        self.ensure_exists(EntityType::App, app_id).await?;
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM app_versions WHERE app_id = ?1"),
                || [app_id],
            )
            .await?;

        let mut versions = Vec::new();
        while let Some(row) = rows.next().await? {
            versions.push(row_to_version(&row)?);
        }
        sort_by_semver_desc(&mut versions);
        Ok(versions)
    }

    /// The highest version of an app, if any was recorded.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist.
    pub async fn latest_app_version(
        &self,
        app_id: &str,
    ) -> Result<Option<AppVersion>, DatabaseError> {
        Ok(self.list_app_versions(app_id).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vit_core::enums::TimelineKind;
    use vit_core::inputs::CreateAppVersionInput;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{create_test_app, test_service};

    fn version(app_id: &str, v: &str) -> CreateAppVersionInput {
        CreateAppVersionInput {
            app_id: app_id.into(),
            version: v.into(),
            release_notes: Some(format!("Notes for {v}")),
            released_at: None,
        }
    }

    #[tokio::test]
    async fn create_adds_release_to_timeline() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        let v = svc
            .create_app_version(Some("admin"), version(&app.id, "1.0.0"))
            .await
            .unwrap();
        assert_eq!(svc.get_app_version(&v.id).await.unwrap(), v);

        let timeline = svc.list_timeline(&app.id).await.unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].kind, TimelineKind::Release);
        assert_eq!(timeline[0].title, "Released 1.0.0");
        assert_eq!(timeline[0].body.as_deref(), Some("Notes for 1.0.0"));
        assert_eq!(timeline[0].occurred_at, v.released_at);
    }

    #[tokio::test]
    async fn duplicate_version_conflicts() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        svc.create_app_version(None, version(&app.id, "1.0.0"))
            .await
            .unwrap();
        let err = svc
            .create_app_version(None, version(&app.id, " 1.0.0"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(ref c) if c == "version"), "{err}");
    }

    #[tokio::test]
    async fn same_version_allowed_across_apps() {
        let svc = test_service().await;
        let a = create_test_app(&svc, "app-a").await;
        let b = create_test_app(&svc, "app-b").await;
        svc.create_app_version(None, version(&a.id, "1.0.0")).await.unwrap();
        assert!(svc.create_app_version(None, version(&b.id, "1.0.0")).await.is_ok());
    }

    #[tokio::test]
    async fn versions_sort_by_semver_not_text() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        for v in ["1.2.0", "1.10.0", "1.10.0-rc.1", "0.9.5"] {
            svc.create_app_version(None, version(&app.id, v)).await.unwrap();
        }

        let listed: Vec<String> = svc
            .list_app_versions(&app.id)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.version)
            .collect();
        assert_eq!(listed, vec!["1.10.0", "1.10.0-rc.1", "1.2.0", "0.9.5"]);

        let latest = svc.latest_app_version(&app.id).await.unwrap().unwrap();
        assert_eq!(latest.version, "1.10.0");
    }

    #[tokio::test]
    async fn latest_is_none_without_versions() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        assert!(svc.latest_app_version(&app.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn version_for_missing_app_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_app_version(None, version("app-00000000", "1.0.0"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
