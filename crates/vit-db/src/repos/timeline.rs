//! Timeline event repository.

use vit_core::entities::TimelineEvent;
use vit_core::enums::{AuditAction, EntityType};
use vit_core::ids::PREFIX_TIMELINE_EVENT;
use vit_core::inputs::{CreateTimelineEventInput, UpdateTimelineEventInput};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, now, parse_datetime, parse_enum, truncate_datetime,
};
use crate::service::{VitService, to_detail};
use crate::updates::SetClauses;
use crate::updates::timeline::TimelineEventUpdate;

const COLUMNS: &str =
    "id, app_id, kind, title, body, link_url, occurred_at, created_at, updated_at";

fn row_to_event(row: &libsql::Row) -> Result<TimelineEvent, DatabaseError> {
    Ok(TimelineEvent {
        id: row.get::<String>(0)?,
        app_id: row.get::<String>(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        title: row.get::<String>(3)?,
        body: get_opt_string(row, 4)?,
        link_url: get_opt_string(row, 5)?,
        occurred_at: parse_datetime(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl VitService {
    /// # Errors
    ///
    /// Returns a validation error or `NotFound` if the app does not exist.
    pub async fn create_timeline_event(
        &self,
        actor: Option<&str>,
        input: CreateTimelineEventInput,
    ) -> Result<TimelineEvent, DatabaseError> {
        let input = input.validated()?;
        self.ensure_exists(EntityType::App, &input.app_id).await?;

        let now = now();
        let occurred_at = input.occurred_at.map_or(now, truncate_datetime);
        let id = self.db().generate_id(PREFIX_TIMELINE_EVENT).await?;

        self.db()
            .execute_with(
                "INSERT INTO timeline_events (id, app_id, kind, title, body, link_url,
                                              occurred_at, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.app_id.as_str(),
                        input.kind.as_str(),
                        input.title.as_str(),
                        input.body.as_deref(),
                        input.link_url.as_deref(),
                        format_datetime(&occurred_at),
                        format_datetime(&now),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        self.audit(actor, EntityType::TimelineEvent, &id, AuditAction::Created, None)
            .await?;

        Ok(TimelineEvent {
            id,
            app_id: input.app_id,
            kind: input.kind,
            title: input.title,
            body: input.body,
            link_url: input.link_url,
            occurred_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no event has this id.
    pub async fn get_timeline_event(&self, id: &str) -> Result<TimelineEvent, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM timeline_events WHERE id = ?1"),
                || [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("timeline_event", id))?;
        row_to_event(&row)
    }

    /// # Errors
    ///
    /// Returns `NotFound` or a validation error.
    pub async fn update_timeline_event(
        &self,
        actor: Option<&str>,
        id: &str,
        input: UpdateTimelineEventInput,
    ) -> Result<TimelineEvent, DatabaseError> {
        let update: TimelineEventUpdate = input.validated()?.into();

        let mut set = SetClauses::default();
        if let Some(kind) = update.kind {
            set.push("kind", kind.as_str());
        }
        if let Some(ref title) = update.title {
            set.push("title", title.as_str());
        }
        if let Some(ref body) = update.body {
            set.push("body", body.as_deref());
        }
        if let Some(ref link) = update.link_url {
            set.push("link_url", link.as_deref());
        }
        if let Some(at) = update.occurred_at {
            set.push("occurred_at", format_datetime(&truncate_datetime(at)));
        }

        if set.is_empty() {
            return self.get_timeline_event(id).await;
        }
        set.push("updated_at", format_datetime(&now()));

        let (sql, params) = set.into_update("timeline_events", id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("timeline_event", id));
        }

        self.audit(
            actor,
            EntityType::TimelineEvent,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_timeline_event(id).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no event has this id.
    pub async fn delete_timeline_event(
        &self,
        actor: Option<&str>,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .execute_with("DELETE FROM timeline_events WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("timeline_event", id));
        }
        self.audit(actor, EntityType::TimelineEvent, id, AuditAction::Deleted, None)
            .await
    }

    /// An app's timeline, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist.
    pub async fn list_timeline(&self, app_id: &str) -> Result<Vec<TimelineEvent>, DatabaseError> {
        self.ensure_exists(EntityType::App, app_id).await?;
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {COLUMNS} FROM timeline_events WHERE app_id = ?1
                     ORDER BY occurred_at DESC, created_at DESC"
                ),
                || [app_id],
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use vit_core::enums::TimelineKind;
    use vit_core::inputs::{CreateTimelineEventInput, UpdateTimelineEventInput};

    use crate::test_support::helpers::{create_test_app, test_service};

    fn event(app_id: &str, title: &str) -> CreateTimelineEventInput {
        CreateTimelineEventInput {
            app_id: app_id.into(),
            kind: TimelineKind::Milestone,
            title: title.into(),
            body: None,
            link_url: None,
            occurred_at: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_occurred_at_to_now() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        let created = svc
            .create_timeline_event(None, event(&app.id, "Hit 1k users"))
            .await
            .unwrap();
        assert_eq!(created.occurred_at, created.created_at);
        assert_eq!(svc.get_timeline_event(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_for_missing_app_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_timeline_event(None, event("app-00000000", "Ghost"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_is_most_recent_first() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        for (i, title) in ["first", "second", "third"].iter().enumerate() {
            svc.create_timeline_event(
                None,
                CreateTimelineEventInput {
                    occurred_at: Some(base + Duration::days(i64::try_from(i).unwrap())),
                    ..event(&app.id, title)
                },
            )
            .await
            .unwrap();
        }

        let titles: Vec<String> = svc
            .list_timeline(&app.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn update_clears_link() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        let created = svc
            .create_timeline_event(
                None,
                CreateTimelineEventInput {
                    link_url: Some("https://blog.example.com/launch".into()),
                    ..event(&app.id, "Launch")
                },
            )
            .await
            .unwrap();

        let updated = svc
            .update_timeline_event(
                None,
                &created.id,
                UpdateTimelineEventInput {
                    kind: Some(TimelineKind::Launch),
                    link_url: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.kind, TimelineKind::Launch);
        assert_eq!(updated.link_url, None);
    }

    #[tokio::test]
    async fn events_cascade_with_app() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        let created = svc
            .create_timeline_event(None, event(&app.id, "Launch"))
            .await
            .unwrap();
        svc.delete_app(None, &app.id).await.unwrap();
        assert!(svc.get_timeline_event(&created.id).await.unwrap_err().is_not_found());
    }
}
