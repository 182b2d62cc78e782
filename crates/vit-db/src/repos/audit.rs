//! Audit trail repository.
//!
//! Append-only entries recording every mutation, newest first on read.

use vit_core::entities::AuditEntry;
use vit_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_json,
};
use crate::service::VitService;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1000;

/// Filter criteria for audit queries.
#[derive(Debug, Default, Clone)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor: Option<String>,
    pub limit: Option<u32>,
}

impl VitService {
    /// Append an audit entry. Called by every mutation method.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        let detail = entry.detail.as_ref().map(ToString::to_string);
        self.db()
            .execute_with(
                "INSERT INTO audit_trail (id, entity_type, entity_id, action, actor, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                || {
                    libsql::params![
                        entry.id.as_str(),
                        entry.entity_type.as_str(),
                        entry.entity_id.as_str(),
                        entry.action.as_str(),
                        entry.actor.as_deref(),
                        detail.as_deref(),
                        format_datetime(&entry.created_at)
                    ]
                },
            )
            .await?;
        Ok(())
    }

    /// Query audit entries with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(et.as_str().into());
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(eid.as_str().into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor) = filter.actor {
            params.push(actor.as_str().into());
            conditions.push(format!("actor = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let sql = format!(
            "SELECT id, entity_type, entity_id, action, actor, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<String>(0)?,
                entity_type: parse_enum(&row.get::<String>(1)?)?,
                entity_id: row.get::<String>(2)?,
                action: parse_enum(&row.get::<String>(3)?)?,
                actor: get_opt_string(&row, 4)?,
                detail: parse_optional_json(get_opt_string(&row, 5)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(6)?)?,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vit_core::enums::{AppStatus, AuditAction, EntityType};
    use vit_core::inputs::UpdateAppInput;

    use super::AuditFilter;
    use crate::test_support::helpers::{create_test_app, test_service};

    #[tokio::test]
    async fn mutations_are_recorded_newest_first() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        svc.update_app(
            Some("editor@example.com"),
            &app.id,
            UpdateAppInput {
                name: Some("Pixel Garden".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        svc.transition_app(Some("admin"), &app.id, AppStatus::Published)
            .await
            .unwrap();

        let entries = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::App),
                entity_id: Some(app.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::StatusChanged,
                AuditAction::Updated,
                AuditAction::Created
            ]
        );
        assert_eq!(
            entries[0].detail,
            Some(serde_json::json!({"from": "draft", "to": "published"}))
        );
        assert_eq!(entries[1].detail, Some(serde_json::json!({"name": "Pixel Garden"})));
        assert_eq!(entries[2].actor.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn filter_by_actor_and_action() {
        let svc = test_service().await;
        let app = create_test_app(&svc, "pixel-garden").await;
        svc.transition_app(Some("admin"), &app.id, AppStatus::Archived)
            .await
            .unwrap();

        let by_actor = svc
            .query_audit(&AuditFilter {
                actor: Some("admin".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_actor.len(), 1);

        let created = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].entity_id, app.id);
    }

    #[tokio::test]
    async fn limit_is_honored() {
        let svc = test_service().await;
        for slug in ["aa", "bb", "cc"] {
            create_test_app(&svc, slug).await;
        }
        let entries = svc
            .query_audit(&AuditFilter {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }
}
