use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use vit_core::entities::AuditEntry;
use vit_core::enums::{AuditAction, EntityType};
use vit_db::repos::audit::AuditFilter;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    entity_type: Option<EntityType>,
    entity_id: Option<String>,
    action: Option<AuditAction>,
    actor: Option<String>,
    limit: Option<u32>,
}

impl From<AuditQuery> for AuditFilter {
    fn from(q: AuditQuery) -> Self {
        Self {
            entity_type: q.entity_type,
            entity_id: q.entity_id,
            action: q.action,
            actor: q.actor,
            limit: q.limit,
        }
    }
}

pub async fn query(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    Ok(Json(state.svc.query_audit(&q.into()).await?))
}
