//! Service layer orchestrating database mutations with audit.
//!
//! `VitService` wraps `VitDb` (raw database access) and `SchemaRegistry`
//! (schema validation). All repo methods are implemented as `impl VitService`.
//!
//! Every mutation method follows this protocol:
//! 1. Validate input and state transitions
//! 2. Execute SQL
//! 3. Append an audit entry

use serde::Serialize;
use vit_core::entities::AuditEntry;
use vit_core::enums::{AuditAction, EntityType};
use vit_core::ids::PREFIX_AUDIT;
use vit_schema::SchemaRegistry;

use crate::VitDb;
use crate::error::DatabaseError;
use crate::helpers::{entity_type_to_table, now};

pub struct VitService {
    db: VitDb,
    schema: SchemaRegistry,
}

impl VitService {
    /// Open a service over a local database file, or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(VitDb::open_local(db_path).await?))
    }

    /// Open a service over a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection fails.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(VitDb::open_remote(url, auth_token).await?))
    }

    #[must_use]
    pub fn from_db(db: VitDb) -> Self {
        Self {
            db,
            schema: SchemaRegistry::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &VitDb {
        &self.db
    }

    /// Access the schema registry.
    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    /// Generate an ID for a new entity. Exposed so callers can derive
    /// dependent values (storage keys) before the row is inserted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if ID generation fails.
    pub async fn new_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        self.db.generate_id(prefix).await
    }

    /// Fail with `NotFound` unless a row with `id` exists.
    pub(crate) async fn ensure_exists(
        &self,
        entity: EntityType,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let table = entity_type_to_table(entity);
        let mut rows = self
            .db
            .query_with(&format!("SELECT 1 FROM {table} WHERE id = ?1"), || [id])
            .await?;
        if rows.next().await?.is_some() {
            Ok(())
        } else {
            Err(DatabaseError::not_found(entity.as_str(), id))
        }
    }

    /// Build and append an audit entry for a mutation.
    pub(crate) async fn audit(
        &self,
        actor: Option<&str>,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        let id = self.db.generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id,
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            actor: actor.map(String::from),
            detail,
            created_at: now(),
        })
        .await
    }
}

/// Serialize an update payload for the audit `detail` column.
pub(crate) fn to_detail<T: Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}
