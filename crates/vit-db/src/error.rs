//! Database error types for vit-db.

use thiserror::Error;
use vit_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A unique index rejected the write. Holds the constrained column(s).
    #[error("Conflict: {0} already exists")]
    Conflict(String),

    /// A foreign key or check constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Domain rule violation (not found, invalid transition, validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::Core(CoreError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        })
    }

    /// Whether this error means the requested entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NoResult | Self::Core(CoreError::NotFound { .. }))
    }
}

/// Classify constraint failures so callers can tell a duplicate slug from a
/// broken connection.
impl From<libsql::Error> for DatabaseError {
    fn from(e: libsql::Error) -> Self {
        let msg = e.to_string();
        if let Some(idx) = msg.find("UNIQUE constraint failed: ") {
            let target = msg[idx + "UNIQUE constraint failed: ".len()..]
                .trim_end_matches(['`', '"', ' '])
                .to_string();
            return Self::Conflict(friendly_target(&target));
        }
        if msg.contains("FOREIGN KEY constraint failed") {
            return Self::Constraint("referenced entity does not exist".into());
        }
        if msg.contains("CHECK constraint failed") {
            return Self::Constraint(msg);
        }
        Self::LibSql(e)
    }
}

/// `apps.slug` -> `slug`, `app_versions.app_id, app_versions.version` -> `version`.
fn friendly_target(target: &str) -> String {
    target
        .split(',')
        .map(str::trim)
        .filter(|col| !col.ends_with(".app_id"))
        .map(|col| col.rsplit('.').next().unwrap_or(col))
        .collect::<Vec<_>>()
        .join(", ")
}
