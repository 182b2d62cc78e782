//! # vit-db
//!
//! libSQL database operations for Vitrine.
//!
//! Holds every record: organizations, users, apps, versions, media rows,
//! timeline events, and the audit trail. Works against a local file (or
//! `:memory:` in tests) or a remote libSQL server.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

pub use migrations::MIGRATIONS;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;
use retry::RetryConfig;

/// Central database handle for all Vitrine state.
///
/// Wraps a libSQL database and a single connection. Statements against a
/// remote database retry transient infrastructure errors.
pub struct VitDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
    retry: RetryConfig,
}

impl VitDb {
    /// Open a local database at the given path. Runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::init(db, false).await
    }

    /// Open a remote libSQL database. Runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::init(db, true).await
    }

    async fn init(db: libsql::Database, remote: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let vit_db = Self {
            db,
            conn,
            remote,
            retry: RetryConfig::default(),
        };
        vit_db.run_migrations().await?;
        tracing::debug!(remote, "database opened");
        Ok(vit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Execute a statement, returning the number of affected rows.
    ///
    /// `params` builds fresh parameters for each attempt.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` once retries are exhausted or on a
    /// non-transient failure.
    pub async fn execute_with<F, P>(&self, sql: &str, params: F) -> Result<u64, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
    {
        let mut attempt = 1;
        loop {
            match self.conn.execute(sql, params()).await {
                Ok(n) => return Ok(n),
                Err(e) if self.should_retry(&e, attempt) => {
                    self.backoff(&e, attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run a query. See [`Self::execute_with`] for retry semantics.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` once retries are exhausted or on a
    /// non-transient failure.
    pub async fn query_with<F, P>(&self, sql: &str, params: F) -> Result<libsql::Rows, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
    {
        let mut attempt = 1;
        loop {
            match self.conn.query(sql, params()).await {
                Ok(rows) => return Ok(rows),
                Err(e) if self.should_retry(&e, attempt) => {
                    self.backoff(&e, attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn should_retry(&self, e: &libsql::Error, attempt: u32) -> bool {
        self.remote && attempt < self.retry.max_attempts && retry::is_transient_remote_error(e)
    }

    async fn backoff(&self, e: &libsql::Error, attempt: u32) {
        let delay = self.retry.delay_for(attempt);
        tracing::warn!(
            attempt,
            max_attempts = self.retry.max_attempts,
            ?delay,
            error = %e,
            "transient libSQL error, retrying"
        );
        tokio::time::sleep(delay).await;
    }

    /// Run a query and return the first row, or `DatabaseError::NoResult`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the query yields no rows.
    pub async fn query_one<F, P>(&self, sql: &str, params: F) -> Result<libsql::Row, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
    {
        let mut rows = self.query_with(sql, params).await?;
        rows.next().await?.ok_or(DatabaseError::NoResult)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"app-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let row = self
            .query_one(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                || (),
            )
            .await?;
        Ok(row.get::<String>(0)?)
    }

    /// Cheap liveness probe used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot answer `SELECT 1`.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let row = self.query_one("SELECT 1", || ()).await?;
        let one = row.get::<i64>(0)?;
        if one == 1 {
            Ok(())
        } else {
            Err(DatabaseError::InvalidState(format!("ping returned {one}")))
        }
    }
}
