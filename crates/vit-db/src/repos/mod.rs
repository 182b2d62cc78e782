//! Repository methods for every entity, implemented on `VitService`.

pub mod app;
pub mod app_version;
pub mod audit;
pub mod media;
pub mod organization;
pub mod timeline;
pub mod user;

use crate::error::DatabaseError;

/// Run a `SELECT COUNT(*)` and return it as `u64`.
pub(crate) async fn count(
    db: &crate::VitDb,
    sql: &str,
    params: &[libsql::Value],
) -> Result<u64, DatabaseError> {
    let row = db
        .query_one(sql, || libsql::params_from_iter(params.to_vec()))
        .await?;
    let n = row.get::<i64>(0)?;
    u64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("negative count {n}")))
}
