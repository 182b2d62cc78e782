//! Embedded SQL migrations, applied in order every time a database opens.
//! Each script is written with `IF NOT EXISTS` so reapplying is a no-op.

use crate::VitDb;
use crate::error::DatabaseError;

const SCRIPTS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../migrations/001_initial.sql"),
)];

/// Names of the embedded migrations, in application order.
pub const MIGRATIONS: &[&str] = &["001_initial"];

impl VitDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in SCRIPTS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::debug!(migration = name, "migration applied");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MIGRATIONS, SCRIPTS};

    #[test]
    fn published_names_match_scripts() {
        let names: Vec<&str> = SCRIPTS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, MIGRATIONS);
    }
}
