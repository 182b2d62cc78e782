//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. Nullable columns use
//! `Option<Option<_>>`: `Some(None)` clears the column. The update struct is
//! serialized as the audit `detail` payload (changed fields only).

pub mod app;
pub mod media;
pub mod organization;
pub mod timeline;
pub mod user;

/// Accumulates `SET col = ?n` clauses and their parameters.
#[derive(Default)]
pub(crate) struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish as `UPDATE {table} SET ... WHERE id = ?n`, returning the SQL and
    /// parameters.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        id: &str,
    ) -> (String, Vec<libsql::Value>) {
        self.params.push(id.into());
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}
