use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema named '{0}'")]
    NotFound(String),

    /// One message per broken rule, in validator order.
    #[error("payload rejected: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("could not compile schema: {0}")]
    Generation(String),
}
