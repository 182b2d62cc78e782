use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load vitrine config: {0}")]
    Figment(#[from] figment::Error),

    /// `--config` pointed at a file that does not exist.
    #[error("config file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A section is required by the caller but lacks its mandatory fields.
    #[error("[{section}] is not configured")]
    NotConfigured { section: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
