//! # vit-config
//!
//! Layered configuration loading for Vitrine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VITRINE_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./vitrine.toml`
//! 4. User-level `~/.config/vitrine/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VITRINE_DATABASE__PATH` -> `database.path`,
//! `VITRINE_STORAGE__BUCKET` -> `storage.bucket`, and so on. List values use
//! figment's array syntax: `VITRINE_WEBHOOKS__URLS='["https://a", "https://b"]'`.
//!
//! # Usage
//!
//! ```no_run
//! use vit_config::VitConfig;
//!
//! let config = VitConfig::load_with_dotenv().expect("config");
//! if config.storage.is_configured() {
//!     println!("bucket: {}", config.storage.bucket);
//! }
//! ```

mod database;
mod error;
mod general;
mod jobs;
mod mail;
mod server;
mod storage;
mod webhooks;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use jobs::JobsConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use webhooks::WebhooksConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "VITRINE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub webhooks: WebhooksConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(None))
    }

    /// Load with an additional explicit config file layered above the
    /// project file (the CLI's `--config`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `path` does not exist, or any
    /// extraction error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Self::from_figment(Self::figment(Some(path)))
    }

    /// Load `.env` from the working directory, then [`Self::load`] (or
    /// [`Self::load_from`] when `path` is given).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load_with_dotenv_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }

    /// Shorthand for [`Self::load_with_dotenv_from`] without an explicit file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(None)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("vitrine.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        };
        if self.jobs.workers == 0 {
            return Err(invalid("jobs.workers", "must be at least 1"));
        }
        if self.jobs.queue_capacity == 0 {
            return Err(invalid("jobs.queue_capacity", "must be at least 1"));
        }
        if self.jobs.max_attempts == 0 {
            return Err(invalid("jobs.max_attempts", "must be at least 1"));
        }
        if self.storage.presign_ttl_secs == 0 {
            return Err(invalid("storage.presign_ttl_secs", "must be positive"));
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(invalid("storage.max_upload_bytes", "must be positive"));
        }
        if self.general.default_limit == 0 || self.general.default_limit > self.general.max_limit {
            return Err(invalid(
                "general.default_limit",
                "must be between 1 and general.max_limit",
            ));
        }
        Ok(())
    }

    /// Require that the storage section is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when bucket or credentials are missing.
    pub fn require_storage(&self) -> Result<&StorageConfig, ConfigError> {
        if self.storage.is_configured() {
            Ok(&self.storage)
        } else {
            Err(ConfigError::NotConfigured {
                section: "storage".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vitrine").join("config.toml"))
    }
}
