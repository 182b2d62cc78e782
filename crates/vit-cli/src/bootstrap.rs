use std::path::Path;

use anyhow::Context;
use vit_config::VitConfig;
use vit_db::service::VitService;

/// Load `.env`, config files, and `VITRINE_*` variables.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<VitConfig> {
    VitConfig::load_with_dotenv_from(explicit).context("failed to load vitrine configuration")
}

/// Open the configured database, running migrations.
pub async fn open_service(config: &VitConfig) -> anyhow::Result<VitService> {
    let db = &config.database;
    if db.is_remote() {
        tracing::debug!(url = %db.url, "opening remote database");
        VitService::new_remote(&db.url, &db.auth_token)
            .await
            .with_context(|| format!("failed to open remote database {}", db.url))
    } else {
        tracing::debug!(path = %db.path, "opening local database");
        VitService::new_local(&db.path)
            .await
            .with_context(|| format!("failed to open database at {}", db.path))
    }
}

/// Human-readable location of the configured database.
#[must_use]
pub fn database_location(config: &VitConfig) -> &str {
    if config.database.is_remote() {
        &config.database.url
    } else {
        &config.database.path
    }
}
