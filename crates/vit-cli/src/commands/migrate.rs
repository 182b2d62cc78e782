use serde_json::json;
use vit_config::VitConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `vitrine migrate`. Opening the database applies pending migrations.
pub async fn handle(config: &VitConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = bootstrap::open_service(config).await?;
    svc.db().ping().await?;
    output(
        &json!({
            "database": bootstrap::database_location(config),
            "remote": config.database.is_remote(),
            "migrations": vit_db::MIGRATIONS,
            "status": "up_to_date",
        }),
        flags.format,
    )
}
