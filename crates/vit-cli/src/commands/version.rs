use serde_json::json;
use vit_core::inputs::CreateAppVersionInput;
use vit_server::ops;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VersionCommands;
use crate::commands::shared::parse::parse_datetime;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine version`.
pub async fn handle(
    action: VersionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.state.svc;
    let actor = Some(flags.actor.as_str());
    match action {
        VersionCommands::Create {
            app_id,
            version,
            notes,
            released_at,
        } => {
            let input = CreateAppVersionInput {
                app_id,
                version,
                release_notes: notes,
                released_at: parse_datetime(released_at.as_deref(), "released_at")?,
            };
            output(&ops::create_app_version(&ctx.state, actor, input).await?, flags.format)
        }
        VersionCommands::Get { id } => output(&svc.get_app_version(&id).await?, flags.format),
        VersionCommands::Delete { id } => {
            svc.delete_app_version(actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        VersionCommands::List { app_id } => {
            output(&svc.list_app_versions(&app_id).await?, flags.format)
        }
        VersionCommands::Latest { app_id } => {
            output(&svc.latest_app_version(&app_id).await?, flags.format)
        }
    }
}
