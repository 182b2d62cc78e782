use serde_json::json;
use vit_core::inputs::{RequestUploadInput, UpdateMediaInput};
use vit_server::ops;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MediaCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine media`.
pub async fn handle(
    action: MediaCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let state = &ctx.state;
    let actor = Some(flags.actor.as_str());
    match action {
        MediaCommands::Request {
            app_id,
            kind,
            file,
            content_type,
            size,
            alt_text,
            position,
        } => {
            let input = RequestUploadInput {
                app_id,
                kind: parse_enum(&kind, "kind")?,
                file_name: file,
                content_type,
                size_bytes: size,
                alt_text,
                position,
            };
            output(&ops::request_upload(state, actor, input).await?, flags.format)
        }
        MediaCommands::Complete { id } => {
            output(&ops::complete_upload(state, actor, &id).await?, flags.format)
        }
        MediaCommands::Retry { id } => {
            output(&ops::retry_upload(state, actor, &id).await?, flags.format)
        }
        MediaCommands::Get { id } => output(&ops::get_media(state, &id).await?, flags.format),
        MediaCommands::Update {
            id,
            alt_text,
            position,
        } => {
            let input = UpdateMediaInput { alt_text, position };
            let media = state.svc.update_media(actor, &id, input).await?;
            output(&ops::with_url(state, media).await?, flags.format)
        }
        MediaCommands::Delete { id } => {
            ops::delete_media(state, actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        MediaCommands::List { app_id, ready } => {
            output(&ops::list_media(state, &app_id, ready).await?, flags.format)
        }
    }
}
