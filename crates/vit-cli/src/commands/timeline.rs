use serde_json::json;
use vit_core::inputs::{CreateTimelineEventInput, UpdateTimelineEventInput};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TimelineCommands;
use crate::commands::shared::parse::{parse_datetime, parse_enum, parse_opt_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine timeline`.
pub async fn handle(
    action: TimelineCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.state.svc;
    let actor = Some(flags.actor.as_str());
    match action {
        TimelineCommands::Create {
            app_id,
            kind,
            title,
            body,
            link_url,
            occurred_at,
        } => {
            let input = CreateTimelineEventInput {
                app_id,
                kind: parse_enum(&kind, "kind")?,
                title,
                body,
                link_url,
                occurred_at: parse_datetime(occurred_at.as_deref(), "occurred_at")?,
            };
            output(&svc.create_timeline_event(actor, input).await?, flags.format)
        }
        TimelineCommands::Get { id } => output(&svc.get_timeline_event(&id).await?, flags.format),
        TimelineCommands::Update {
            id,
            kind,
            title,
            body,
            link_url,
            occurred_at,
        } => {
            let input = UpdateTimelineEventInput {
                kind: parse_opt_enum(kind.as_deref(), "kind")?,
                title,
                body,
                link_url,
                occurred_at: parse_datetime(occurred_at.as_deref(), "occurred_at")?,
            };
            output(&svc.update_timeline_event(actor, &id, input).await?, flags.format)
        }
        TimelineCommands::Delete { id } => {
            svc.delete_timeline_event(actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        TimelineCommands::List { app_id } => output(&svc.list_timeline(&app_id).await?, flags.format),
    }
}
