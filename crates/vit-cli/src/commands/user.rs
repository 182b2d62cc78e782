use serde_json::json;
use vit_core::inputs::{CreateUserInput, UpdateUserInput};
use vit_server::ops;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine user`.
pub async fn handle(
    action: UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.state.svc;
    let actor = Some(flags.actor.as_str());
    match action {
        UserCommands::Create {
            email,
            name,
            role,
            org,
            avatar_url,
        } => {
            let input = CreateUserInput {
                email,
                name,
                role: parse_opt_enum(role.as_deref(), "role")?,
                organization_id: org,
                avatar_url,
            };
            output(&ops::create_user(&ctx.state, actor, input).await?, flags.format)
        }
        UserCommands::Get { id, email } => {
            let user = if email {
                svc.get_user_by_email(&id).await?
            } else {
                svc.get_user(&id).await?
            };
            output(&user, flags.format)
        }
        UserCommands::Update {
            id,
            email,
            name,
            role,
            org,
            avatar_url,
        } => {
            let input = UpdateUserInput {
                email,
                name,
                role: parse_opt_enum(role.as_deref(), "role")?,
                organization_id: org,
                avatar_url,
            };
            output(&svc.update_user(actor, &id, input).await?, flags.format)
        }
        UserCommands::Delete { id } => {
            svc.delete_user(actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        UserCommands::List { org, offset } => {
            let limit = ctx.state.page_limit(flags.limit);
            let page = svc
                .list_users(org.as_deref(), limit, offset.unwrap_or(0))
                .await?;
            output(&page, flags.format)
        }
    }
}
