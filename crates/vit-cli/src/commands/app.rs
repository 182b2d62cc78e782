use serde_json::json;
use vit_core::enums::AppStatus;
use vit_core::inputs::{AppFilter, CreateAppInput, UpdateAppInput};
use vit_server::ops;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AppCommands, AppCreateArgs, AppListArgs, AppUpdateArgs};
use crate::commands::shared::parse::{parse_enum, parse_enums, parse_opt_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine app`.
pub async fn handle(
    action: AppCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.state.svc;
    let actor = Some(flags.actor.as_str());
    match action {
        AppCommands::Create(args) => {
            let input = create_input(args)?;
            output(&svc.create_app(actor, input).await?, flags.format)
        }
        AppCommands::Get { id, slug } => {
            let app = if slug {
                svc.get_app_by_slug(&id).await?
            } else {
                svc.get_app(&id).await?
            };
            output(&app, flags.format)
        }
        AppCommands::Update(args) => {
            let id = args.id.clone();
            let input = update_input(args)?;
            output(&svc.update_app(actor, &id, input).await?, flags.format)
        }
        AppCommands::Status { id, status } => {
            let next: AppStatus = parse_enum(&status, "status")?;
            output(&ops::transition_app(&ctx.state, actor, &id, next).await?, flags.format)
        }
        AppCommands::Delete { id } => {
            ops::delete_app(&ctx.state, actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        AppCommands::List(args) => {
            let limit = ctx.state.page_limit(flags.limit);
            let offset = args.offset.unwrap_or(0);
            let catalog = args.catalog;
            let filter = list_filter(args)?;
            let page = if catalog {
                svc.catalog(&filter, limit, offset).await?
            } else {
                svc.list_apps(&filter, limit, offset).await?
            };
            output(&page, flags.format)
        }
    }
}

fn create_input(args: AppCreateArgs) -> anyhow::Result<CreateAppInput> {
    Ok(CreateAppInput {
        slug: args.slug,
        name: args.name,
        tagline: args.tagline,
        description: args.description,
        platforms: parse_enums(&args.platforms, "platform")?,
        tags: args.tags,
        website_url: args.website_url,
        repository_url: args.repository_url,
        organization_id: args.org,
        owner_id: args.owner,
        featured: args.featured,
    })
}

fn update_input(args: AppUpdateArgs) -> anyhow::Result<UpdateAppInput> {
    Ok(UpdateAppInput {
        slug: args.slug,
        name: args.name,
        tagline: args.tagline,
        description: args.description,
        platforms: args
            .platforms
            .map(|p| parse_enums(&p, "platform"))
            .transpose()?,
        tags: args.tags,
        website_url: args.website_url,
        repository_url: args.repository_url,
        organization_id: args.org,
        owner_id: args.owner,
        featured: args.featured,
    })
}

fn list_filter(args: AppListArgs) -> anyhow::Result<AppFilter> {
    Ok(AppFilter {
        status: parse_opt_enum(args.status.as_deref(), "status")?,
        platform: parse_opt_enum(args.platform.as_deref(), "platform")?,
        organization_id: args.org,
        tag: args.tag,
        featured: args.featured,
        query: args.query,
    })
}
