use serde_json::json;
use vit_core::inputs::{CreateOrganizationInput, UpdateOrganizationInput};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine org`.
pub async fn handle(
    action: OrgCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.state.svc;
    let actor = Some(flags.actor.as_str());
    match action {
        OrgCommands::Create {
            name,
            slug,
            website_url,
            description,
        } => {
            let input = CreateOrganizationInput {
                name,
                slug,
                website_url,
                description,
            };
            output(&svc.create_organization(actor, input).await?, flags.format)
        }
        OrgCommands::Get { id, slug } => {
            let org = if slug {
                svc.get_organization_by_slug(&id).await?
            } else {
                svc.get_organization(&id).await?
            };
            output(&org, flags.format)
        }
        OrgCommands::Update {
            id,
            name,
            slug,
            website_url,
            description,
        } => {
            let input = UpdateOrganizationInput {
                name,
                slug,
                website_url,
                description,
            };
            output(&svc.update_organization(actor, &id, input).await?, flags.format)
        }
        OrgCommands::Delete { id } => {
            svc.delete_organization(actor, &id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        OrgCommands::List { offset } => {
            let limit = ctx.state.page_limit(flags.limit);
            let page = svc.list_organizations(limit, offset.unwrap_or(0)).await?;
            output(&page, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vit_config::VitConfig;

    use super::handle;
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::cli::subcommands::OrgCommands;
    use crate::context::AppContext;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            limit: None,
            quiet: true,
            verbose: false,
            config: None,
            actor: "ops-bot".into(),
        }
    }

    async fn context() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VitConfig::default();
        config.database.path = dir.path().join("cli.db").display().to_string();
        let ctx = AppContext::init(config).await.unwrap();
        (dir, ctx)
    }

    #[tokio::test]
    async fn create_then_delete_records_cli_actor() {
        let (_dir, ctx) = context().await;
        handle(
            OrgCommands::Create {
                name: "Lumen Labs".into(),
                slug: "lumen-labs".into(),
                website_url: None,
                description: None,
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        let org = ctx.state.svc.get_organization_by_slug("lumen-labs").await.unwrap();
        assert_eq!(org.name, "Lumen Labs");

        handle(OrgCommands::Delete { id: org.id.clone() }, &ctx, &flags())
            .await
            .unwrap();
        assert!(ctx.state.svc.get_organization(&org.id).await.is_err());

        let trail = ctx
            .state
            .svc
            .query_audit(&vit_db::repos::audit::AuditFilter {
                entity_id: Some(org.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(trail.len(), 2);
        assert!(trail.iter().all(|e| e.actor.as_deref() == Some("ops-bot")));
        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn duplicate_slug_is_an_error() {
        let (_dir, ctx) = context().await;
        let create = || OrgCommands::Create {
            name: "Lumen".into(),
            slug: "lumen".into(),
            website_url: None,
            description: None,
        };
        handle(create(), &ctx, &flags()).await.unwrap();
        assert!(handle(create(), &ctx, &flags()).await.is_err());
        ctx.shutdown().await;
    }
}
