use vit_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vitrine audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = AuditFilter {
        entity_type: parse_opt_enum(args.entity_type.as_deref(), "entity type")?,
        entity_id: args.entity_id.clone(),
        action: parse_opt_enum(args.action.as_deref(), "action")?,
        actor: args.by.clone(),
        limit: flags.limit,
    };
    output(&ctx.state.svc.query_audit(&filter).await?, flags.format)
}
