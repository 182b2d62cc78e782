use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch an admin command to its handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(action, ctx, flags).await,
        Commands::App { action } => commands::app::handle(action, ctx, flags).await,
        Commands::Version { action } => commands::version::handle(action, ctx, flags).await,
        Commands::Timeline { action } => commands::timeline::handle(action, ctx, flags).await,
        Commands::Media { action } => commands::media::handle(action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Serve(_) | Commands::Migrate | Commands::Schema(_) => {
            anyhow::bail!("serve, migrate, and schema are handled before dispatch")
        }
    }
}
