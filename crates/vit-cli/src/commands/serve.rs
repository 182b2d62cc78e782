use anyhow::Context;
use vit_config::VitConfig;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `vitrine serve`.
pub async fn handle(args: &ServeArgs, mut config: VitConfig) -> anyhow::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if !config.server.requires_auth() {
        tracing::warn!("server.admin_token is empty; admin routes are open");
    }
    let bind = config.server.bind.clone();

    let ctx = AppContext::init(config).await?;
    vit_server::serve(ctx.state.clone(), &bind, shutdown_signal())
        .await
        .with_context(|| format!("server failed on {bind}"))?;

    tracing::info!("draining background jobs");
    ctx.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "cannot listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
