use std::sync::Arc;

use anyhow::Context;
use vit_config::VitConfig;
use vit_jobs::{Dispatcher, JobQueue};
use vit_server::AppState;
use vit_storage::MediaStore;

use crate::bootstrap;

/// Shared resources for admin commands: the same state the server runs on,
/// so CLI mutations send the same notifications.
pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn init(config: VitConfig) -> anyhow::Result<Self> {
        let svc = bootstrap::open_service(&config).await?;
        let storage = MediaStore::from_config_or_memory(&config.storage)
            .context("failed to initialize media storage")?;
        let dispatcher = Arc::new(
            Dispatcher::from_config(&config.mail, &config.webhooks)
                .context("failed to build notification clients")?,
        );
        let jobs = Arc::new(JobQueue::start(Arc::clone(&dispatcher), &config.jobs));
        Ok(Self {
            state: AppState::new(Arc::new(svc), storage, jobs, dispatcher, Arc::new(config)),
        })
    }

    /// Let queued notifications finish before the process exits.
    pub async fn shutdown(&self) {
        self.state.jobs.shutdown().await;
    }
}
