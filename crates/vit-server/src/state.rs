//! Shared application state handed to every handler.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use vit_config::VitConfig;
use vit_db::service::VitService;
use vit_jobs::{Dispatcher, JobQueue};
use vit_storage::MediaStore;

/// Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub svc: Arc<VitService>,
    pub storage: MediaStore,
    pub jobs: Arc<JobQueue>,
    pub dispatcher: Arc<Dispatcher>,
    pub config: Arc<VitConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(
        svc: Arc<VitService>,
        storage: MediaStore,
        jobs: Arc<JobQueue>,
        dispatcher: Arc<Dispatcher>,
        config: Arc<VitConfig>,
    ) -> Self {
        Self {
            svc,
            storage,
            jobs,
            dispatcher,
            config,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Resolve a requested page size against the configured default and cap.
    #[must_use]
    pub fn page_limit(&self, requested: Option<u32>) -> u32 {
        self.config.general.clamp_limit(requested)
    }
}
