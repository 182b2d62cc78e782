//! Outgoing webhook configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhooksConfig {
    /// Endpoints receiving every event.
    #[serde(default)]
    pub urls: Vec<String>,

    /// HMAC-SHA256 signing secret. Empty disables signing.
    #[serde(default)]
    pub secret: String,
}

impl WebhooksConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.urls.is_empty()
    }
}
