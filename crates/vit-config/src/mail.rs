//! Transactional mail API configuration.

use serde::{Deserialize, Serialize};

fn default_from_address() -> String {
    String::from("Vitrine <no-reply@vitrine.local>")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// HTTP endpoint accepting JSON messages.
    #[serde(default)]
    pub api_url: String,

    /// Bearer key for the mail API.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
        }
    }
}

impl MailConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}
