//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    String::from("127.0.0.1:8080")
}

fn default_public_url() -> String {
    String::from("http://localhost:8080")
}

/// 1 MiB. Media bytes never pass through the API.
const fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Bearer token guarding admin routes and GraphQL mutations. Empty leaves
    /// them open (development only).
    #[serde(default)]
    pub admin_token: String,

    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,

    /// Public base URL of the site, used for links in emails and webhooks.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            admin_token: String::new(),
            body_limit_bytes: default_body_limit_bytes(),
            public_url: default_public_url(),
        }
    }
}

impl ServerConfig {
    /// Whether admin routes require a bearer token.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !self.admin_token.is_empty()
    }
}
