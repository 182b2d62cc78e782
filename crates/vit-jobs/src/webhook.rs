//! Signed webhook delivery.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use vit_config::WebhooksConfig;

use crate::error::JobError;
use crate::job::Job;

type HmacSha256 = Hmac<Sha256>;

pub const EVENT_HEADER: &str = "x-vitrine-event";
pub const SIGNATURE_HEADER: &str = "x-vitrine-signature";

/// Event body posted to every webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Dotted event name, e.g. `app.published`.
    pub event: String,
    pub occurred_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl WebhookEvent {
    #[must_use]
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            occurred_at: Utc::now(),
            data,
        }
    }
}

/// One event bound for one endpoint. Endpoints are retried independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDelivery {
    pub url: String,
    pub event: WebhookEvent,
}

/// `sha256=<hex HMAC-SHA256(body)>`.
///
/// # Errors
///
/// Returns `JobError::Signing` if the key is rejected.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, JobError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| JobError::Signing(e.to_string()))?;
    mac.update(body);
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}

/// Posts events to the configured endpoints.
#[derive(Debug, Clone)]
pub struct WebhookRelay {
    http: reqwest::Client,
    config: WebhooksConfig,
}

impl WebhookRelay {
    #[must_use]
    pub const fn new(http: reqwest::Client, config: WebhooksConfig) -> Self {
        Self { http, config }
    }

    /// One delivery job per configured endpoint.
    #[must_use]
    pub fn jobs_for(&self, event: &WebhookEvent) -> Vec<Job> {
        self.config
            .urls
            .iter()
            .map(|url| {
                Job::DeliverWebhook(WebhookDelivery {
                    url: url.clone(),
                    event: event.clone(),
                })
            })
            .collect()
    }

    /// POST one event to one endpoint.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Http` on transport failure or `JobError::Api` for a
    /// non-success status.
    pub async fn deliver(&self, delivery: &WebhookDelivery) -> Result<(), JobError> {
        let body = serde_json::to_vec(&delivery.event)?;

        let mut req = self
            .http
            .post(&delivery.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(EVENT_HEADER, delivery.event.event.as_str());
        if !self.config.secret.is_empty() {
            req = req.header(SIGNATURE_HEADER, sign(&self.config.secret, &body)?);
        }

        let resp = req.body(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(JobError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(url = %delivery.url, event = %delivery.event.event, "webhook delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn signature_matches_known_vector() {
        // RFC 4231 test case 2.
        let sig = sign("Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            sig,
            "sha256=5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn one_job_per_endpoint() {
        let relay = WebhookRelay::new(
            reqwest::Client::new(),
            WebhooksConfig {
                urls: vec!["http://a.test/hook".into(), "http://b.test/hook".into()],
                secret: String::new(),
            },
        );
        let jobs = relay.jobs_for(&WebhookEvent::new("app.published", serde_json::json!({})));
        assert_eq!(jobs.len(), 2);
        assert!(matches!(&jobs[1], Job::DeliverWebhook(d) if d.url == "http://b.test/hook"));
    }
}
