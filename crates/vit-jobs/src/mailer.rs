//! Transactional email through an HTTP mail API.

use serde::{Deserialize, Serialize};
use vit_config::MailConfig;

use crate::error::JobError;

/// One outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Result of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailOutcome {
    Sent,
    /// No mail API configured; the message was logged and dropped.
    Skipped,
}

/// Client for the configured mail API.
#[derive(Debug, Clone)]
pub struct Mailer {
    http: reqwest::Client,
    config: MailConfig,
}

impl Mailer {
    #[must_use]
    pub const fn new(http: reqwest::Client, config: MailConfig) -> Self {
        Self { http, config }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// POST the message as JSON to `mail.api_url` with a bearer key.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Http` on transport failure or `JobError::Api` for a
    /// non-success status.
    pub async fn send(&self, message: &EmailMessage) -> Result<MailOutcome, JobError> {
        if !self.is_configured() {
            tracing::info!(
                to = %message.to,
                subject = %message.subject,
                "mail not configured; dropping message"
            );
            return Ok(MailOutcome::Skipped);
        }

        let payload = MailPayload {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
        };

        let resp = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(JobError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(to = %message.to, "email sent");
        Ok(MailOutcome::Sent)
    }
}
