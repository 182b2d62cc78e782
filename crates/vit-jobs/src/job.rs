//! Job kinds and the handler seam the queue drives.

use std::future::Future;

use vit_config::{MailConfig, WebhooksConfig};

use crate::error::JobError;
use crate::mailer::{EmailMessage, Mailer};
use crate::webhook::{WebhookDelivery, WebhookEvent, WebhookRelay};

const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// A unit of background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    SendEmail(EmailMessage),
    DeliverWebhook(WebhookDelivery),
}

impl Job {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SendEmail(_) => "send_email",
            Self::DeliverWebhook(_) => "deliver_webhook",
        }
    }
}

/// Runs one attempt of a job.
pub trait JobHandler: Send + Sync + 'static {
    fn handle(&self, job: &Job) -> impl Future<Output = Result<(), JobError>> + Send;
}

/// Production handler: mail through [`Mailer`], webhooks through
/// [`WebhookRelay`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    mailer: Mailer,
    relay: WebhookRelay,
}

impl Dispatcher {
    /// Build both clients over one shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Http` if the HTTP client cannot be built.
    pub fn from_config(mail: &MailConfig, webhooks: &WebhooksConfig) -> Result<Self, JobError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            mailer: Mailer::new(http.clone(), mail.clone()),
            relay: WebhookRelay::new(http, webhooks.clone()),
        })
    }

    #[must_use]
    pub const fn relay(&self) -> &WebhookRelay {
        &self.relay
    }

    /// Jobs for an event: one delivery per configured webhook endpoint.
    #[must_use]
    pub fn webhook_jobs(&self, event: &WebhookEvent) -> Vec<Job> {
        self.relay.jobs_for(event)
    }
}

impl JobHandler for Dispatcher {
    async fn handle(&self, job: &Job) -> Result<(), JobError> {
        match job {
            Job::SendEmail(message) => self.mailer.send(message).await.map(|_| ()),
            Job::DeliverWebhook(delivery) => self.relay.deliver(delivery).await,
        }
    }
}
