//! # vit-jobs
//!
//! Background notifications for Vitrine.
//!
//! Request handlers enqueue [`Job`]s (welcome and publish emails, webhook
//! deliveries) and return immediately. A small pool of tokio workers runs
//! them with exponential backoff, giving up early on errors retrying cannot
//! fix.

pub mod error;
pub mod job;
pub mod mailer;
pub mod queue;
pub mod retry;
pub mod stats;
pub mod templates;
pub mod webhook;

pub use error::JobError;
pub use job::{Dispatcher, Job, JobHandler};
pub use mailer::{EmailMessage, MailOutcome, Mailer};
pub use queue::JobQueue;
pub use retry::RetryPolicy;
pub use stats::{JobStats, JobStatsSnapshot};
pub use templates::EmailTemplate;
pub use webhook::{WebhookDelivery, WebhookEvent, WebhookRelay};
