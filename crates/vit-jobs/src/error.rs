//! Job error types.

use thiserror::Error;

/// Errors from enqueueing or running a job.
#[derive(Debug, Error)]
pub enum JobError {
    /// The bounded queue is at capacity.
    #[error("job queue is full")]
    QueueFull,

    /// The queue has been shut down.
    #[error("job queue is closed")]
    Closed,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A template placeholder had no value.
    #[error("template error: {0}")]
    Template(String),

    /// Webhook signing failed.
    #[error("signing error: {0}")]
    Signing(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl JobError {
    /// Whether retrying cannot help.
    ///
    /// Client errors are permanent except `408 Request Timeout` and
    /// `429 Too Many Requests`. Transport failures and 5xx are retried.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::Api { status, .. } => {
                (400..500).contains(status) && *status != 408 && *status != 429
            }
            Self::Http(e) => e.is_builder(),
            Self::Template(_) | Self::Signing(_) | Self::Serialize(_) => true,
            Self::QueueFull | Self::Closed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400, true)]
    #[case(401, true)]
    #[case(404, true)]
    #[case(408, false)]
    #[case(422, true)]
    #[case(429, false)]
    #[case(500, false)]
    #[case(503, false)]
    fn api_status_permanence(#[case] status: u16, #[case] permanent: bool) {
        let err = JobError::Api {
            status,
            message: String::new(),
        };
        assert_eq!(err.is_permanent(), permanent);
    }

    #[test]
    fn template_errors_are_permanent() {
        assert!(JobError::Template("missing".into()).is_permanent());
    }
}
