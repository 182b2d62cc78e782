//! Bounded in-process job queue drained by a pool of tokio workers.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vit_config::JobsConfig;

use crate::error::JobError;
use crate::job::{Job, JobHandler};
use crate::retry::RetryPolicy;
use crate::stats::{JobStats, JobStatsSnapshot};

type SharedReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<Job>>>;

/// Handle to a running queue.
///
/// `enqueue` never waits: a full queue is reported to the caller, who decides
/// whether dropping the job is acceptable.
pub struct JobQueue {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<JobStats>,
}

impl JobQueue {
    /// Spawn `config.workers` workers sharing one receiver.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn start<H: JobHandler>(handler: Arc<H>, config: &JobsConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let rx: SharedReceiver = Arc::new(tokio::sync::Mutex::new(rx));
        let stats = Arc::new(JobStats::default());
        let policy = RetryPolicy::from_config(config);

        let workers = (0..config.workers.max(1))
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&rx),
                    Arc::clone(&handler),
                    policy,
                    Arc::clone(&stats),
                ))
            })
            .collect();

        tracing::debug!(
            workers = config.workers.max(1),
            capacity = config.queue_capacity.max(1),
            "job queue started"
        );

        Self {
            sender: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
            stats,
        }
    }

    /// Queue a job without waiting.
    ///
    /// # Errors
    ///
    /// Returns `JobError::QueueFull` at capacity or `JobError::Closed` after
    /// shutdown.
    pub fn enqueue(&self, job: Job) -> Result<(), JobError> {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = sender.as_ref() else {
            self.stats.record_rejected();
            return Err(JobError::Closed);
        };
        match tx.try_send(job) {
            Ok(()) => {
                self.stats.record_enqueued();
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.stats.record_rejected();
                Err(JobError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.stats.record_rejected();
                Err(JobError::Closed)
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> JobStatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop accepting jobs and wait for workers to drain what is queued.
    pub async fn shutdown(&self) {
        drop(
            self.sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );
        let workers: Vec<JoinHandle<()>> = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for handle in workers {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "job worker panicked");
            }
        }
        tracing::debug!(stats = ?self.stats.snapshot(), "job queue drained");
    }
}

async fn run_worker<H: JobHandler>(
    worker: usize,
    rx: SharedReceiver,
    handler: Arc<H>,
    policy: RetryPolicy,
    stats: Arc<JobStats>,
) {
    loop {
        let next = rx.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };
        process(worker, &*handler, policy, &stats, &job).await;
    }
}

async fn process<H: JobHandler>(
    worker: usize,
    handler: &H,
    policy: RetryPolicy,
    stats: &JobStats,
    job: &Job,
) {
    let mut attempt = 1;
    loop {
        match handler.handle(job).await {
            Ok(()) => {
                stats.record_succeeded();
                return;
            }
            Err(e) if e.is_permanent() || attempt >= policy.max_attempts => {
                stats.record_dead();
                tracing::error!(worker, kind = job.kind(), attempt, error = %e, "job failed permanently");
                return;
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                stats.record_retried();
                tracing::warn!(
                    worker,
                    kind = job.kind(),
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "job failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mailer::EmailMessage;

    /// Fails with the scripted errors in order, then succeeds.
    struct Scripted {
        failures: std::sync::Mutex<VecDeque<JobError>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(failures: Vec<JobError>) -> Arc<Self> {
            Arc::new(Self {
                failures: std::sync::Mutex::new(failures.into()),
                calls: AtomicU32::new(0),
            })
        }
    }

    impl JobHandler for Scripted {
        async fn handle(&self, _job: &Job) -> Result<(), JobError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.failures.lock().unwrap().pop_front() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    fn fast_config() -> JobsConfig {
        JobsConfig {
            workers: 2,
            queue_capacity: 8,
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
        }
    }

    fn email() -> Job {
        Job::SendEmail(EmailMessage {
            to: "ada@example.com".into(),
            subject: "hi".into(),
            text: "hello".into(),
            html: None,
        })
    }

    fn server_error() -> JobError {
        JobError::Api {
            status: 503,
            message: "unavailable".into(),
        }
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let handler = Scripted::new(vec![server_error(), server_error()]);
        let queue = JobQueue::start(Arc::clone(&handler), &fast_config());
        queue.enqueue(email()).unwrap();
        queue.shutdown().await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
        let stats = queue.stats();
        assert_eq!(stats.enqueued, 1);
        assert_eq!(stats.retried, 2);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.dead, 0);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let handler = Scripted::new(vec![JobError::Api {
            status: 400,
            message: "bad address".into(),
        }]);
        let queue = JobQueue::start(Arc::clone(&handler), &fast_config());
        queue.enqueue(email()).unwrap();
        queue.shutdown().await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(queue.stats().dead, 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let handler = Scripted::new((0..10).map(|_| server_error()).collect());
        let queue = JobQueue::start(Arc::clone(&handler), &fast_config());
        queue.enqueue(email()).unwrap();
        queue.shutdown().await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
        let stats = queue.stats();
        assert_eq!(stats.retried, 2);
        assert_eq!(stats.dead, 1);
    }

    #[tokio::test]
    async fn enqueue_after_shutdown_is_closed() {
        let queue = JobQueue::start(Scripted::new(vec![]), &fast_config());
        queue.shutdown().await;
        assert!(matches!(queue.enqueue(email()), Err(JobError::Closed)));
        assert_eq!(queue.stats().rejected, 1);
    }

    /// Blocks every job until released, so the channel fills up.
    struct Gate(tokio::sync::Semaphore);

    impl JobHandler for Gate {
        async fn handle(&self, _job: &Job) -> Result<(), JobError> {
            let _permit = self.0.acquire().await.map_err(|_| JobError::Closed)?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn full_queue_rejects_without_blocking() {
        let gate = Arc::new(Gate(tokio::sync::Semaphore::new(0)));
        let config = JobsConfig {
            workers: 1,
            queue_capacity: 1,
            ..fast_config()
        };
        let queue = JobQueue::start(Arc::clone(&gate), &config);

        // One job may be held by the worker, one sits in the channel; the
        // rest must be refused.
        let results: Vec<bool> = (0..4).map(|_| queue.enqueue(email()).is_ok()).collect();
        assert!(results.iter().filter(|ok| !**ok).count() >= 2, "{results:?}");
        assert!(queue.stats().rejected >= 2);

        gate.0.add_permits(10);
        queue.shutdown().await;
        assert_eq!(queue.stats().succeeded, queue.stats().enqueued);
    }

    #[tokio::test]
    async fn shutdown_drains_queued_jobs() {
        let handler = Scripted::new(vec![]);
        let queue = JobQueue::start(Arc::clone(&handler), &fast_config());
        for _ in 0..5 {
            queue.enqueue(email()).unwrap();
        }
        queue.shutdown().await;
        assert_eq!(handler.calls.load(Ordering::SeqCst), 5);
        assert_eq!(queue.stats().succeeded, 5);
    }
}
