//! Background job queue configuration.

use serde::{Deserialize, Serialize};

const fn default_workers() -> usize {
    2
}

const fn default_queue_capacity() -> usize {
    256
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    500
}

const fn default_max_delay_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Number of worker tasks draining the queue.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Bounded channel size. Enqueue fails fast once full.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Attempts per job, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = JobsConfig::default();
        assert_eq!(config.workers, 2);
        assert_eq!(config.queue_capacity, 256);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.base_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 30_000);
    }
}
