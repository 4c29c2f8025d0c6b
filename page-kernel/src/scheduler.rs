//! Concurrency-capped scheduler for page load tasks.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Maximum number of page loads allowed in flight at once.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    max_concurrent_loads: NonZeroUsize,
}

impl SchedulerConfig {
    /// Creates a new configuration with the supplied concurrency limit.
    #[must_use]
    pub const fn new(max_concurrent_loads: NonZeroUsize) -> Self {
        Self {
            max_concurrent_loads,
        }
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub const fn max_concurrent_loads(self) -> NonZeroUsize {
        self.max_concurrent_loads
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(32).expect("non-zero"))
    }
}

/// Lightweight wrapper around `tokio::spawn` that bounds concurrent loads.
///
/// Each scheduled load runs as an independent task; loads never share mutable
/// state, so the cap exists only to keep a burst of requests from exhausting
/// the host.
#[derive(Debug, Clone)]
pub struct LoadScheduler {
    semaphore: Arc<Semaphore>,
    closed: Arc<AtomicBool>,
    config: SchedulerConfig,
}

impl LoadScheduler {
    /// Constructs a scheduler using the provided configuration.
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        let permits = config.max_concurrent_loads().get();
        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            closed: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// Returns the associated configuration.
    #[must_use]
    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Returns `true` if the scheduler has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Closes the scheduler, preventing new loads from being spawned.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.semaphore.close();
    }

    /// Spawns a future, respecting the configured concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Closed`] when the scheduler is closed before
    /// the load is enqueued.
    ///
    /// # Panics
    ///
    /// Panics if the scheduler is closed while a load is awaiting a
    /// concurrency permit. This indicates that `close` was invoked
    /// concurrently with load submission.
    pub fn spawn<F, T>(&self, future: F) -> SchedulerResult<JoinHandle<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.is_closed() {
            return Err(SchedulerError::Closed);
        }

        let semaphore = Arc::clone(&self.semaphore);

        let handle = tokio::spawn(async move {
            let permit = semaphore
                .acquire_owned()
                .await
                .expect("scheduler closed while awaiting permit");
            let output = future.await;
            drop(permit);
            output
        });

        Ok(handle)
    }
}

impl Default for LoadScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

/// Errors produced by the scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// Scheduler is closed and will not accept new loads.
    #[error("load scheduler closed")]
    Closed,
}

/// Result alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn respects_concurrency_cap() {
        let config = SchedulerConfig::new(NonZeroUsize::new(2).unwrap());
        let scheduler = LoadScheduler::new(config);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let scheduler = scheduler.clone();
            let in_flight = Arc::clone(&in_flight);
            let max_seen = Arc::clone(&max_seen);
            handles.push(
                scheduler
                    .spawn(async move {
                        let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(current, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    })
                    .unwrap(),
            );
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn close_prevents_new_loads() {
        let scheduler = LoadScheduler::default();
        scheduler.close();

        let result = scheduler.spawn(async move {});
        assert_eq!(result.unwrap_err(), SchedulerError::Closed);
    }
}
