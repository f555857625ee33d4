// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared queue and batch drain loop.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use postforge_config::model::QueueConfig;
use postforge_core::{PostforgeError, Priority};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::handle::TaskHandle;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Batch size and inter-batch pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Tasks started together per batch; also the concurrency ceiling.
    pub concurrency: usize,
    /// Pause after a batch when more work is queued.
    pub batch_delay: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            batch_delay: Duration::from_millis(1000),
        }
    }
}

impl SchedulerSettings {
    pub fn from_config(config: &QueueConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }
}

struct QueueState {
    jobs: VecDeque<Job>,
    /// A drain loop is alive. Only changed while holding the lock.
    draining: bool,
}

struct Shared {
    settings: SchedulerSettings,
    state: Mutex<QueueState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to one shared queue.
#[derive(Clone)]
pub struct RequestScheduler {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for RequestScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScheduler")
            .field("settings", &self.shared.settings)
            .field("pending", &self.pending())
            .finish()
    }
}

impl Default for RequestScheduler {
    fn default() -> Self {
        Self::new(SchedulerSettings::default())
    }
}

impl RequestScheduler {
    pub fn new(settings: SchedulerSettings) -> Self {
        let settings = SchedulerSettings {
            concurrency: settings.concurrency.max(1),
            ..settings
        };
        Self {
            shared: Arc::new(Shared {
                settings,
                state: Mutex::new(QueueState {
                    jobs: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.shared.settings
    }

    /// Tasks queued but not yet started.
    pub fn pending(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    /// Whether a drain loop is currently running.
    pub fn is_draining(&self) -> bool {
        self.shared.lock().draining
    }

    /// Queue `task` and return a handle to its result.
    ///
    /// The task is enqueued before this returns: [`Priority::High`] goes to
    /// the front of the queue, everything else to the back. Priority is
    /// never reconsidered after this point. A failing or panicking task
    /// only affects its own handle.
    pub fn submit<T, F, Fut>(&self, priority: Priority, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, PostforgeError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let result = task().await;
            // The caller may have stopped waiting; that is not an error here.
            let _ = tx.send(result);
        });

        let start_drain = {
            let mut state = self.shared.lock();
            match priority {
                Priority::High => state.jobs.push_front(job),
                Priority::Normal | Priority::Low => state.jobs.push_back(job),
            }
            debug!(%priority, pending = state.jobs.len(), "task queued");
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            self.spawn_drain();
        }
        TaskHandle::new(rx)
    }

    fn spawn_drain(&self) {
        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(drain(self.shared.clone()));
            }
            Err(e) => {
                // Without a runtime nothing can run; dropping the jobs
                // resolves their handles with a scheduler error.
                let dropped: Vec<Job> = {
                    let mut state = self.shared.lock();
                    state.draining = false;
                    state.jobs.drain(..).collect()
                };
                warn!(error = %e, dropped = dropped.len(), "no async runtime, queued tasks dropped");
            }
        }
    }
}

async fn drain(shared: Arc<Shared>) {
    let SchedulerSettings {
        concurrency,
        batch_delay,
    } = shared.settings;

    loop {
        let batch: Vec<Job> = {
            let mut state = shared.lock();
            if state.jobs.is_empty() {
                state.draining = false;
                return;
            }
            let take = concurrency.min(state.jobs.len());
            state.jobs.drain(..take).collect()
        };
        debug!(batch = batch.len(), "starting scheduler batch");

        let running: Vec<_> = batch.into_iter().map(tokio::spawn).collect();
        for outcome in futures::future::join_all(running).await {
            if let Err(e) = outcome {
                warn!(error = %e, "scheduled task did not complete");
            }
        }

        let remaining = shared.lock().jobs.len();
        if remaining > 0 {
            debug!(remaining, delay_ms = batch_delay.as_millis() as u64, "pausing between batches");
            tokio::time::sleep(batch_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let scheduler = RequestScheduler::new(SchedulerSettings {
            concurrency: 0,
            batch_delay: Duration::ZERO,
        });
        assert_eq!(scheduler.settings().concurrency, 1);
    }

    #[test]
    fn settings_from_queue_config() {
        let config = QueueConfig {
            concurrency: 4,
            batch_delay_ms: 250,
        };
        let settings = SchedulerSettings::from_config(&config);
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.batch_delay, Duration::from_millis(250));
    }

    #[test]
    fn submit_without_runtime_resolves_to_scheduler_error() {
        let scheduler = RequestScheduler::default();
        let handle = scheduler.submit(Priority::Normal, || async { Ok(1) });
        let result = futures::executor::block_on(handle);
        assert!(matches!(result, Err(PostforgeError::Scheduler(_))));
        assert_eq!(scheduler.pending(), 0);
        assert!(!scheduler.is_draining());
    }

    #[tokio::test(start_paused = true)]
    async fn tasks_are_queued_synchronously() {
        let scheduler = RequestScheduler::default();
        let a = scheduler.submit(Priority::Low, || async { Ok::<_, PostforgeError>("a") });
        let b = scheduler.submit(Priority::Low, || async { Ok::<_, PostforgeError>("b") });
        let c = scheduler.submit(Priority::Low, || async { Ok::<_, PostforgeError>("c") });
        // The drain loop has not been polled yet on this single-threaded runtime.
        assert_eq!(scheduler.pending(), 3);
        assert!(scheduler.is_draining());

        assert_eq!(a.await.unwrap(), "a");
        assert_eq!(b.await.unwrap(), "b");
        assert_eq!(c.await.unwrap(), "c");
        assert_eq!(scheduler.pending(), 0);
    }
}
