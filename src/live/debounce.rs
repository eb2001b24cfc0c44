//! Restart-on-trigger delay timer

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Runs the most recently scheduled job once `delay` has passed without a
/// newer one being scheduled.
///
/// Scheduling cancels whatever was pending, so at most one job is waiting at
/// a time and a superseded job never starts. A job that has already started
/// cannot be stopped; instead it receives a [`Lease`] that goes stale as soon
/// as the debouncer is rescheduled or cancelled, and must check it before
/// publishing anything. Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    token: CancellationToken,
    started: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Handed to a running job; current until its debouncer moves on
#[derive(Debug, Clone)]
pub struct Lease {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl Lease {
    /// Whether no schedule or cancel has happened since this job was scheduled
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending job with `job`, due `delay` from now
    pub fn schedule<F>(&mut self, job: F)
    where
        F: FnOnce(Lease) + Send + 'static,
    {
        self.cancel();

        let lease = Lease {
            generation: self.generation.clone(),
            issued: self.generation.load(Ordering::SeqCst),
        };
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let started = Arc::new(AtomicBool::new(false));
        let started_flag = started.clone();
        // Deadline is fixed here, not when the task is first polled
        let deadline = Instant::now() + self.delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    started_flag.store(true, Ordering::SeqCst);
                    job(lease);
                }
            }
        });

        self.pending = Some(Pending {
            token,
            started,
            handle,
        });
    }

    /// Drop the pending job, if any, and invalidate the lease of a job that
    /// is already running.
    ///
    /// Returns `true` only if a job was still waiting on its timer, i.e. it
    /// will now never start. A job caught mid-run yields `false`.
    pub fn cancel(&mut self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        match self.pending.take() {
            Some(pending) => {
                pending.token.cancel();
                !pending.started.load(Ordering::SeqCst)
            }
            None => false,
        }
    }

    /// Whether a job is scheduled and has not started yet
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.started.load(Ordering::SeqCst) && !p.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
