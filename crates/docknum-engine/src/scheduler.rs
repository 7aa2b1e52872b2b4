//! Deferred one-shot work with cancellation.
//!
//! Hotkey dispatch runs inline on the platform event loop and must not block.
//! Anything that has to wait (a debounced launch, a staggered combo step) is
//! handed to the [`Scheduler`], which runs it on the tokio runtime after a
//! delay. Shutdown cancels every pending closure; a closure that has already
//! started is left to finish.

use std::time::Duration;

use tokio::{runtime::Handle, time};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::{Error, Result};

/// Runs closures after a delay on a tokio runtime.
#[derive(Clone, Debug)]
pub struct Scheduler {
    handle: Handle,
    shutdown: CancellationToken,
}

impl Scheduler {
    /// Schedule onto the runtime behind `handle`.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            shutdown: CancellationToken::new(),
        }
    }

    /// Schedule onto the runtime the caller is running in.
    ///
    /// Panics outside a tokio runtime, like [`Handle::current`].
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Run `f` once `delay` has elapsed, unless the scheduler is shut down
    /// first. The deadline is fixed when this is called. Fails with
    /// [`Error::ShutDown`] if the scheduler was already shut down.
    pub fn after<F>(&self, delay: Duration, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.shutdown.is_cancelled() {
            trace!("scheduler_rejected");
            return Err(Error::ShutDown);
        }
        let deadline = time::Instant::now() + delay;
        let cancel = self.shutdown.clone();
        self.handle.spawn(async move {
            tokio::select! {
                _ = time::sleep_until(deadline) => f(),
                _ = cancel.cancelled() => {
                    trace!(delay_ms = delay.as_millis(), "scheduled_cancelled");
                }
            }
        });
        Ok(())
    }

    /// Cancel all pending closures and reject new ones. Does not wait.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// True once [`Scheduler::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use parking_lot::Mutex;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let s = Scheduler::current();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        s.after(Duration::from_millis(10), move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .expect("scheduler accepts work");

        time::sleep(Duration::from_millis(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_and_rejects_new() {
        let s = Scheduler::current();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        s.after(Duration::from_millis(10), move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .expect("scheduler accepts work");
        s.shutdown();
        assert!(s.is_shut_down());
        assert!(matches!(
            s.after(Duration::ZERO, || {}),
            Err(Error::ShutDown)
        ));

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_fixed_at_schedule_time() {
        let s = Scheduler::current();
        let start = time::Instant::now();
        let fired = Arc::new(Mutex::new(None));
        let f = fired.clone();
        s.after(Duration::from_millis(3), move || {
            *f.lock() = Some(time::Instant::now());
        })
        .expect("scheduler accepts work");

        time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*fired.lock(), Some(start + Duration::from_millis(3)));
    }
}
