//! Shutdown utilities for graceful termination.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tracing::info;

/// A cloneable signal for requesting server shutdown.
///
/// Triggering is idempotent: the first call takes effect, later calls are
/// no-ops. Waiters registered before or after the trigger all observe it.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Set once shutdown has been requested.
    triggered: AtomicBool,
    /// Wakes tasks blocked in `wait()`.
    notify: Notify,
}

impl ShutdownSignal {
    /// Creates an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown.
    ///
    /// Sets the flag before waking waiters so a waiter observing the wakeup
    /// always observes the flag too.
    pub fn trigger(&self) {
        if !self.inner.triggered.swap(true, Ordering::Release) {
            self.inner.notify.notify_waiters();
        }
    }

    /// Returns `true` if shutdown has been requested.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::Acquire)
    }

    /// Completes when shutdown has been requested.
    ///
    /// Completes immediately if the trigger already happened. The notified
    /// future is enabled before the flag is re-checked, closing the window
    /// where a trigger lands between the check and the registration.
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);

        loop {
            if self.is_triggered() {
                return;
            }
            notified.as_mut().enable();
            if self.is_triggered() {
                return;
            }
            notified.as_mut().await;
            notified.set(self.inner.notify.notified());
        }
    }
}

/// Spawns a task that trips `shutdown` on `SIGINT` or `SIGTERM`.
///
/// Returns an error if the signal streams cannot be registered.
pub fn listen_for_signals(shutdown: ShutdownSignal) -> io::Result<tokio::task::JoinHandle<()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
        info!("Caught signal, exiting");
        shutdown.trigger();
    }))
}
