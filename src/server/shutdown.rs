use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Cloneable stop switch for the accept loop.
///
/// The flag is checked once per loop iteration; the notification wakes a
/// loop that is parked in `accept` so it gets to that check.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    stopped: AtomicBool,
    notify: Notify,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        !self.inner.stopped.load(Ordering::Acquire)
    }

    /// Requests shutdown. Idempotent.
    pub fn trigger(&self) {
        self.inner.stopped.store(true, Ordering::Release);
        // notify_one keeps a permit if the loop is not currently waiting
        self.inner.notify.notify_one();
    }

    /// Resolves once shutdown has been requested.
    pub async fn notified(&self) {
        while self.is_running() {
            self.inner.notify.notified().await;
        }
    }

    /// Triggers once `signal` resolves.
    ///
    /// A signal source that fails to register never fires, so the server keeps
    /// running instead of stopping on the spot.
    pub async fn trigger_on<F>(&self, signal: F)
    where
        F: Future<Output = io::Result<()>>,
    {
        match signal.await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                self.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for shutdown signals");
                std::future::pending::<()>().await;
            }
        }
    }
}
