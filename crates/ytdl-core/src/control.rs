//! Stop requests for the in-flight download.
//!
//! The CLI sets the signal from its Ctrl-C handler. The yt-dlp runner waits on
//! it alongside the child process and kills the child when it fires; batch
//! downloads check it between URLs.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Shared stop flag plus a notifier for tasks awaiting it.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Idempotent; wakes every current waiter.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Completes once a stop has been requested (immediately if it already was).
    pub async fn stopped(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }
}
