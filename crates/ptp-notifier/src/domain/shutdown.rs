//! Process-wide shutdown signal.
//!
//! Fire-once broadcast over a `watch` channel: every listener observes the
//! same transition, nothing is consumed, and a listener created after the
//! signal fired sees it immediately. Dropping the signal counts as firing.

use tokio::sync::watch;

/// Owner side of the shutdown signal.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Hand out an independent listener.
    #[must_use]
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Fire the signal. Returns `true` only for the call that fired it.
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener side of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Wait until shutdown fires (or the signal is dropped).
    ///
    /// Cancel-safe: may be used as a `select!` branch.
    pub async fn wait(&mut self) {
        // Err means the sender is gone, which is shutdown as well.
        let _ = self.rx.wait_for(|fired| *fired).await;
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_fire_once() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_fired());
        assert!(signal.fire());
        assert!(!signal.fire());
        assert!(signal.is_fired());
    }

    #[tokio::test]
    async fn test_all_listeners_observe() {
        let signal = ShutdownSignal::new();
        let mut a = signal.listener();
        let mut b = signal.listener();

        signal.fire();

        timeout(Duration::from_millis(100), a.wait()).await.expect("a");
        timeout(Duration::from_millis(100), b.wait()).await.expect("b");
        // Not consumed: waiting again returns immediately
        timeout(Duration::from_millis(100), a.wait()).await.expect("a again");
    }

    #[tokio::test]
    async fn test_late_listener_sees_fired() {
        let signal = ShutdownSignal::new();
        signal.fire();

        let mut late = signal.listener();
        assert!(late.is_fired());
        timeout(Duration::from_millis(100), late.wait()).await.expect("late");
    }

    #[tokio::test]
    async fn test_dropped_signal_releases_listeners() {
        let signal = ShutdownSignal::new();
        let mut listener = signal.listener();
        drop(signal);

        timeout(Duration::from_millis(100), listener.wait())
            .await
            .expect("dropped signal should release waiters");
    }

    #[tokio::test]
    async fn test_wait_blocks_until_fired() {
        let signal = ShutdownSignal::new();
        let mut listener = signal.listener();

        assert!(timeout(Duration::from_millis(20), listener.wait()).await.is_err());
    }
}
