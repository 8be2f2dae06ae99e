//! Background refresh of the unread message count shown in the admin sidebar.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::session::AuthToken;

struct Running {
    token: AuthToken,
    generation: u64,
    handle: JoinHandle<()>,
}

/// Periodically re-fetches `/messages` with the token of the admin who last
/// logged in or was verified.
pub struct UnreadPoller {
    interval: Duration,
    count: Arc<AtomicUsize>,
    running: Mutex<Option<Running>>,
    generation: AtomicU64,
}

impl UnreadPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            count: Arc::new(AtomicUsize::new(0)),
            running: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Last known unread count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Record a count observed outside the poll loop (e.g. the messages page).
    pub fn set_count(&self, count: usize) {
        self.count.store(count, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.lock()
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    /// Start polling with `token`. A running poll for the same token is kept;
    /// one for a different token is replaced.
    pub fn start(&self, api: Arc<ApiClient>, token: AuthToken) {
        let mut running = self.lock();
        if let Some(current) = running.as_ref() {
            if current.token == token && !current.handle.is_finished() {
                return;
            }
        }
        if let Some(previous) = running.take() {
            previous.handle.abort();
        }

        let count = Arc::clone(&self.count);
        let interval = self.interval;
        let poll_token = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match api.fetch_messages(&poll_token).await {
                    Ok(messages) => {
                        let unread = messages.iter().filter(|m| !m.is_read).count();
                        count.store(unread, Ordering::Relaxed);
                    }
                    Err(e) => tracing::warn!("Unread poll failed: {}", e),
                }
            }
        });

        tracing::debug!(interval_secs = interval.as_secs(), "Unread poller started");
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        *running = Some(Running {
            token,
            generation,
            handle,
        });
    }

    /// Abort the poll task and reset the count.
    pub fn stop(&self) {
        if let Some(running) = self.lock().take() {
            running.handle.abort();
            tracing::debug!(generation = running.generation, "Unread poller stopped");
        }
        self.count.store(0, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, Option<Running>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for UnreadPoller {
    fn drop(&mut self) {
        if let Some(running) = self.lock().take() {
            running.handle.abort();
        }
    }
}
