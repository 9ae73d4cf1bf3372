// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signs the user out after a period without activity.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::session::{SessionEvent, SessionStore};

/// Activity resets closer together than this are ignored.
const TOUCH_THROTTLE: Duration = Duration::from_secs(1);

/// Handle to a running inactivity watcher. Dropping it stops the watcher.
pub struct InactivityWatch {
    last_activity: Arc<Mutex<Instant>>,
    cancel: CancellationToken,
}

impl InactivityWatch {
    /// Start watching. Must be called from within a tokio runtime.
    pub fn spawn(session: &Arc<SessionStore>, timeout: Duration) -> Self {
        let last_activity = Arc::new(Mutex::new(Instant::now()));
        let cancel = CancellationToken::new();

        let session = Arc::downgrade(session);
        let last = Arc::clone(&last_activity);
        let token = cancel.clone();
        tokio::spawn(async move {
            loop {
                let deadline = *last.lock() + timeout;
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep_until(deadline) => {}
                }
                // Activity may have moved the deadline while we slept.
                if *last.lock() + timeout > Instant::now() {
                    continue;
                }
                let Some(session) = session.upgrade() else {
                    return;
                };
                if session.has_tokens() {
                    info!(idle_secs = timeout.as_secs(), "inactivity timeout, signing out");
                    session.logout().await;
                    session.emit(SessionEvent::IdleTimeout);
                }
                *last.lock() = Instant::now();
            }
        });

        Self { last_activity, cancel }
    }

    /// Record user activity.
    pub fn touch(&self) {
        let now = Instant::now();
        let mut last = self.last_activity.lock();
        if now.duration_since(*last) >= TOUCH_THROTTLE {
            *last = now;
        }
    }

    pub fn stop(&self) {
        debug!("inactivity watcher stopped");
        self.cancel.cancel();
    }
}

impl Drop for InactivityWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
