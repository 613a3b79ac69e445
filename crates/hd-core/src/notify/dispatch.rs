use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use crate::{domain::NotificationPayload, notify::notifier::Notifier};

/// Fire-and-forget scheduling for the notifier.
///
/// Every payload gets its own tokio task, so reports are neither ordered nor
/// blocked relative to each other. The request path never awaits them; only
/// shutdown does, through [`NotificationDispatcher::shutdown`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Option<Arc<Notifier>>,
    tracker: TaskTracker,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
            tracker: TaskTracker::new(),
        }
    }

    /// A dispatcher that drops every payload without spawning anything.
    pub fn disabled() -> Self {
        Self {
            notifier: None,
            tracker: TaskTracker::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Spawn the report in the background and return immediately.
    ///
    /// Returns `None` when notifications are disabled. The handle is only for
    /// callers that want to observe completion; dropping it detaches the task.
    pub fn schedule(&self, payload: NotificationPayload) -> Option<JoinHandle<()>> {
        let Some(notifier) = self.notifier.as_ref().map(Arc::clone) else {
            debug!("notifications disabled; report skipped");
            return None;
        };
        Some(
            self.tracker
                .spawn(async move { notifier.notify(payload).await }),
        )
    }

    /// Reports scheduled but not yet finished.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for in-flight reports. Call once, after the server stopped accepting requests.
    pub async fn shutdown(&self) {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            info!(pending, "waiting for in-flight notifications");
        }
        self.tracker.wait().await;
    }
}
