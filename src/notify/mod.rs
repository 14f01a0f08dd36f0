// Notification side-channel
//
// Turn summaries go out as fire-and-forget messages: events are queued on
// an unbounded channel and drained by a background task, so delivery
// latency or failure can never block or fail a turn.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

mod telegram;

pub use telegram::TelegramNotifier;

/// Trait for outbound notification services. Best-effort by contract:
/// callers log failures and move on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event_type: &str, text: &str) -> Result<()>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct NotifyEvent {
    pub event_type: String,
    pub text: String,
}

/// Sending half of the notification channel. Cheap to clone; a disabled
/// handle drops events silently so callers never branch on configuration.
#[derive(Clone)]
pub struct NotifyHandle {
    tx: Option<mpsc::UnboundedSender<NotifyEvent>>,
}

impl NotifyHandle {
    /// Handle that discards every event (no notifier configured).
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue an event. Never blocks, never fails the caller: a closed or
    /// absent channel is logged and swallowed.
    pub fn send(&self, event_type: &str, text: String) {
        let Some(tx) = &self.tx else {
            tracing::debug!(event_type, "Notifications disabled, dropping event");
            return;
        };

        let event = NotifyEvent {
            event_type: event_type.to_string(),
            text,
        };
        if tx.send(event).is_err() {
            tracing::warn!(event_type, "Notification worker gone, dropping event");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }
}

/// Spawn the delivery worker and return the handle to feed it.
///
/// The worker drains the queue for the life of the process; delivery
/// failures are logged at warn and otherwise ignored.
pub fn spawn_notifier(notifier: Arc<dyn Notifier>) -> NotifyHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<NotifyEvent>();

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(error) = notifier.notify(&event.event_type, &event.text).await {
                tracing::warn!(
                    notifier = notifier.name(),
                    event_type = %event.event_type,
                    "Notification delivery failed: {error:#}"
                );
            }
        }
    });

    NotifyHandle { tx: Some(tx) }
}
