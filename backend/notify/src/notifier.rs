use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

use studyforge_config::Timings;
use studyforge_core::{Notification, Severity};

const EVENT_BUFFER_SIZE: usize = 64;

/// Where a toast is in its on-screen lifecycle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    /// Attached but still off-screen, sliding in.
    Entering,
    Visible,
    /// Sliding out; removed once the fade-out completes.
    Leaving,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub phase: ToastPhase,
}

/// Lifecycle transitions, broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    Shown(Notification),
    Visible(Uuid),
    Dismissing(Uuid),
    Removed(Uuid),
}

/// Fade schedule. `dismiss_after` counts from creation, not from visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub fade_in: Duration,
    pub dismiss_after: Duration,
    pub fade_out: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Timings::default().into()
    }
}

impl From<Timings> for ToastTimings {
    fn from(t: Timings) -> Self {
        Self {
            fade_in: t.toast_fade_in,
            dismiss_after: t.toast_dismiss_after,
            fade_out: t.toast_fade_out,
        }
    }
}

/// Notification Service.
///
/// Toasts stack independently: there is no queue, no limit, and no
/// de-duplication. Each one runs its own fade timer task.
#[derive(Clone)]
pub struct Notifier {
    toasts: Arc<RwLock<Vec<Toast>>>,
    events: broadcast::Sender<ToastEvent>,
    timings: ToastTimings,
}

impl Notifier {
    pub fn new(timings: ToastTimings) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
            events,
            timings,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    /// Show a toast and schedule its dismissal. Must run inside a tokio runtime.
    pub async fn notify(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.push(Notification::new(message, severity)).await
    }

    pub async fn push(&self, notification: Notification) -> Uuid {
        let id = notification.id;
        debug!(
            toast_id = %id,
            severity = %notification.severity,
            message = %notification.message,
            "Toast shown"
        );

        self.toasts.write().await.push(Toast {
            notification: notification.clone(),
            phase: ToastPhase::Entering,
        });
        // No subscribers is fine.
        let _ = self.events.send(ToastEvent::Shown(notification));

        let toasts = Arc::clone(&self.toasts);
        let events = self.events.clone();
        let timings = self.timings;
        tokio::spawn(async move {
            tokio::time::sleep(timings.fade_in).await;
            set_phase(&toasts, id, ToastPhase::Visible).await;
            let _ = events.send(ToastEvent::Visible(id));

            tokio::time::sleep(timings.dismiss_after.saturating_sub(timings.fade_in)).await;
            set_phase(&toasts, id, ToastPhase::Leaving).await;
            let _ = events.send(ToastEvent::Dismissing(id));

            tokio::time::sleep(timings.fade_out).await;
            toasts.write().await.retain(|t| t.notification.id != id);
            let _ = events.send(ToastEvent::Removed(id));
            debug!(toast_id = %id, "Toast removed");
        });

        id
    }

    /// Toasts currently attached, oldest first.
    pub async fn active(&self) -> Vec<Toast> {
        self.toasts.read().await.clone()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(ToastTimings::default())
    }
}

async fn set_phase(toasts: &RwLock<Vec<Toast>>, id: Uuid, phase: ToastPhase) {
    if let Some(toast) = toasts
        .write()
        .await
        .iter_mut()
        .find(|t| t.notification.id == id)
    {
        toast.phase = phase;
    }
}
