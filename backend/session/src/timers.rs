//! One-shot delayed delivery, aborted on drop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Delayed {
    handle: JoinHandle<()>,
}

impl Delayed {
    /// Post `event` to `tx` once `delay` has elapsed.
    pub fn schedule<T>(delay: Duration, tx: mpsc::Sender<T>, event: T) -> Self
    where
        T: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event).await;
        });
        Self { handle }
    }
}

impl Drop for Delayed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
