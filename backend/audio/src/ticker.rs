//! Cancellable repeating task.
//!
//! Posts a copy of `event` to a channel every `period`, first one `period`
//! after spawning. The task stops when cancelled, dropped, or when the
//! receiver goes away.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Must be called from inside a tokio runtime.
    pub fn spawn<T>(period: Duration, tx: mpsc::Sender<T>, event: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event.clone()).await.is_err() {
                    debug!("Ticker receiver closed, stopping");
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// A ticker that never fires; the resting state between playbacks.
    pub fn idle() -> Self {
        Self { handle: None }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Ticker cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::idle()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::Receiver<u32>) -> usize {
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let ticker = Ticker::spawn(Duration::from_millis(500), tx, 7u32);
        assert!(ticker.is_running());

        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(drain(&mut rx), 0);

        time::sleep(Duration::from_millis(850)).await; // t = 1250ms
        assert_eq!(drain(&mut rx), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut ticker = Ticker::spawn(Duration::from_millis(500), tx, 1u32);
        time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(drain(&mut rx), 2);

        ticker.cancel();
        assert!(!ticker.is_running());
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::channel(16);
        {
            let _ticker = Ticker::spawn(Duration::from_millis(500), tx, 1u32);
        }
        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(drain(&mut rx), 0);
        // Sender was dropped with the aborted task.
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_idle_ticker() {
        let mut ticker = Ticker::idle();
        assert!(!ticker.is_running());
        ticker.cancel();
    }
}
