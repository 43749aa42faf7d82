use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::notifications::{NotificationSource, Snapshot};

/// Background task fetching a [`Snapshot`] on a fixed interval, starting
/// immediately. The task is aborted when the poller is dropped.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(
        source: Arc<dyn NotificationSource>,
        every: Duration,
    ) -> (Self, mpsc::Receiver<Snapshot>) {
        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match source.snapshot().await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).await.is_err() {
                            debug!("notification receiver closed, poller exiting");
                            break;
                        }
                    }
                    // a failed poll is retried on the next tick
                    Err(e) => warn!("notification poll failed: {e}"),
                }
            }
        });
        (Self { handle }, rx)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
