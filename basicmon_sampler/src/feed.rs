//! Synchronous handoff between one sampler and the dashboard loop.
//!
//! A publish only completes once the receiving side has taken the value, so the sampler
//! never queries its source again while its previous sample is still waiting.

use tokio::sync::{mpsc, oneshot};

use crate::error::FeedClosed;

type Slot<T> = (T, oneshot::Sender<()>);

/// Create a connected publisher/feed pair.
pub fn handoff<T>() -> (Publisher<T>, Feed<T>) {
    let (tx, rx) = mpsc::channel(1);
    (Publisher { tx }, Feed { rx })
}

pub struct Publisher<T> {
    tx: mpsc::Sender<Slot<T>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Hand `value` over and wait until the feed has taken it. Fails if the feed is
    /// dropped first, including while the value is still queued.
    pub async fn publish(&self, value: T) -> Result<(), FeedClosed> {
        let (ack, taken) = oneshot::channel();
        self.tx.send((value, ack)).await.map_err(|_| FeedClosed)?;
        taken.await.map_err(|_| FeedClosed)
    }
}

/// Receiving end. `recv` is cancel safe: a value is acknowledged in the same poll that
/// returns it.
pub struct Feed<T> {
    rx: mpsc::Receiver<Slot<T>>,
}

impl<T> Feed<T> {
    /// Next value, or `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<T> {
        let (value, ack) = self.rx.recv().await?;
        // the publisher may have been cancelled mid-wait
        let _ = ack.send(());
        Some(value)
    }
}
