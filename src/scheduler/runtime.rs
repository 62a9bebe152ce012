//! Reveal scheduling on the tokio runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{RevealEvent, RevealScheduler};

/// Spawns one sleeping task per reveal and sends the event on an unbounded
/// channel when it wakes. The receiving loop applies it to the presenter.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    event_tx: mpsc::UnboundedSender<RevealEvent>,
    handles: Vec<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<RevealEvent>) -> Self {
        Self {
            event_tx,
            handles: Vec::new(),
        }
    }

    /// Create a scheduler along with the receiver its events arrive on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RevealEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RevealScheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, event: RevealEvent) {
        self.handles.retain(|h| !h.is_finished());

        let tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owner shut down; nothing to reveal.
            if tx.send(event).is_err() {
                tracing::trace!(index = event.index, "reveal receiver closed");
            }
        });
        self.handles.push(handle);
    }

    fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
