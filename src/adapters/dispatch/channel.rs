//! Channel-backed dispatcher.
//!
//! Producers on any thread push tasks into an unbounded tokio channel. The
//! host owns the matching `UiLoop` and runs it on its UI context, where
//! tasks execute one at a time in submission order.

use tokio::sync::mpsc;

use crate::ports::{UiDispatcher, UiTask};

/// Sending half, shared with adapters.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<UiTask>,
}

/// Receiving half, driven by the host's UI context.
pub struct UiLoop {
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl ChannelDispatcher {
    /// Creates a connected dispatcher and loop.
    pub fn new() -> (Self, UiLoop) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UiLoop { rx })
    }
}

impl UiDispatcher for ChannelDispatcher {
    fn dispatch(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("UI loop has shut down, dropping task");
        }
    }
}

impl UiLoop {
    /// Runs tasks until every dispatcher has been dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
        tracing::debug!("UI loop finished");
    }

    /// Runs every task queued so far without waiting for more.
    ///
    /// Returns how many tasks ran.
    pub fn drain_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

impl std::fmt::Debug for UiLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiLoop").finish_non_exhaustive()
    }
}
