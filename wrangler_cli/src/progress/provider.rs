//! Channel-backed progress provider
//!
//! Bridges the core library's progress trait to the async renderer task.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use wrangler_core::{ProgressProvider, ProgressUpdate};

/// Sends progress updates to a separate rendering task
///
/// Updates are dropped rather than blocking the scan when the channel is
/// full. `complete` drops the sender so the renderer loop can finish.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    fn sender(&self) -> Option<mpsc::Sender<ProgressUpdate>> {
        match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        if let Some(tx) = self.sender() {
            let _ = tx.try_send(update);
        }
    }

    fn complete(&self) {
        let mut guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}

/// Create a progress provider and the receiver its renderer reads from
pub fn create_progress_infrastructure()
-> (Arc<dyn ProgressProvider>, mpsc::Receiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::channel(100);
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_core::ScanStage;

    #[tokio::test]
    async fn test_updates_reach_receiver() {
        let (provider, mut rx) = create_progress_infrastructure();

        provider.report(ProgressUpdate::Stage(ScanStage::Discovering));
        provider.report(ProgressUpdate::FilesDiscovered { count: 3 });

        assert_eq!(
            rx.recv().await,
            Some(ProgressUpdate::Stage(ScanStage::Discovering))
        );
        assert_eq!(
            rx.recv().await,
            Some(ProgressUpdate::FilesDiscovered { count: 3 })
        );
    }

    #[tokio::test]
    async fn test_complete_closes_channel() {
        let (provider, mut rx) = create_progress_infrastructure();

        provider.complete();
        provider.report(ProgressUpdate::Status {
            message: "late".to_string(),
        });

        assert_eq!(rx.recv().await, None);
    }
}
