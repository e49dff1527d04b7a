use std::sync::Arc;

use tokio::sync::watch;

/// A value that is filled in once, some time after startup. Readers suspend
/// on [`ReadyCell::wait`] until it is there.
pub struct ReadyCell<T: ?Sized> {
    tx: Arc<watch::Sender<Option<Arc<T>>>>,
}

impl<T: ?Sized> Clone for ReadyCell<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: ?Sized> Default for ReadyCell<T> {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }
}

impl<T: ?Sized + Send + Sync> ReadyCell<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: Arc<T>) {
        self.tx.send_replace(Some(value));
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub async fn wait(&self) -> Arc<T> {
        let mut rx = self.tx.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(value) = current {
                return value;
            }
            // `self` owns the sender, so the channel cannot close while we wait.
            let _ = rx.changed().await;
        }
    }
}
