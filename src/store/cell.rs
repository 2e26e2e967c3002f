//! SnapshotCell - a latest-value stream over a tokio watch channel.
//!
//! The explicit stand-in for the push-based observable the admin UI used:
//! it always holds the latest value (`None` until first set), replays that
//! value to every new subscriber, and notifies subscribers on every
//! replacement. Dropping the receiver is the unsubscribe.

use tokio::sync::watch;

/// A shareable cell holding the latest snapshot of one value.
///
/// Writes are whole-value replacements, so observers never see a partial
/// update. There is no sequencing across concurrent writers: last write
/// wins.
pub struct SnapshotCell<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T: Clone> SnapshotCell<T> {
    /// Create an empty cell. `latest()` returns `None` until the first
    /// `set`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Clone of the current snapshot, `None` if nothing was ever set (or
    /// the cell was cleared).
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Replace the snapshot and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Drop the snapshot (back to `None`) and notify subscribers.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Subscribe to the cell. The receiver observes the current value
    /// immediately via `borrow()` and every subsequent replacement via
    /// `changed()`.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let cell: SnapshotCell<u32> = SnapshotCell::new();
        assert_eq!(cell.latest(), None);
    }

    #[test]
    fn replays_latest_to_new_subscribers() {
        let cell = SnapshotCell::new();
        cell.set(vec!["a".to_string()]);

        // Subscribed after the set, still sees the value.
        let rx = cell.subscribe();
        assert_eq!(rx.borrow().clone(), Some(vec!["a".to_string()]));
    }

    #[tokio::test]
    async fn notifies_on_every_replacement() {
        let cell = SnapshotCell::new();
        let mut rx = cell.subscribe();

        cell.set(1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(1));

        cell.set(2);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(2));
    }

    #[tokio::test]
    async fn clear_is_observable() {
        let cell = SnapshotCell::new();
        cell.set(7);

        let mut rx = cell.subscribe();
        cell.clear();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), None);
    }

    #[test]
    fn last_write_wins() {
        let cell = SnapshotCell::new();
        cell.set(1);
        cell.set(2);
        assert_eq!(cell.latest(), Some(2));
    }
}
