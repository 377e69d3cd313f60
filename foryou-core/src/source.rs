use tokio::sync::watch;

/// Something the screen can poll for the newest snapshot of a section.
pub trait SnapshotSource<T> {
    /// The most recent snapshot.
    fn latest(&self) -> T;

    /// The new snapshot if one was published since the last call; never blocks.
    fn poll_changed(&mut self) -> Option<T>;

    fn is_closed(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct WatchSource<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> SnapshotSource<T> for WatchSource<T> {
    fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    fn poll_changed(&mut self) -> Option<T> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.rx.borrow_and_update().clone()),
            Ok(false) | Err(_) => None,
        }
    }

    fn is_closed(&self) -> bool {
        self.rx.has_changed().is_err()
    }
}

#[derive(Debug)]
pub struct SnapshotPublisher<T> {
    tx: watch::Sender<T>,
}

impl<T> SnapshotPublisher<T> {
    pub fn publish(&self, snapshot: T) {
        // keeps the value around for receivers created later
        self.tx.send_replace(snapshot);
    }

    pub fn subscribe(&self) -> WatchSource<T> {
        WatchSource {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }
}

pub fn snapshot_channel<T>(initial: T) -> (SnapshotPublisher<T>, WatchSource<T>) {
    let (tx, rx) = watch::channel(initial);
    (SnapshotPublisher { tx }, WatchSource { rx })
}
