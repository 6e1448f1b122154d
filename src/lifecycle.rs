// Start/stop wiring between the UI and whichever hand tracker is plugged in.
// The sketch never sees this: while stopped it just gets no snapshot.

use crate::error::Error;
use crate::tracker::{HandTracker, Snapshot};
use std::sync::Arc;

pub struct Lifecycle {
    tracker: Box<dyn HandTracker>,
}

impl Lifecycle {
    pub fn new(tracker: Box<dyn HandTracker>) -> Self {
        Self { tracker }
    }

    /// "Start capture/tracking" button.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.tracker.is_running() {
            log::debug!("start ignored: tracker already running");
            return Ok(());
        }
        self.tracker.start()?;
        log::info!("hand tracking started");
        Ok(())
    }

    /// "Stop capture/tracking" button.
    pub fn stop(&mut self) {
        let was_running = self.tracker.is_running();
        // Still stop a tracker that died on its own so it gets reaped.
        self.tracker.stop();
        if was_running {
            log::info!("hand tracking stopped");
        } else {
            log::debug!("stop: tracker was not running");
        }
    }

    pub fn is_running(&self) -> bool {
        self.tracker.is_running()
    }

    /// Latest tracker output, or None while stopped or before the first result.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        if !self.tracker.is_running() {
            return None;
        }
        self.tracker.latest()
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.tracker.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::SnapshotCell;

    /// Tracker that only flips a flag and serves a fixed cell.
    struct FakeTracker {
        running: bool,
        starts: Arc<std::sync::atomic::AtomicUsize>,
        cell: SnapshotCell,
    }

    impl HandTracker for FakeTracker {
        fn start(&mut self) -> Result<(), Error> {
            self.running = true;
            self.starts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
        fn stop(&mut self) {
            self.running = false;
        }
        fn is_running(&self) -> bool {
            self.running
        }
        fn latest(&self) -> Option<Arc<Snapshot>> {
            self.cell.latest()
        }
    }

    fn lifecycle() -> (Lifecycle, SnapshotCell, Arc<std::sync::atomic::AtomicUsize>) {
        let cell = SnapshotCell::new();
        let starts = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let tracker = FakeTracker { running: false, starts: starts.clone(), cell: cell.clone() };
        (Lifecycle::new(Box::new(tracker)), cell, starts)
    }

    #[test]
    fn no_snapshot_while_stopped() {
        let (mut life, cell, _) = lifecycle();
        cell.publish(Snapshot::default());
        assert!(life.snapshot().is_none());

        life.start().unwrap();
        assert!(life.snapshot().is_some());

        life.stop();
        assert!(!life.is_running());
        assert!(life.snapshot().is_none());
    }

    #[test]
    fn double_start_starts_once() {
        let (mut life, _, starts) = lifecycle();
        life.start().unwrap();
        life.start().unwrap();
        assert_eq!(starts.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
