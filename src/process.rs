//! Hand tracker backed by an external process.
//!
//! The child does the camera acquisition and landmark/pinch inference
//! however it likes and prints one JSON snapshot per line on stdout (see
//! [`Snapshot::from_json`]). A reader thread publishes each line into the
//! shared [`SnapshotCell`]; the render loop only ever reads the latest one.
//!
//! When the child's output ends (it exited or crashed) the cell is cleared and
//! the tracker reports itself stopped, so the next start spawns a fresh child.

use crate::error::Error;
use crate::tracker::{HandTracker, Snapshot, SnapshotCell};
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

pub struct ProcessTracker {
    program: String,
    args: Vec<String>,
    cell: SnapshotCell,
    child: Option<Child>,
    reader: Option<JoinHandle<()>>,
    // false once the child's stdout hits EOF
    alive: Arc<AtomicBool>,
}

impl ProcessTracker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            cell: SnapshotCell::new(),
            child: None,
            reader: None,
            alive: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl HandTracker for ProcessTracker {
    fn start(&mut self) -> Result<(), Error> {
        if self.is_running() {
            return Ok(());
        }
        // Reap a child whose output already ended before spawning a new one.
        self.stop();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(Error::TrackerSpawn)?;
        log::info!("spawned tracker `{}` (pid {})", self.program, child.id());

        self.alive.store(true, Ordering::SeqCst);
        if let Some(stdout) = child.stdout.take() {
            let (cell, alive) = (self.cell.clone(), self.alive.clone());
            self.reader = Some(thread::spawn(move || {
                read_snapshots(stdout, &cell);
                // A dead tracker must not leave its last frame behind.
                cell.clear();
                alive.store(false, Ordering::SeqCst);
                log::warn!("tracker output closed");
            }));
        }
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                log::debug!("could not kill tracker process: {e}");
            }
            let _ = child.wait();
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        self.alive.store(false, Ordering::SeqCst);
        self.cell.clear();
    }

    fn is_running(&self) -> bool {
        self.child.is_some() && self.alive.load(Ordering::SeqCst)
    }

    fn latest(&self) -> Option<Arc<Snapshot>> {
        self.cell.latest()
    }
}

impl Drop for ProcessTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read snapshot lines until EOF, publishing each good one. Bad lines are skipped.
pub fn read_snapshots<R: Read>(source: R, cell: &SnapshotCell) {
    for line in BufReader::new(source).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("tracker output read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match Snapshot::from_json(&line) {
            Ok(snapshot) => cell.publish(snapshot),
            Err(e) => log::debug!("skipping tracker line: {e}"),
        }
    }
}
