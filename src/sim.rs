//! Mouse/keyboard stand-in for a real hand tracker.
//!
//! The window feeds one [`SimInput`] per frame into a [`SimDriver`]; the
//! driver turns "button held" into start/held/released transitions and
//! publishes a snapshot exactly like an external tracker would. The paint
//! core can't tell the difference.
//!
//! | Input | Meaning |
//! |---|---|
//! | Mouse position | Pinch point and hand position |
//! | Left mouse held | Selected finger is pinching |
//! | `1`–`4` | Select index / middle / ring / pinky |
//! | `Tab` | Switch between hand 0 and hand 1 |
//!
//! Pinching the pinky of hand 0 and letting go clears the painting.

use crate::error::Error;
use crate::tracker::{
    FINGERS, FINGERTIPS, FingerPinch, HandState, HandTracker, LANDMARKS, MAX_HANDS, PinchPhase, Snapshot, SnapshotCell,
};
use crate::types::{Canvas, NormPoint};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What the window saw this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimInput {
    /// Cursor in canvas pixels, if it is over the window.
    pub cursor: Option<(f32, f32)>,
    pub pinching: bool,
    pub hand: usize,
    pub finger: usize,
}

type Touching = [[bool; FINGERS]; MAX_HANDS];
type Phases = [[Option<PinchPhase>; FINGERS]; MAX_HANDS];

/// Edge detector: per-tick "touching" flags in, pinch transitions out.
/// `Released` is reported for exactly one tick after contact ends.
#[derive(Clone, Debug, Default)]
pub struct PinchEdges {
    was: Touching,
}

impl PinchEdges {
    pub fn step(&mut self, now: Touching) -> Phases {
        let mut out = [[None; FINGERS]; MAX_HANDS];
        for h in 0..MAX_HANDS {
            for f in 0..FINGERS {
                out[h][f] = match (self.was[h][f], now[h][f]) {
                    (false, true) => Some(PinchPhase::Start),
                    (true, true) => Some(PinchPhase::Held),
                    (true, false) => Some(PinchPhase::Released),
                    (false, false) => None,
                };
            }
        }
        self.was = now;
        out
    }

    pub fn reset(&mut self) {
        self.was = Touching::default();
    }
}

/// The tracker half: owned by the lifecycle controller.
pub struct SimTracker {
    cell: SnapshotCell,
    running: Arc<AtomicBool>,
}

/// The input half: owned by the window loop.
pub struct SimDriver {
    cell: SnapshotCell,
    running: Arc<AtomicBool>,
    canvas: Canvas,
    edges: PinchEdges,
    last_at: Option<NormPoint>,
}

impl SimTracker {
    pub fn new(canvas: Canvas) -> (SimTracker, SimDriver) {
        let cell = SnapshotCell::new();
        let running = Arc::new(AtomicBool::new(false));
        let tracker = SimTracker { cell: cell.clone(), running: running.clone() };
        let driver = SimDriver { cell, running, canvas, edges: PinchEdges::default(), last_at: None };
        (tracker, driver)
    }
}

impl HandTracker for SimTracker {
    fn start(&mut self) -> Result<(), Error> {
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.cell.clear();
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn latest(&self) -> Option<Arc<Snapshot>> {
        self.cell.latest()
    }
}

impl SimDriver {
    /// Publish this frame's simulated hand data. Ignored while the tracker is stopped.
    pub fn feed(&mut self, input: &SimInput) {
        if !self.running.load(Ordering::SeqCst) {
            self.edges.reset();
            self.last_at = None;
            return;
        }

        // The screen is mirrored, so undo the flip to get tracker coordinates.
        let at = input.cursor.map(|(x, y)| {
            NormPoint::new(1.0 - x / self.canvas.width, y / self.canvas.height)
        });
        if at.is_some() {
            self.last_at = at;
        }

        let mut touching = Touching::default();
        if input.pinching && at.is_some() && input.hand < MAX_HANDS && input.finger < FINGERS {
            touching[input.hand][input.finger] = true;
        }
        let phases = self.edges.step(touching);

        let hands = (0..MAX_HANDS)
            .map(|h| {
                let mut state = HandState::default();
                for f in 0..FINGERS {
                    state.pinch[f] = phases[h][f].map(|phase| FingerPinch { phase, at: self.last_at });
                }
                if h == input.hand {
                    if let Some(at) = at {
                        state.landmarks = skeleton(at, input.finger);
                    }
                }
                state
            })
            .collect();

        self.cell.publish(Snapshot { hands });
    }
}

/// A flat open hand whose `finger` tip sits on `tip`, in tracker coordinates.
fn skeleton(tip: NormPoint, finger: usize) -> Vec<NormPoint> {
    let mut points = Vec::with_capacity(LANDMARKS);
    points.push(NormPoint::new(0.0, 0.0)); // wrist
    for digit in 0..5 {
        for joint in 1..=4 {
            let j = joint as f32;
            let p = if digit == 0 {
                // thumb fans out sideways
                NormPoint::new(-0.035 - 0.02 * j, -0.02 - 0.025 * j)
            } else {
                let spread = (digit as f32 - 2.5) * 0.02;
                NormPoint::new(spread * (1.0 + 0.3 * j), -0.09 - 0.035 * j)
            };
            points.push(p);
        }
    }

    let anchor = points[FINGERTIPS[finger.min(FINGERS - 1)]];
    points
        .into_iter()
        .map(|p| NormPoint::new(tip.x + p.x - anchor.x, tip.y + p.y - anchor.y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touching(h: usize, f: usize) -> Touching {
        let mut t = Touching::default();
        t[h][f] = true;
        t
    }

    #[test]
    fn edges_start_held_released() {
        let mut edges = PinchEdges::default();
        assert_eq!(edges.step(touching(0, 1))[0][1], Some(PinchPhase::Start));
        assert_eq!(edges.step(touching(0, 1))[0][1], Some(PinchPhase::Held));
        assert_eq!(edges.step(touching(0, 1))[0][1], Some(PinchPhase::Held));
        assert_eq!(edges.step(Touching::default())[0][1], Some(PinchPhase::Released));
        assert_eq!(edges.step(Touching::default())[0][1], None);
    }

    #[test]
    fn switching_finger_releases_old_one() {
        let mut edges = PinchEdges::default();
        edges.step(touching(0, 0));
        let phases = edges.step(touching(0, 3));
        assert_eq!(phases[0][0], Some(PinchPhase::Released));
        assert_eq!(phases[0][3], Some(PinchPhase::Start));
    }

    #[test]
    fn skeleton_puts_selected_tip_under_cursor() {
        let tip = NormPoint::new(0.4, 0.6);
        for finger in 0..FINGERS {
            let points = skeleton(tip, finger);
            assert_eq!(points.len(), LANDMARKS);
            let p = points[FINGERTIPS[finger]];
            assert!((p.x - tip.x).abs() < 1e-6 && (p.y - tip.y).abs() < 1e-6);
        }
    }

    #[test]
    fn driver_publishes_only_while_running() {
        let (mut tracker, mut driver) = SimTracker::new(Canvas::DEFAULT);
        let input = SimInput { cursor: Some((320.0, 240.0)), pinching: true, hand: 0, finger: 0 };

        driver.feed(&input);
        assert!(tracker.latest().is_none());

        tracker.start().unwrap();
        driver.feed(&input);
        driver.feed(&input);
        let snap = tracker.latest().unwrap();
        assert_eq!(
            snap.pinch(0, 0),
            Some(&FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.5, 0.5)) })
        );
        assert_eq!(snap.landmarks(0).len(), LANDMARKS);
        assert!(snap.landmarks(1).is_empty());

        tracker.stop();
        assert!(tracker.latest().is_none());
    }

    #[test]
    fn cursor_is_unmirrored() {
        let (mut tracker, mut driver) = SimTracker::new(Canvas::DEFAULT);
        tracker.start().unwrap();
        driver.feed(&SimInput { cursor: Some((160.0, 120.0)), pinching: true, hand: 1, finger: 2 });

        let snap = tracker.latest().unwrap();
        let at = snap.pinch(1, 2).and_then(|p| p.at).unwrap();
        assert_eq!(at, NormPoint::new(0.75, 0.25));
        assert_eq!(Canvas::DEFAULT.mirror(at).x, 160.0);
    }

    #[test]
    fn release_keeps_last_point_when_cursor_leaves() {
        let (mut tracker, mut driver) = SimTracker::new(Canvas::DEFAULT);
        tracker.start().unwrap();
        driver.feed(&SimInput { cursor: Some((320.0, 240.0)), pinching: true, hand: 0, finger: 3 });
        driver.feed(&SimInput { cursor: None, pinching: false, hand: 0, finger: 3 });

        let snap = tracker.latest().unwrap();
        assert_eq!(
            snap.pinch(0, 3),
            Some(&FingerPinch { phase: PinchPhase::Released, at: Some(NormPoint::new(0.5, 0.5)) })
        );
        assert!(snap.landmarks(0).is_empty());
    }
}
