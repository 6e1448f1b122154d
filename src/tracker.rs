//! Hand tracker boundary.
//!
//! The tracker is an external collaborator: it runs its own acquisition and
//! inference pipeline and *publishes* whatever it last computed into a
//! [`SnapshotCell`]. The render loop never waits for it. Each tick it pulls
//! the latest [`Snapshot`], which may be missing, stale, or the same one as
//! last tick. There is no push notification and no backpressure.

use crate::error::Error;
use crate::types::NormPoint;
use serde::Deserialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Hands the paint core cares about (index 0 and 1).
pub const MAX_HANDS: usize = 2;
/// Pinchable fingers per hand: index, middle, ring, pinky.
pub const FINGERS: usize = 4;
/// Skeletal keypoints per detected hand.
pub const LANDMARKS: usize = 21;
/// Landmark index of the index/middle/ring/pinky fingertip.
pub const FINGERTIPS: [usize; FINGERS] = [8, 12, 16, 20];

/// Where a finger is in its pinch this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchPhase {
    /// Fingertip just touched the thumb.
    Start,
    /// Still touching since an earlier tick.
    Held,
    /// Let go this tick (reported once).
    Released,
}

impl PinchPhase {
    /// Parse the tracker's string form. Anything unknown (including `""`) is no pinch.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(PinchPhase::Start),
            "held" => Some(PinchPhase::Held),
            "released" => Some(PinchPhase::Released),
            _ => None,
        }
    }
}

/// One finger's pinch state plus the pinch coordinate, when the tracker gave one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerPinch {
    pub phase: PinchPhase,
    pub at: Option<NormPoint>,
}

/// Everything the tracker knows about one hand this tick.
/// An empty `landmarks` means no skeleton was published for this hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandState {
    pub pinch: [Option<FingerPinch>; FINGERS],
    pub landmarks: Vec<NormPoint>,
}

/// Immutable record of the tracker's latest result. Index into `hands` is the hand index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub hands: Vec<HandState>,
}

impl Snapshot {
    pub fn hand(&self, hand: usize) -> Option<&HandState> {
        self.hands.get(hand)
    }

    pub fn pinch(&self, hand: usize, finger: usize) -> Option<&FingerPinch> {
        self.hand(hand)?.pinch.get(finger)?.as_ref()
    }

    /// Phase of (hand, finger), or None when any level of the data is missing.
    pub fn phase(&self, hand: usize, finger: usize) -> Option<PinchPhase> {
        self.pinch(hand, finger).map(|p| p.phase)
    }

    pub fn landmarks(&self, hand: usize) -> &[NormPoint] {
        self.hand(hand).map_or(&[], |h| h.landmarks.as_slice())
    }

    /// Parse one line of tracker output.
    ///
    /// The line mirrors the tracker's own object: `pinchState[h][f]` strings,
    /// `curPinch[h][f]` points (or null), `landmarks[h][i]` points. Every field
    /// is optional; extra fields such as `z` are ignored.
    pub fn from_json(line: &str) -> Result<Snapshot, serde_json::Error> {
        let wire: WireSnapshot = serde_json::from_str(line)?;
        Ok(wire.into())
    }
}

// Any level may be null: the whole field, one hand's list, or one finger.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct WireSnapshot {
    pinch_state: Option<Vec<Option<Vec<Option<String>>>>>,
    cur_pinch: Option<Vec<Option<Vec<Option<NormPoint>>>>>,
    landmarks: Option<Vec<Option<Vec<NormPoint>>>>,
}

impl From<WireSnapshot> for Snapshot {
    fn from(wire: WireSnapshot) -> Self {
        let pinch_state = wire.pinch_state.unwrap_or_default();
        let cur_pinch = wire.cur_pinch.unwrap_or_default();
        let landmarks = wire.landmarks.unwrap_or_default();
        let count = pinch_state.len().max(cur_pinch.len()).max(landmarks.len());

        let mut landmarks = landmarks.into_iter();
        let hands = (0..count)
            .map(|h| {
                let mut state = HandState {
                    landmarks: landmarks.next().flatten().unwrap_or_default(),
                    ..HandState::default()
                };
                let phases = pinch_state.get(h).and_then(Option::as_ref);
                let points = cur_pinch.get(h).and_then(Option::as_ref);
                for f in 0..FINGERS {
                    let phase = phases
                        .and_then(|fingers| fingers.get(f))
                        .and_then(|s| s.as_deref())
                        .and_then(PinchPhase::parse);
                    let at = points.and_then(|fingers| fingers.get(f)).copied().flatten();
                    state.pinch[f] = phase.map(|phase| FingerPinch { phase, at });
                }
                state
            })
            .collect();

        Snapshot { hands }
    }
}

/// Last-writer-wins slot shared between a tracker pipeline and the render loop.
#[derive(Clone, Default)]
pub struct SnapshotCell {
    slot: Arc<Mutex<Option<Arc<Snapshot>>>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was there.
    pub fn publish(&self, snapshot: Snapshot) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(snapshot));
    }

    /// The most recent snapshot, without waiting for a fresh one.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Anything that can run a hand-tracking pipeline and expose its latest result.
pub trait HandTracker {
    /// Begin frame acquisition and inference. Starting twice is a no-op.
    fn start(&mut self) -> Result<(), Error>;

    /// End the pipeline. Stopping a stopped tracker is a no-op.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Latest published result, or None if nothing has been computed yet.
    fn latest(&self) -> Option<Arc<Snapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tracker_line() {
        let line = r#"{
            "pinchState": [["held", "", "", "released"], ["", "start"]],
            "curPinch": [[{"x": 0.25, "y": 0.5}, null, null, {"x": 0.9, "y": 0.1}]],
            "landmarks": [[{"x": 0.1, "y": 0.2, "z": -0.03}]]
        }"#;
        let snap = Snapshot::from_json(line).unwrap();

        assert_eq!(snap.hands.len(), 2);
        assert_eq!(
            snap.pinch(0, 0),
            Some(&FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.25, 0.5)) })
        );
        assert_eq!(snap.phase(0, 1), None);
        assert_eq!(snap.phase(0, 3), Some(PinchPhase::Released));
        assert_eq!(snap.pinch(1, 1), Some(&FingerPinch { phase: PinchPhase::Start, at: None }));
        assert_eq!(snap.landmarks(0), &[NormPoint::new(0.1, 0.2)]);
        assert!(snap.landmarks(1).is_empty());
    }

    #[test]
    fn empty_object_means_no_hands() {
        let snap = Snapshot::from_json("{}").unwrap();
        assert!(snap.hands.is_empty());
        assert_eq!(snap.phase(0, 3), None);
        assert!(snap.landmarks(0).is_empty());
    }

    #[test]
    fn null_hand_entry_keeps_the_other_hand() {
        let line = r#"{
            "pinchState": [["held", "", "", ""], null],
            "curPinch": [[{"x": 0.5, "y": 0.5}], null],
            "landmarks": [[], null]
        }"#;
        let snap = Snapshot::from_json(line).unwrap();

        assert_eq!(snap.hands.len(), 2);
        assert_eq!(
            snap.pinch(0, 0),
            Some(&FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.5, 0.5)) })
        );
        assert_eq!(snap.hand(1), Some(&HandState::default()));
    }

    #[test]
    fn null_fields_mean_no_hands() {
        let snap = Snapshot::from_json(r#"{"pinchState": null, "curPinch": null, "landmarks": null}"#).unwrap();
        assert!(snap.hands.is_empty());
    }

    #[test]
    fn short_finger_list_has_no_pinky() {
        let snap = Snapshot::from_json(r#"{"pinchState": [["held"]]}"#).unwrap();
        assert_eq!(snap.phase(0, 0), Some(PinchPhase::Held));
        assert_eq!(snap.phase(0, 3), None);
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(Snapshot::from_json("not json").is_err());
        assert!(Snapshot::from_json(r#"{"pinchState": 3}"#).is_err());
    }

    #[test]
    fn unknown_phase_is_absent() {
        assert_eq!(PinchPhase::parse(""), None);
        assert_eq!(PinchPhase::parse("HELD"), None);
        assert_eq!(PinchPhase::parse("held"), Some(PinchPhase::Held));
    }

    #[test]
    fn cell_keeps_only_the_latest() {
        let cell = SnapshotCell::new();
        assert!(cell.latest().is_none());

        cell.publish(Snapshot::default());
        let mut second = Snapshot::default();
        second.hands.push(HandState::default());
        cell.publish(second.clone());

        // Pulling twice without a new publish hands back the same record.
        assert_eq!(cell.latest().as_deref(), Some(&second));
        assert_eq!(cell.latest().as_deref(), Some(&second));

        cell.clear();
        assert!(cell.latest().is_none());
    }

    #[test]
    fn cell_clones_share_the_slot() {
        let writer = SnapshotCell::new();
        let reader = writer.clone();
        writer.publish(Snapshot::default());
        assert!(reader.latest().is_some());
    }
}
