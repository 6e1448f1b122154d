//! The paint accumulator: pinch gestures in, an append-only list of dots out.
//!
//! Every tick, each finger that is *held* in a pinch leaves one dot at its
//! pinch coordinate. Releasing the pinky pinch on hand 0 wipes the whole
//! buffer, including anything added earlier in the same tick.

use crate::tracker::{FINGERS, MAX_HANDS, PinchPhase, Snapshot};
use crate::types::{NormPoint, Rgb};

/// (hand, finger) whose release wipes the canvas: pinky on hand 0.
pub const CLEAR_FINGER: (usize, usize) = (0, 3);
/// (hand, finger) that paints with the wide brush: index on hand 0.
pub const WIDE_BRUSH_FINGER: (usize, usize) = (0, 0);
pub const WIDE_BRUSH: f32 = 40.0;
pub const NARROW_BRUSH: f32 = 10.0;

/// One painted dot. Never changes after it is appended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub at: NormPoint,
    pub hand: usize,
    pub finger: usize,
    pub radius: f32,
}

/// Brush size for a finger.
pub fn brush_radius(hand: usize, finger: usize) -> f32 {
    if (hand, finger) == WIDE_BRUSH_FINGER { WIDE_BRUSH } else { NARROW_BRUSH }
}

/// Fixed (hand, finger) → color table.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    hands: [[Rgb; FINGERS]; MAX_HANDS],
}

impl ColorMap {
    pub const fn new(hands: [[Rgb; FINGERS]; MAX_HANDS]) -> Self {
        Self { hands }
    }

    /// Color for (hand, finger), or None when the table has no such entry.
    pub fn get(&self, hand: usize, finger: usize) -> Option<Rgb> {
        self.hands.get(hand)?.get(finger).copied()
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new([
            // hand 0: index, middle, ring, pinky
            [Rgb::new(0, 0, 0), Rgb::new(255, 0, 255), Rgb::new(0, 0, 255), Rgb::new(255, 255, 255)],
            // hand 1
            [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255), Rgb::new(255, 255, 0)],
        ])
    }
}

/// What one update did to the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Update {
    pub added: usize,
    pub cleared: bool,
}

/// Ordered dots; insertion order is draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintBuffer {
    dots: Vec<Dot>,
}

impl PaintBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Apply one tick of tracker data: accumulate, then check for the clear gesture.
    /// A missing snapshot, hand, finger or coordinate is simply nothing to do.
    pub fn update(&mut self, snapshot: Option<&Snapshot>) -> Update {
        let Some(snapshot) = snapshot else {
            return Update::default();
        };

        let before = self.dots.len();
        for (hand, state) in snapshot.hands.iter().enumerate().take(MAX_HANDS) {
            for (finger, pinch) in state.pinch.iter().enumerate() {
                let Some(pinch) = pinch else { continue };
                if pinch.phase != PinchPhase::Held {
                    continue;
                }
                let Some(at) = pinch.at else { continue };
                self.dots.push(Dot { at, hand, finger, radius: brush_radius(hand, finger) });
            }
        }
        let added = self.dots.len() - before;

        let (hand, finger) = CLEAR_FINGER;
        let cleared = snapshot.phase(hand, finger) == Some(PinchPhase::Released);
        if cleared {
            self.dots = Vec::new();
        }

        Update { added, cleared }
    }
}
