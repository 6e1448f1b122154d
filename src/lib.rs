//! # pinch-paint
//!
//! Finger painting over a mirrored webcam feed. A hand tracker reports
//! per-finger pinch transitions; every finger held in a pinch leaves a
//! colored dot each frame, and releasing the pinky pinch on the first hand
//! wipes the canvas.
//!
//! ## Finger → brush
//!
//! | Hand | Index | Middle | Ring | Pinky |
//! |---|---|---|---|---|
//! | 0 | black, wide | magenta | blue | white, release clears |
//! | 1 | red | green | blue | yellow |
//!
//! ## Pieces
//!
//! * [`tracker`] — snapshot model, latest-snapshot slot, [`tracker::HandTracker`] trait.
//! * [`sim`] / [`process`] — a mouse/keyboard tracker and an external-process tracker.
//! * [`paint`] — the dot buffer and its accumulate/clear rules.
//! * [`render`] / [`sketch`] — per-tick draw commands.
//! * [`camera`], [`vision`], [`draw`] — frames in, pixels out, the window.

pub mod camera;
pub mod config;
pub mod draw;
pub mod error;
pub mod lifecycle;
pub mod paint;
pub mod process;
pub mod render;
pub mod sim;
pub mod sketch;
pub mod tracker;
pub mod types;
pub mod vision;
