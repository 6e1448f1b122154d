//! One explicit "tick" per display frame.
//!
//! The host loop pulls the tracker's latest snapshot, hands it to
//! [`Sketch::tick`], and gets back the full list of draw commands for that
//! frame. The sketch owns the paint buffer for its whole life; nothing is
//! global and nothing here waits on the tracker.

use crate::paint::{ColorMap, PaintBuffer};
use crate::render::{DrawCmd, render_dots, render_landmarks};
use crate::tracker::Snapshot;
use crate::types::{Canvas, Rgb};

pub struct Sketch {
    canvas: Canvas,
    colors: ColorMap,
    buffer: PaintBuffer,
    background: Rgb,
    video_opacity: f32,
}

impl Sketch {
    pub fn new(canvas: Canvas, colors: ColorMap, video_opacity: f32) -> Self {
        Self {
            canvas,
            colors,
            buffer: PaintBuffer::new(),
            background: Rgb::BLACK,
            video_opacity: video_opacity.clamp(0.0, 1.0),
        }
    }

    pub fn buffer(&self) -> &PaintBuffer {
        &self.buffer
    }

    /// Update the paint buffer from this tick's snapshot and return the frame's draws:
    /// background, mirrored video, dots oldest first, then landmarks.
    pub fn tick(&mut self, snapshot: Option<&Snapshot>) -> Vec<DrawCmd> {
        let update = self.buffer.update(snapshot);
        if update.cleared {
            log::debug!("paint cleared ({} dots added this tick were dropped too)", update.added);
        } else if update.added > 0 {
            log::trace!("painted {} dots, {} total", update.added, self.buffer.len());
        }
        self.render(snapshot)
    }

    /// Draws for the current state without touching the buffer.
    pub fn render(&self, snapshot: Option<&Snapshot>) -> Vec<DrawCmd> {
        let mut cmds = Vec::with_capacity(2 + self.buffer.len());
        cmds.push(DrawCmd::Background(self.background));
        cmds.push(DrawCmd::Video { opacity: self.video_opacity });
        render_dots(&self.buffer, &self.colors, self.canvas, &mut cmds);
        render_landmarks(snapshot, &self.colors, self.canvas, &mut cmds);
        cmds
    }
}
