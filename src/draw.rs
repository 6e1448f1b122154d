// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the canvas (mirrored camera, dots, hand landmarks).
// 2) Executing draw commands into the screen buffer (filled/stroked circles).
// 3) A tiny 5x7 bitmap font to render HUD text on top of everything.

use crate::error::Error;
use crate::render::{Circle, DrawCmd};
use crate::sim::SimInput;
use crate::tracker::{FINGERS, MAX_HANDS};
use crate::types::{FrameBuffer, Rgb};
use crate::vision::blit_mirrored;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
    // simulator selection, changed with 1-4 and Tab
    sim_hand: usize,
    sim_finger: usize,
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window, sim_hand: 0, sim_finger: 0 })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// "Start capture/tracking" (S).
    pub fn start_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// "Stop capture/tracking" (X).
    pub fn stop_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::X, KeyRepeat::No)
    }

    /// Current mouse position in window pixel coordinates, if it's over the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// Read this frame's keys and mouse as simulated hand input.
    pub fn sim_input(&mut self) -> SimInput {
        const FINGER_KEYS: [Key; FINGERS] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4];
        for (finger, key) in FINGER_KEYS.into_iter().enumerate() {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                self.sim_finger = finger;
            }
        }
        if self.window.is_key_pressed(Key::Tab, KeyRepeat::No) {
            self.sim_hand = (self.sim_hand + 1) % MAX_HANDS;
        }
        SimInput {
            cursor: self.mouse_pos(),
            pinching: self.window.get_mouse_down(MouseButton::Left),
            hand: self.sim_hand,
            finger: self.sim_finger,
        }
    }
}

/* ---------- Executing draw commands ---------- */

/// Run one frame's commands, in order, into `fb`. `video` is this tick's camera frame.
pub fn rasterize(cmds: &[DrawCmd], video: &FrameBuffer, fb: &mut FrameBuffer) -> Result<(), Error> {
    for cmd in cmds {
        match cmd {
            DrawCmd::Background(color) => fb.pixels.fill(color.to_u32()),
            DrawCmd::Video { opacity } => blit_mirrored(video, fb, *opacity)?,
            DrawCmd::Circle(circle) => draw_circle(fb, circle),
        }
    }
    Ok(())
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a circle of `diameter` centered on `center`. A stroke straddles the
/// edge: half its weight inside the circle, half outside. A pixel belongs to
/// the shape when its center does.
pub fn draw_circle(fb: &mut FrameBuffer, c: &Circle) {
    let r = c.diameter / 2.0;
    let half = c.stroke.map_or(0.0, |s| s.weight / 2.0);
    let inner = r - half;
    let outer = r + half;
    if outer <= 0.0 {
        return;
    }

    let (cx, cy) = (c.center.x, c.center.y);
    let x0 = (cx - outer).floor() as i32;
    let x1 = (cx + outer).ceil() as i32;
    let y0 = (cy - outer).floor() as i32;
    let y1 = (cy + outer).ceil() as i32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            if d > outer {
                continue;
            }
            if d <= inner {
                if let Some(fill) = c.fill {
                    put_pixel(fb, x, y, fill.to_u32());
                }
            } else if let Some(stroke) = c.stroke {
                put_pixel(fb, x, y, stroke.color.to_u32());
            }
        }
    }
}

/* ---------- 5x7 bitmap font (HUD: A-Z, 0-9, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters are drawn as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1 pixel apart.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Rgb) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color.to_u32());
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
