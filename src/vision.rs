// Pixel operations on whole video frames.
// Visual expectation: the camera image appears flipped left/right (like a mirror)
// and faded toward the background so the painted dots stand out.

use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

/// Blend `a` over `b` by `t` in [0,1], per channel, in sRGB space.
#[inline]
fn mix(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * t + b as f32 * (1.0 - t)).round().clamp(0.0, 255.0) as u8
}

/// Write `src` into `dst` flipped horizontally and blended over `dst`'s current
/// contents by `opacity` (0 = invisible, 1 = raw camera).
pub fn blit_mirrored(src: &FrameBuffer, dst: &mut FrameBuffer, opacity: f32) -> Result<(), Error> {
    if src.width != dst.width || src.height != dst.height {
        return Err(Error::CameraFrame(format!(
            "blit_mirrored: frame is {}x{}, canvas is {}x{}",
            src.width, src.height, dst.width, dst.height
        )));
    }
    let t = opacity.clamp(0.0, 1.0);
    if t <= 0.0 {
        return Ok(()); // visual: background only
    }

    let w = src.width;
    for y in 0..src.height {
        let row = y * w;
        for x in 0..w {
            let s = src.pixels[row + (w - 1 - x)];
            let d = &mut dst.pixels[row + x];
            if t >= 1.0 {
                *d = s;
                continue;
            }
            let (s, under) = (Rgb::from_u32(s), Rgb::from_u32(*d));
            *d = Rgb::new(mix(s.r, under.r, t), mix(s.g, under.g, t), mix(s.b, under.b, t)).to_u32();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> FrameBuffer {
        FrameBuffer { width: 3, height: 1, pixels: vec![0x000000FF, 0x0000FF00, 0x00FF0000] }
    }

    #[test]
    fn full_opacity_flips_rows() {
        let mut dst = FrameBuffer::filled(3, 1, Rgb::BLACK);
        blit_mirrored(&ramp(), &mut dst, 1.0).unwrap();
        assert_eq!(dst.pixels, vec![0x00FF0000, 0x0000FF00, 0x000000FF]);
    }

    #[test]
    fn half_opacity_over_black_halves_brightness() {
        let src = FrameBuffer::filled(2, 2, Rgb::new(200, 100, 50));
        let mut dst = FrameBuffer::filled(2, 2, Rgb::BLACK);
        blit_mirrored(&src, &mut dst, 0.5).unwrap();
        assert!(dst.pixels.iter().all(|&p| p == Rgb::new(100, 50, 25).to_u32()));
    }

    #[test]
    fn zero_opacity_leaves_background() {
        let mut dst = FrameBuffer::filled(3, 1, Rgb::WHITE);
        blit_mirrored(&ramp(), &mut dst, 0.0).unwrap();
        assert_eq!(dst, FrameBuffer::filled(3, 1, Rgb::WHITE));
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let mut dst = FrameBuffer::filled(4, 1, Rgb::BLACK);
        assert!(blit_mirrored(&ramp(), &mut dst, 1.0).is_err());
    }
}
