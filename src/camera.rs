// Frame sources: the live camera, or a plain frame when running without one.
// Visual expectation: `next_frame()` hands back a canvas-sized Vec<u32>
// (0x00RRGGBB) that the rasterizer mirrors and dims under the painting.

use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// `image` decodes/resizes frames when the device doesn't give us the canvas size.
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb as ImageRgb};

/// Anything that can supply one video frame per tick at the canvas size.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` asking for (width × height); frames are always
    /// delivered at that size even if the device picks another resolution.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Ask for RGB frames at the closest format the device offers.
        let req = RequestedFormat::new::<RgbFormat>(
            RequestedFormatType::Closest(fmt)
        );

        let mut cam =
            Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        if actual.width() != width || actual.height() != height {
            log::info!(
                "camera delivers {}x{}, frames will be resized to {}x{}",
                actual.width(), actual.height(), width, height
            );
        } else {
            log::info!("camera {index} streaming at {width}x{height}");
        }

        Ok(Self { cam, width, height })
    }
}

impl FrameSource for CameraCapture {
    /// Grab one frame (blocks until the device has one) and convert it to 0x00RRGGBB.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(pack_rgb(&fit(rgb_img, self.width, self.height)))
    }
}

/// Resize to exactly (width × height) unless it already is.
fn fit(img: ImageBuffer<ImageRgb<u8>, Vec<u8>>, width: u32, height: u32) -> ImageBuffer<ImageRgb<u8>, Vec<u8>> {
    if img.dimensions() == (width, height) {
        return img;
    }
    imageops::resize(&img, width, height, FilterType::Triangle)
}

/// Pack an RGB image as 0x00RRGGBB pixels, row-major.
fn pack_rgb(img: &ImageBuffer<ImageRgb<u8>, Vec<u8>>) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| Rgb::new(p[0], p[1], p[2]).to_u32())
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

/// Stand-in when there's no camera: the same flat frame every tick.
pub struct BlankSource {
    frame: FrameBuffer,
}

impl BlankSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self { frame: FrameBuffer::filled(width, height, Rgb::new(40, 40, 48)) }
    }
}

impl FrameSource for BlankSource {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        Ok(self.frame.clone())
    }
}
