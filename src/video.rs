// src/video.rs - Webcam frame acquisition
use crate::config::CameraConfig;
use anyhow::{anyhow, Result};
use image::{DynamicImage, ImageBuffer};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

pub struct CameraSource {
    camera: Camera,
}

impl CameraSource {
    pub fn new(config: &CameraConfig) -> Result<Self> {
        let format = CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::MJPEG,
            30,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let camera = Camera::new(CameraIndex::Index(config.id), requested)
            .map_err(|e| anyhow!("failed to open camera {}: {}", config.id, e))?;

        Ok(Self { camera })
    }

    /// Captures one frame as mirrored RGBA, so on-screen motion matches the
    /// user's hand.
    pub fn read_frame(&mut self) -> Result<DynamicImage> {
        if !self.camera.is_stream_open() {
            self.camera
                .open_stream()
                .map_err(|e| anyhow!("failed to open camera stream: {}", e))?;
        }

        let frame = self
            .camera
            .frame()
            .map_err(|e| anyhow!("failed to capture frame: {}", e))?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow!("failed to decode frame: {}", e))?;

        let width = decoded.width();
        let height = decoded.height();
        let rgb_data = decoded.into_vec();

        let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
        for chunk in rgb_data.chunks(3) {
            rgba_data.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
        }

        let img: ImageBuffer<image::Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, rgba_data)
                .ok_or_else(|| anyhow!("failed to build frame buffer"))?;

        let flipped = image::imageops::flip_horizontal(&img);
        Ok(DynamicImage::ImageRgba8(flipped))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
