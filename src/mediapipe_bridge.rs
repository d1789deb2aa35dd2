// src/mediapipe_bridge.rs - Stub wrapper over the native hand landmark runtime
use crate::config::DetectionConfig;
use anyhow::Result;
use image::DynamicImage;

pub struct MediaPipeWrapper;

impl MediaPipeWrapper {
    pub fn new(_config: &DetectionConfig) -> Result<Self> {
        Ok(Self)
    }

    /// Runs hand landmark detection on one frame. Returns at most one hand's
    /// 21 normalized (x, y, z) keypoints, or `None` when no hand is found.
    pub fn process(&mut self, _frame: &DynamicImage) -> Result<Option<Vec<[f64; 3]>>> {
        // Native landmark runtime is not linked in this build.
        Ok(None)
    }
}
