// src/detector.rs - Hand landmark acquisition with lazy bridge initialization
use crate::config::DetectionConfig;
use crate::mediapipe_bridge::MediaPipeWrapper;
use image::DynamicImage;
use nalgebra::Vector3;
use tracing::{info, warn};

// MediaPipe 21-point hand topology indices.
pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// One detected hand: 21 keypoints in normalized image coordinates
/// (x, y in [0, 1], y growing downward).
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    points: Vec<Vector3<f64>>,
}

impl HandLandmarks {
    pub fn from_points(points: Vec<Vector3<f64>>) -> Option<Self> {
        (points.len() == LANDMARK_COUNT).then_some(Self { points })
    }

    pub fn point(&self, index: usize) -> Vector3<f64> {
        self.points[index]
    }
}

pub struct HandDetector {
    config: DetectionConfig,
    bridge: Option<MediaPipeWrapper>,
    init_attempted: bool,
}

impl HandDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            bridge: None,
            init_attempted: false,
        }
    }

    fn ensure_bridge(&mut self) {
        if self.init_attempted {
            return;
        }
        self.init_attempted = true;

        match MediaPipeWrapper::new(&self.config) {
            Ok(bridge) => {
                info!("hand landmark bridge initialized");
                self.bridge = Some(bridge);
            }
            Err(e) => {
                warn!("hand landmark bridge unavailable: {}", e);
            }
        }
    }

    /// Detects at most one hand in the frame. Absence of a hand and any
    /// bridge failure both come back as `None`; the pipeline treats them
    /// the same way.
    pub fn detect(&mut self, frame: &DynamicImage) -> Option<HandLandmarks> {
        self.ensure_bridge();
        let bridge = self.bridge.as_mut()?;

        let raw = match bridge.process(frame) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("landmark detection failed: {}", e);
                return None;
            }
        };

        let points: Vec<Vector3<f64>> = raw
            .iter()
            .map(|lm| Vector3::new(lm[0], lm[1], lm[2]))
            .collect();

        match HandLandmarks::from_points(points) {
            Some(landmarks) => Some(landmarks),
            None => {
                warn!("discarding hand with {} landmarks", raw.len());
                None
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.bridge.is_some()
    }
}
