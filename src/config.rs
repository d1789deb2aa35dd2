// src/config.rs
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            id: 0,
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub max_hands: usize,
    pub min_detection_confidence: f64,
    pub min_tracking_confidence: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Palm travel (as a fraction of frame width) that counts as a swipe.
    pub swipe_threshold: f64,
    /// Sliding window length, in frames, for swipe detection.
    pub swipe_frames: usize,
    /// Horizontal thumb-tip displacement that counts as extended.
    pub thumb_extend_threshold: f64,
    /// How long an open palm must be held to switch modes.
    pub palm_hold_secs: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 0.15,
            swipe_frames: 8,
            thumb_extend_threshold: 0.05,
            palm_hold_secs: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoModeConfig {
    pub action_cooldown_secs: f64,
    /// One press seeks 10s on YouTube, so 3 presses = 30s.
    pub seek_key_presses: u32,
    pub seek_label_secs: u32,
}

impl Default for VideoModeConfig {
    fn default() -> Self {
        Self {
            action_cooldown_secs: 0.5,
            seek_key_presses: 3,
            seek_label_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollModeConfig {
    pub scroll_cooldown_secs: f64,
    pub scroll_amount: i32,
    pub top_zone_ratio: f64,
    pub bottom_zone_ratio: f64,
}

impl Default for ScrollModeConfig {
    fn default() -> Self {
        Self {
            scroll_cooldown_secs: 0.3,
            scroll_amount: 3,
            top_zone_ratio: 0.25,
            bottom_zone_ratio: 0.75,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub detection: DetectionConfig,
    pub gestures: GestureConfig,
    pub video_mode: VideoModeConfig,
    pub scroll_mode: ScrollModeConfig,
}

impl Config {
    /// Loads the optional user config file, falling back to defaults on any
    /// problem. A broken config file should never keep the app from starting.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                warn!("using default configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => {
                info!("loading config from {}", path.display());
                let raw = std::fs::read_to_string(&path)?;
                serde_json::from_str(&raw)?
            }
            _ => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gesture-hub").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gestures.swipe_frames < 2 {
            return Err(ConfigError::Invalid(
                "gestures.swipe_frames must be at least 2".into(),
            ));
        }
        if self.gestures.swipe_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "gestures.swipe_threshold must be positive".into(),
            ));
        }
        if self.gestures.palm_hold_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "gestures.palm_hold_secs must be positive".into(),
            ));
        }
        if self.video_mode.action_cooldown_secs < 0.0 || self.scroll_mode.scroll_cooldown_secs < 0.0
        {
            return Err(ConfigError::Invalid("cooldowns must not be negative".into()));
        }
        let (top, bottom) = (
            self.scroll_mode.top_zone_ratio,
            self.scroll_mode.bottom_zone_ratio,
        );
        if !(0.0 < top && top < bottom && bottom < 1.0) {
            return Err(ConfigError::Invalid(
                "scroll zone ratios must satisfy 0 < top < bottom < 1".into(),
            ));
        }
        Ok(())
    }

    pub fn palm_hold(&self) -> Duration {
        Duration::from_secs_f64(self.gestures.palm_hold_secs)
    }
}

impl VideoModeConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.action_cooldown_secs)
    }
}

impl ScrollModeConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.scroll_cooldown_secs)
    }
}
