// src/modes.rs - The two control modes and their shared cooldown discipline
use crate::config::{ScrollModeConfig, VideoModeConfig};
use crate::gestures::{FramePoints, GestureType};
use crate::input::{InputKey, InputSink};
use std::time::{Duration, Instant};

/// Display data the overlay reads each frame. Never feeds back into the
/// pipeline.
#[derive(Debug, Clone)]
pub struct OverlayInfo {
    pub mode_name: &'static str,
    pub hints: &'static [&'static str],
    pub last_action: String,
    /// Scroll mode only: (top, bottom) zone ratios of frame height.
    pub zones: Option<(f64, f64)>,
}

pub trait ControlMode {
    fn name(&self) -> &'static str;

    /// Handles one frame's gesture. Returns the action label, or an empty
    /// string when nothing was dispatched (no match, or cooldown).
    fn handle_gesture(
        &mut self,
        gesture: GestureType,
        points: Option<&FramePoints>,
        now: Instant,
        sink: &mut dyn InputSink,
    ) -> String;

    fn overlay_info(&self) -> OverlayInfo;

    fn set_frame_size(&mut self, _width: u32, _height: u32) {}
}

/// Checks cooldown against the last *dispatched* action; suppressed calls
/// never move the timestamp.
fn on_cooldown(last_action_at: Option<Instant>, cooldown: Duration, now: Instant) -> bool {
    last_action_at.is_some_and(|t| now.duration_since(t) < cooldown)
}

pub struct VideoMode {
    config: VideoModeConfig,
    last_action_at: Option<Instant>,
    last_action: String,
}

impl VideoMode {
    pub const NAME: &'static str = "Video Control";

    pub fn new(config: VideoModeConfig) -> Self {
        Self {
            config,
            last_action_at: None,
            last_action: String::new(),
        }
    }
}

impl ControlMode for VideoMode {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_gesture(
        &mut self,
        gesture: GestureType,
        _points: Option<&FramePoints>,
        now: Instant,
        sink: &mut dyn InputSink,
    ) -> String {
        if on_cooldown(self.last_action_at, self.config.cooldown(), now) {
            return String::new();
        }

        let action = match gesture {
            GestureType::Fist => {
                sink.press_key(InputKey::Space);
                "Play/Pause".to_string()
            }
            GestureType::SwipeRight => {
                for _ in 0..self.config.seek_key_presses {
                    sink.press_key(InputKey::Char('l'));
                }
                format!("Seek +{}s", self.config.seek_label_secs)
            }
            GestureType::SwipeLeft => {
                for _ in 0..self.config.seek_key_presses {
                    sink.press_key(InputKey::Char('j'));
                }
                format!("Seek -{}s", self.config.seek_label_secs)
            }
            _ => String::new(),
        };

        if !action.is_empty() {
            self.last_action_at = Some(now);
            self.last_action = action.clone();
        }
        action
    }

    fn overlay_info(&self) -> OverlayInfo {
        OverlayInfo {
            mode_name: Self::NAME,
            hints: &[
                "Fist: play/pause",
                "Swipe right: seek forward",
                "Swipe left: seek back",
            ],
            last_action: self.last_action.clone(),
            zones: None,
        }
    }
}

pub struct ScrollMode {
    config: ScrollModeConfig,
    frame_height: u32,
    last_action_at: Option<Instant>,
    last_action: String,
}

impl ScrollMode {
    pub const NAME: &'static str = "Scroll Control";

    pub fn new(config: ScrollModeConfig) -> Self {
        Self {
            config,
            frame_height: 480,
            last_action_at: None,
            last_action: String::new(),
        }
    }
}

impl ControlMode for ScrollMode {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_gesture(
        &mut self,
        gesture: GestureType,
        points: Option<&FramePoints>,
        now: Instant,
        sink: &mut dyn InputSink,
    ) -> String {
        if on_cooldown(self.last_action_at, self.config.cooldown(), now) {
            return String::new();
        }

        let mut action = String::new();

        if gesture == GestureType::Pointing {
            if let Some(points) = points {
                let top_line = (self.frame_height as f64 * self.config.top_zone_ratio) as i32;
                let bottom_line = (self.frame_height as f64 * self.config.bottom_zone_ratio) as i32;

                // Both lines are exclusive: a fingertip exactly on a line
                // stays in the dead band.
                if points.index_y < top_line {
                    sink.scroll(self.config.scroll_amount);
                    action = "Scroll up".to_string();
                } else if points.index_y > bottom_line {
                    sink.scroll(-self.config.scroll_amount);
                    action = "Scroll down".to_string();
                }
            }
        }

        if !action.is_empty() {
            self.last_action_at = Some(now);
            self.last_action = action.clone();
        }
        action
    }

    fn overlay_info(&self) -> OverlayInfo {
        OverlayInfo {
            mode_name: Self::NAME,
            hints: &[
                "Point near the top: scroll up",
                "Point near the bottom: scroll down",
            ],
            last_action: self.last_action.clone(),
            zones: Some((self.config.top_zone_ratio, self.config.bottom_zone_ratio)),
        }
    }

    fn set_frame_size(&mut self, _width: u32, height: u32) {
        self.frame_height = height;
    }
}
