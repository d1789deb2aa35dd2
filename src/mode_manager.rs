// src/mode_manager.rs - Hold-to-switch state machine over the mode set
use crate::gestures::{FramePoints, GestureType};
use crate::input::InputSink;
use crate::modes::{ControlMode, OverlayInfo};
use std::time::{Duration, Instant};
use tracing::info;

/// Per-frame status record for the overlay. Recomputed every call, never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct ManagerStatus {
    pub action: String,
    pub switched_mode: bool,
    /// Open-palm hold progress in [0, 1]; 0 when no hold is in flight.
    pub hold_progress: f32,
}

pub struct ModeManager {
    modes: Vec<Box<dyn ControlMode>>,
    current: usize,
    hold_duration: Duration,
    palm_hold_start: Option<Instant>,
}

impl ModeManager {
    /// The mode set is fixed for the life of the process.
    pub fn new(modes: Vec<Box<dyn ControlMode>>, hold_duration: Duration) -> Self {
        assert!(!modes.is_empty(), "mode manager needs at least one mode");
        Self {
            modes,
            current: 0,
            hold_duration,
            palm_hold_start: None,
        }
    }

    pub fn current_mode(&self) -> &dyn ControlMode {
        self.modes[self.current].as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modes.iter().map(|m| m.name())
    }

    pub fn overlay_info(&self) -> OverlayInfo {
        self.current_mode().overlay_info()
    }

    pub fn set_frame_size(&mut self, width: u32, height: u32) {
        for mode in &mut self.modes {
            mode.set_frame_size(width, height);
        }
    }

    /// Advances the state machine by one frame. A sustained open palm drives
    /// the mode switch; everything else goes to the active mode.
    pub fn update(
        &mut self,
        gesture: GestureType,
        points: Option<&FramePoints>,
        now: Instant,
        sink: &mut dyn InputSink,
    ) -> ManagerStatus {
        let mut status = ManagerStatus::default();

        if gesture == GestureType::OpenPalm {
            let start = *self.palm_hold_start.get_or_insert(now);
            let elapsed = now.duration_since(start);
            status.hold_progress =
                (elapsed.as_secs_f32() / self.hold_duration.as_secs_f32()).min(1.0);

            if elapsed >= self.hold_duration {
                self.current = (self.current + 1) % self.modes.len();
                self.palm_hold_start = None;
                status.switched_mode = true;
                status.action = format!("Switched to {}", self.current_mode().name());
                info!("{}", status.action);
            }
        } else {
            // An interrupted hold restarts from zero next time.
            self.palm_hold_start = None;
            status.action = self.modes[self.current].handle_gesture(gesture, points, now, sink);
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScrollModeConfig, VideoModeConfig};
    use crate::input::test_support::{RecordingSink, SinkCall};
    use crate::input::InputKey;
    use crate::modes::{ScrollMode, VideoMode};

    fn manager() -> ModeManager {
        ModeManager::new(
            vec![
                Box::new(VideoMode::new(VideoModeConfig::default())),
                Box::new(ScrollMode::new(ScrollModeConfig::default())),
            ],
            Duration::from_secs(2),
        )
    }

    #[test]
    fn hold_for_exact_duration_switches_once() {
        let mut mgr = manager();
        let mut sink = RecordingSink::default();
        let t = Instant::now();

        let status = mgr.update(GestureType::OpenPalm, None, t, &mut sink);
        assert!(!status.switched_mode);
        assert_eq!(status.hold_progress, 0.0);

        let status = mgr.update(
            GestureType::OpenPalm,
            None,
            t + Duration::from_secs(1),
            &mut sink,
        );
        assert!(!status.switched_mode);
        assert!((status.hold_progress - 0.5).abs() < 1e-6);

        let status = mgr.update(
            GestureType::OpenPalm,
            None,
            t + Duration::from_secs(2),
            &mut sink,
        );
        assert!(status.switched_mode);
        assert_eq!(status.hold_progress, 1.0);
        assert_eq!(status.action, "Switched to Scroll Control");
        assert_eq!(mgr.current_index(), 1);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn interrupted_hold_restarts_from_zero() {
        let mut mgr = manager();
        let mut sink = RecordingSink::default();
        let t = Instant::now();

        mgr.update(GestureType::OpenPalm, None, t, &mut sink);
        mgr.update(
            GestureType::OpenPalm,
            None,
            t + Duration::from_millis(1900),
            &mut sink,
        );
        // Interruption just shy of the threshold.
        mgr.update(GestureType::Fist, None, t + Duration::from_millis(1950), &mut sink);
        assert_eq!(mgr.current_index(), 0);

        // A fresh hold gets no credit for the earlier one.
        let t2 = t + Duration::from_secs(3);
        let status = mgr.update(
            GestureType::OpenPalm,
            None,
            t2 + Duration::from_millis(1900),
            &mut sink,
        );
        assert!(!status.switched_mode);
        let status = mgr.update(
            GestureType::OpenPalm,
            None,
            t2 + Duration::from_millis(1900) + Duration::from_secs(2),
            &mut sink,
        );
        assert!(status.switched_mode);
    }

    #[test]
    fn switching_wraps_around() {
        let mut mgr = manager();
        let mut sink = RecordingSink::default();
        let mut t = Instant::now();

        for expected in [1, 0] {
            let start = t;
            mgr.update(GestureType::OpenPalm, None, start, &mut sink);
            let status = mgr.update(
                GestureType::OpenPalm,
                None,
                start + Duration::from_secs(2),
                &mut sink,
            );
            assert!(status.switched_mode);
            assert_eq!(mgr.current_index(), expected);
            t = start + Duration::from_secs(3);
        }
    }

    #[test]
    fn non_palm_gestures_forward_to_active_mode() {
        let mut mgr = manager();
        let mut sink = RecordingSink::default();

        let status = mgr.update(GestureType::Fist, None, Instant::now(), &mut sink);
        assert_eq!(status.action, "Play/Pause");
        assert!(!status.switched_mode);
        assert_eq!(status.hold_progress, 0.0);
        assert_eq!(sink.calls, vec![SinkCall::Key(InputKey::Space)]);
    }

    #[test]
    fn switch_does_not_dispatch_to_modes() {
        let mut mgr = manager();
        let mut sink = RecordingSink::default();
        let t = Instant::now();

        mgr.update(GestureType::OpenPalm, None, t, &mut sink);
        mgr.update(GestureType::OpenPalm, None, t + Duration::from_secs(2), &mut sink);
        assert!(sink.calls.is_empty());

        // Now in scroll mode; a fist is a no-op there.
        let status = mgr.update(
            GestureType::Fist,
            None,
            t + Duration::from_secs(3),
            &mut sink,
        );
        assert_eq!(status.action, "");
        assert!(sink.calls.is_empty());
    }
}
