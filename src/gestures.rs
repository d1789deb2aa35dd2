// src/gestures.rs - Static and dynamic gesture recognition
use crate::config::GestureConfig;
use crate::detector::{self, HandLandmarks};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureType {
    None,
    Fist,
    OpenPalm,
    Pointing,
    SwipeLeft,
    SwipeRight,
}

/// Per-frame geometry the modes and overlay need: index fingertip in pixel
/// coordinates, palm (wrist) in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePoints {
    pub index_x: i32,
    pub index_y: i32,
    pub palm_x: f64,
    pub palm_y: f64,
}

pub struct GestureRecognizer {
    config: GestureConfig,
    palm_x_history: VecDeque<f64>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        let capacity = config.swipe_frames;
        Self {
            config,
            palm_x_history: VecDeque::with_capacity(capacity),
        }
    }

    /// Classifies one frame's observation. Dynamic gestures (swipes) win
    /// over static ones; losing the hand clears the swipe window.
    pub fn recognize(
        &mut self,
        landmarks: Option<&HandLandmarks>,
        frame_width: u32,
        frame_height: u32,
    ) -> (GestureType, Option<FramePoints>) {
        let Some(landmarks) = landmarks else {
            self.palm_x_history.clear();
            return (GestureType::None, None);
        };

        let points = Self::extract_points(landmarks, frame_width, frame_height);

        let swipe = self.check_swipe(points.palm_x);
        if swipe != GestureType::None {
            return (swipe, Some(points));
        }

        (self.classify_static(landmarks), Some(points))
    }

    fn extract_points(landmarks: &HandLandmarks, width: u32, height: u32) -> FramePoints {
        let index_tip = landmarks.point(detector::INDEX_TIP);
        let palm = landmarks.point(detector::WRIST);

        FramePoints {
            index_x: (index_tip.x * width as f64) as i32,
            index_y: (index_tip.y * height as f64) as i32,
            palm_x: palm.x,
            palm_y: palm.y,
        }
    }

    /// Slides the palm-X window and reports a swipe once the full window has
    /// moved further than the threshold. The window is cleared after a swipe
    /// so one sweep of the hand cannot fire twice.
    fn check_swipe(&mut self, palm_x: f64) -> GestureType {
        self.palm_x_history.push_back(palm_x);
        if self.palm_x_history.len() > self.config.swipe_frames {
            self.palm_x_history.pop_front();
        }
        if self.palm_x_history.len() < self.config.swipe_frames {
            return GestureType::None;
        }

        let oldest = self.palm_x_history[0];
        let newest = self.palm_x_history[self.palm_x_history.len() - 1];
        let delta = newest - oldest;

        if delta > self.config.swipe_threshold {
            self.palm_x_history.clear();
            GestureType::SwipeRight
        } else if delta < -self.config.swipe_threshold {
            self.palm_x_history.clear();
            GestureType::SwipeLeft
        } else {
            GestureType::None
        }
    }

    fn classify_static(&self, landmarks: &HandLandmarks) -> GestureType {
        match self.count_extended_fingers(landmarks) {
            0 => GestureType::Fist,
            5 => GestureType::OpenPalm,
            1 if Self::index_only(landmarks) => GestureType::Pointing,
            _ => GestureType::None,
        }
    }

    /// Counts extended fingers. The four non-thumb digits count when the tip
    /// sits above its PIP joint (smaller y in image coordinates); the thumb
    /// is judged by horizontal displacement from its IP joint instead.
    fn count_extended_fingers(&self, landmarks: &HandLandmarks) -> usize {
        const TIPS: [usize; 4] = [
            detector::INDEX_TIP,
            detector::MIDDLE_TIP,
            detector::RING_TIP,
            detector::PINKY_TIP,
        ];
        const PIPS: [usize; 4] = [
            detector::INDEX_PIP,
            detector::MIDDLE_PIP,
            detector::RING_PIP,
            detector::PINKY_PIP,
        ];

        let mut count = TIPS
            .iter()
            .zip(PIPS)
            .filter(|(tip, pip)| landmarks.point(**tip).y < landmarks.point(*pip).y)
            .count();

        let thumb_tip = landmarks.point(detector::THUMB_TIP);
        let thumb_ip = landmarks.point(detector::THUMB_IP);
        if (thumb_tip.x - thumb_ip.x).abs() > self.config.thumb_extend_threshold {
            count += 1;
        }

        count
    }

    fn index_only(landmarks: &HandLandmarks) -> bool {
        let index_up =
            landmarks.point(detector::INDEX_TIP).y < landmarks.point(detector::INDEX_PIP).y;
        let middle_down =
            landmarks.point(detector::MIDDLE_TIP).y > landmarks.point(detector::MIDDLE_PIP).y;
        index_up && middle_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{
        HandLandmarks, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
        PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP, WRIST,
    };
    use nalgebra::Vector3;

    const FINGER_PAIRS: [(usize, usize); 4] = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];

    fn hand(build: impl FnOnce(&mut Vec<Vector3<f64>>)) -> HandLandmarks {
        let mut points = vec![Vector3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        build(&mut points);
        HandLandmarks::from_points(points).unwrap()
    }

    fn fist_at(palm_x: f64) -> HandLandmarks {
        hand(|p| {
            for (tip, pip) in FINGER_PAIRS {
                p[tip].y = 0.7;
                p[pip].y = 0.6;
            }
            // Thumb tip and IP joint aligned: not extended.
            p[THUMB_TIP].x = 0.5;
            p[THUMB_IP].x = 0.5;
            p[WRIST].x = palm_x;
        })
    }

    fn open_palm() -> HandLandmarks {
        hand(|p| {
            for (tip, pip) in FINGER_PAIRS {
                p[tip].y = 0.3;
                p[pip].y = 0.4;
            }
            p[THUMB_TIP].x = 0.62;
            p[THUMB_IP].x = 0.5;
        })
    }

    fn pointing(index_tip_y: f64) -> HandLandmarks {
        hand(|p| {
            p[INDEX_TIP].y = index_tip_y;
            p[INDEX_PIP].y = index_tip_y + 0.1;
            for (tip, pip) in [
                (MIDDLE_TIP, MIDDLE_PIP),
                (RING_TIP, RING_PIP),
                (PINKY_TIP, PINKY_PIP),
            ] {
                p[tip].y = 0.7;
                p[pip].y = 0.6;
            }
            p[THUMB_TIP].x = 0.5;
            p[THUMB_IP].x = 0.5;
        })
    }

    fn recognizer(threshold: f64, frames: usize) -> GestureRecognizer {
        GestureRecognizer::new(GestureConfig {
            swipe_threshold: threshold,
            swipe_frames: frames,
            ..GestureConfig::default()
        })
    }

    #[test]
    fn no_hand_yields_none_and_no_points() {
        let mut rec = recognizer(0.15, 8);
        let (gesture, points) = rec.recognize(None, 640, 480);
        assert_eq!(gesture, GestureType::None);
        assert!(points.is_none());
    }

    #[test]
    fn static_poses_classify() {
        let mut rec = recognizer(0.15, 8);
        assert_eq!(
            rec.recognize(Some(&fist_at(0.5)), 640, 480).0,
            GestureType::Fist
        );
        assert_eq!(
            rec.recognize(Some(&open_palm()), 640, 480).0,
            GestureType::OpenPalm
        );
        assert_eq!(
            rec.recognize(Some(&pointing(0.2)), 640, 480).0,
            GestureType::Pointing
        );
    }

    #[test]
    fn two_fingers_is_ambiguous() {
        let two_up = hand(|p| {
            for (tip, pip) in [(INDEX_TIP, INDEX_PIP), (MIDDLE_TIP, MIDDLE_PIP)] {
                p[tip].y = 0.3;
                p[pip].y = 0.4;
            }
            for (tip, pip) in [(RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)] {
                p[tip].y = 0.7;
                p[pip].y = 0.6;
            }
            p[THUMB_TIP].x = 0.5;
            p[THUMB_IP].x = 0.5;
        });
        let mut rec = recognizer(0.15, 8);
        assert_eq!(rec.recognize(Some(&two_up), 640, 480).0, GestureType::None);
    }

    #[test]
    fn static_classification_is_idempotent() {
        let pose = pointing(0.2);
        let mut rec = recognizer(0.15, 8);
        let first = rec.recognize(Some(&pose), 640, 480);
        let second = rec.recognize(Some(&pose), 640, 480);
        assert_eq!(first, second);
    }

    #[test]
    fn fingertip_position_is_scaled_to_pixels() {
        let pose = pointing(0.25);
        let mut rec = recognizer(0.15, 8);
        let (_, points) = rec.recognize(Some(&pose), 640, 480);
        let points = points.unwrap();
        assert_eq!(points.index_x, 320);
        assert_eq!(points.index_y, 120);
    }

    #[test]
    fn swipe_right_fires_once_window_is_full() {
        let mut rec = recognizer(0.25, 4);
        for x in [0.25, 0.3, 0.4] {
            let (gesture, _) = rec.recognize(Some(&fist_at(x)), 640, 480);
            assert_eq!(gesture, GestureType::Fist, "window not full yet");
        }
        let (gesture, _) = rec.recognize(Some(&fist_at(0.75)), 640, 480);
        assert_eq!(gesture, GestureType::SwipeRight);
    }

    #[test]
    fn swipe_left_on_negative_delta() {
        let mut rec = recognizer(0.25, 4);
        for x in [0.75, 0.7, 0.6] {
            rec.recognize(Some(&fist_at(x)), 640, 480);
        }
        let (gesture, _) = rec.recognize(Some(&fist_at(0.25)), 640, 480);
        assert_eq!(gesture, GestureType::SwipeLeft);
    }

    #[test]
    fn delta_equal_to_threshold_does_not_trigger() {
        // 0.25 and 0.5 are exactly representable, so delta == threshold.
        let mut rec = recognizer(0.25, 4);
        for x in [0.25, 0.3, 0.4] {
            rec.recognize(Some(&fist_at(x)), 640, 480);
        }
        let (gesture, _) = rec.recognize(Some(&fist_at(0.5)), 640, 480);
        assert_eq!(gesture, GestureType::Fist);
    }

    #[test]
    fn window_keeps_sliding_without_a_swipe() {
        let mut rec = recognizer(0.25, 4);
        for _ in 0..10 {
            let (gesture, _) = rec.recognize(Some(&fist_at(0.5)), 640, 480);
            assert_eq!(gesture, GestureType::Fist);
        }
        // Window stayed full the whole time; a sudden jump still swipes.
        let (gesture, _) = rec.recognize(Some(&fist_at(0.9)), 640, 480);
        assert_eq!(gesture, GestureType::SwipeRight);
    }

    #[test]
    fn history_cleared_after_swipe() {
        let mut rec = recognizer(0.25, 4);
        for x in [0.2, 0.3, 0.4] {
            rec.recognize(Some(&fist_at(x)), 640, 480);
        }
        let (gesture, _) = rec.recognize(Some(&fist_at(0.8)), 640, 480);
        assert_eq!(gesture, GestureType::SwipeRight);

        // A stationary hand right after the swipe must not re-trigger.
        for _ in 0..4 {
            let (gesture, _) = rec.recognize(Some(&fist_at(0.8)), 640, 480);
            assert_ne!(gesture, GestureType::SwipeRight);
        }
    }

    #[test]
    fn history_cleared_on_hand_loss() {
        let mut rec = recognizer(0.25, 4);
        for x in [0.2, 0.4, 0.6] {
            rec.recognize(Some(&fist_at(x)), 640, 480);
        }
        rec.recognize(None, 640, 480);
        // The window restarts from empty, so the next frame cannot complete it.
        let (gesture, _) = rec.recognize(Some(&fist_at(0.9)), 640, 480);
        assert_eq!(gesture, GestureType::Fist);
    }
}
