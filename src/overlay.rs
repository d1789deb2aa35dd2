// src/overlay.rs - Read-only status overlay painted over the camera frame
use crate::gestures::FramePoints;
use crate::mode_manager::ManagerStatus;
use crate::modes::OverlayInfo;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color32,
    pub surface: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(70, 130, 240),
            surface: Color32::from_rgba_unmultiplied(20, 20, 25, 180),
            success: Color32::from_rgb(76, 175, 80),
            warning: Color32::from_rgb(255, 152, 0),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(200, 200, 200),
        }
    }
}

pub struct Overlay {
    theme: Theme,
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    pub fn draw(
        &self,
        painter: &egui::Painter,
        frame_rect: Rect,
        info: &OverlayInfo,
        points: Option<&FramePoints>,
        status: &ManagerStatus,
        frame_size: (u32, u32),
    ) {
        if let Some((top, bottom)) = info.zones {
            self.draw_zone_lines(painter, frame_rect, top, bottom);
        }
        if let Some(points) = points {
            self.draw_fingertip(painter, frame_rect, points, frame_size);
        }

        self.draw_banner(painter, frame_rect, info, status);
        self.draw_hints(painter, frame_rect, info.hints);

        if status.hold_progress > 0.0 && !status.switched_mode {
            self.draw_hold_progress(painter, frame_rect, status.hold_progress);
        }
    }

    fn draw_banner(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        info: &OverlayInfo,
        status: &ManagerStatus,
    ) {
        let banner = Rect::from_min_size(rect.min, Vec2::new(rect.width(), 32.0));
        painter.rect_filled(banner, egui::Rounding::ZERO, self.theme.surface);
        painter.text(
            Pos2::new(banner.left() + 10.0, banner.center().y),
            Align2::LEFT_CENTER,
            info.mode_name,
            FontId::proportional(18.0),
            self.theme.primary,
        );

        // The most recent action, preferring this frame's over the sticky one.
        let action = if status.action.is_empty() {
            &info.last_action
        } else {
            &status.action
        };
        if !action.is_empty() {
            painter.text(
                Pos2::new(banner.right() - 10.0, banner.center().y),
                Align2::RIGHT_CENTER,
                action,
                FontId::proportional(16.0),
                self.theme.success,
            );
        }
    }

    fn draw_hints(&self, painter: &egui::Painter, rect: Rect, hints: &[&str]) {
        let mut y = rect.top() + 44.0;
        for hint in hints {
            painter.text(
                Pos2::new(rect.left() + 10.0, y),
                Align2::LEFT_TOP,
                *hint,
                FontId::proportional(13.0),
                self.theme.text_secondary,
            );
            y += 18.0;
        }
        painter.text(
            Pos2::new(rect.left() + 10.0, y),
            Align2::LEFT_TOP,
            "Open palm (hold): switch mode",
            FontId::proportional(13.0),
            self.theme.text_secondary,
        );
    }

    fn draw_zone_lines(&self, painter: &egui::Painter, rect: Rect, top: f64, bottom: f64) {
        for ratio in [top, bottom] {
            let y = rect.top() + rect.height() * ratio as f32;
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                Stroke::new(1.5, self.theme.warning),
            );
        }
    }

    fn draw_fingertip(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        points: &FramePoints,
        frame_size: (u32, u32),
    ) {
        let (width, height) = frame_size;
        if width == 0 || height == 0 {
            return;
        }
        let pos = Pos2::new(
            rect.left() + rect.width() * points.index_x as f32 / width as f32,
            rect.top() + rect.height() * points.index_y as f32 / height as f32,
        );
        painter.circle_filled(pos, 6.0, self.theme.primary);
        painter.circle_stroke(pos, 8.0, Stroke::new(2.0, self.theme.text_primary));
    }

    fn draw_hold_progress(&self, painter: &egui::Painter, rect: Rect, progress: f32) {
        let bar_width = rect.width() * 0.4;
        let bar = Rect::from_min_size(
            Pos2::new(rect.center().x - bar_width / 2.0, rect.bottom() - 30.0),
            Vec2::new(bar_width, 14.0),
        );

        painter.rect_filled(bar, egui::Rounding::same(4.0), self.theme.surface);
        let fill = Rect::from_min_size(
            bar.min,
            Vec2::new(bar.width() * progress.clamp(0.0, 1.0), bar.height()),
        );
        painter.rect_filled(fill, egui::Rounding::same(4.0), self.theme.primary);
        painter.text(
            Pos2::new(bar.center().x, bar.top() - 4.0),
            Align2::CENTER_BOTTOM,
            "Hold to switch mode",
            FontId::proportional(12.0),
            self.theme.text_primary,
        );
    }
}
