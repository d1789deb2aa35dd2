// src/app.rs
use crate::config::Config;
use crate::detector::HandDetector;
use crate::gestures::{FramePoints, GestureRecognizer, GestureType};
use crate::input::{EnigoSink, InputSink, NullSink};
use crate::mode_manager::{ManagerStatus, ModeManager};
use crate::modes::{ControlMode, ScrollMode, VideoMode};
use crate::overlay::Overlay;
use crate::video::CameraSource;

use eframe::egui;
use std::time::Instant;
use tracing::{error, warn};

pub struct GestureHubApp {
    camera: Option<CameraSource>,
    detector: HandDetector,
    recognizer: GestureRecognizer,
    manager: ModeManager,
    sink: Option<EnigoSink>,
    overlay: Overlay,

    // Per-frame pipeline output, kept for display.
    frame_texture: Option<egui::TextureHandle>,
    frame_size: (u32, u32),
    last_gesture: GestureType,
    last_points: Option<FramePoints>,
    last_status: ManagerStatus,

    injection_enabled: bool,
    camera_error: Option<String>,
}

impl GestureHubApp {
    pub fn new(config: Config) -> Self {
        let (camera, camera_error) = match CameraSource::new(&config.camera) {
            Ok(camera) => (Some(camera), None),
            Err(e) => {
                error!("{}", e);
                (None, Some(e.to_string()))
            }
        };

        let detector = HandDetector::new(config.detection.clone());
        let recognizer = GestureRecognizer::new(config.gestures.clone());

        let modes: Vec<Box<dyn ControlMode>> = vec![
            Box::new(VideoMode::new(config.video_mode.clone())),
            Box::new(ScrollMode::new(config.scroll_mode.clone())),
        ];
        let mut manager = ModeManager::new(modes, config.palm_hold());
        manager.set_frame_size(config.camera.width, config.camera.height);

        let sink = match EnigoSink::new() {
            Ok(sink) => Some(sink),
            Err(e) => {
                warn!("input injection unavailable: {}", e);
                None
            }
        };

        Self {
            camera,
            detector,
            recognizer,
            manager,
            sink,
            overlay: Overlay::new(),
            frame_texture: None,
            frame_size: (config.camera.width, config.camera.height),
            last_gesture: GestureType::None,
            last_points: None,
            last_status: ManagerStatus::default(),
            injection_enabled: true,
            camera_error,
        }
    }

    fn process_frame(&mut self, ctx: &egui::Context) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };

        let frame = match camera.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        let (width, height) = (frame.width(), frame.height());
        if (width, height) != self.frame_size {
            // Camera delivered a different size than requested.
            self.frame_size = (width, height);
            self.manager.set_frame_size(width, height);
        }

        let landmarks = self.detector.detect(&frame);
        let (gesture, points) = self.recognizer.recognize(landmarks.as_ref(), width, height);

        let now = Instant::now();
        let status = match (&mut self.sink, self.injection_enabled) {
            (Some(sink), true) => self.manager.update(gesture, points.as_ref(), now, sink),
            _ => {
                let mut null = NullSink;
                self.manager.update(gesture, points.as_ref(), now, &mut null)
            }
        };

        self.last_gesture = gesture;
        self.last_points = points;
        self.last_status = status;

        let rgba = frame.to_rgba8();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            rgba.as_flat_samples().as_slice(),
        );
        self.frame_texture = Some(ctx.load_texture("camera_frame", color_image, Default::default()));
    }

    fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("status")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Modes");
                let current = self.manager.current_index();
                for (i, name) in self.manager.mode_names().enumerate() {
                    ui.label(if i == current {
                        egui::RichText::new(format!("▶ {}", name)).strong()
                    } else {
                        egui::RichText::new(format!("   {}", name))
                    });
                }

                ui.separator();
                ui.heading("Status");
                ui.label(format!("Gesture: {:?}", self.last_gesture));
                if self.last_status.hold_progress > 0.0 {
                    ui.add(
                        egui::ProgressBar::new(self.last_status.hold_progress)
                            .text("mode switch"),
                    );
                }
                ui.label(format!(
                    "Detector: {}",
                    if self.detector.is_active() {
                        "active"
                    } else {
                        "unavailable"
                    }
                ));
                if let Some(e) = &self.camera_error {
                    ui.colored_label(egui::Color32::RED, e);
                }

                ui.separator();
                let injection_available = self.sink.is_some();
                ui.add_enabled_ui(injection_available, |ui| {
                    ui.checkbox(&mut self.injection_enabled, "Inject input");
                });
                if !injection_available {
                    ui.label("Input injection unavailable");
                }
            });
    }

    fn render_video_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (fw, fh) = self.frame_size;
            let aspect = if fh > 0 { fw as f32 / fh as f32 } else { 4.0 / 3.0 };

            let mut size = egui::Vec2::new(available.x, available.x / aspect);
            if size.y > available.y {
                size = egui::Vec2::new(available.y * aspect, available.y);
            }
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

            match &self.frame_texture {
                Some(texture) => {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::Pos2::ZERO, egui::Pos2::new(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                    let info = self.manager.overlay_info();
                    self.overlay.draw(
                        ui.painter(),
                        rect,
                        &info,
                        self.last_points.as_ref(),
                        &self.last_status,
                        self.frame_size,
                    );
                }
                None => {
                    ui.painter().rect_filled(
                        rect,
                        egui::Rounding::same(4.0),
                        egui::Color32::from_rgb(50, 50, 55),
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "No Video Signal",
                        egui::FontId::proportional(16.0),
                        egui::Color32::from_rgb(150, 150, 155),
                    );
                }
            }
        });
    }
}

impl eframe::App for GestureHubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_frame(ctx);
        self.render_side_panel(ctx);
        self.render_video_panel(ctx);

        // Keep frames flowing even without UI interaction.
        ctx.request_repaint();
    }
}
