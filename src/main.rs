// src/main.rs
mod app;
mod config;
mod detector;
mod gestures;
mod input;
mod mediapipe_bridge;
mod mode_manager;
mod modes;
mod overlay;
mod video;

use eframe::egui;
use tracing::{info, warn};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = config::Config::load();

    // List available cameras up front so a wrong camera id is easy to spot.
    match nokhwa::query(nokhwa::utils::ApiBackend::Auto) {
        Ok(cameras) => {
            info!("found {} camera(s)", cameras.len());
            for (i, camera) in cameras.iter().enumerate() {
                info!("  [{}] {}", i, camera.human_name());
            }
        }
        Err(e) => {
            warn!("failed to query cameras: {}", e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([800.0, 600.0]),
        centered: true,
        ..Default::default()
    };

    let result = eframe::run_native(
        "Gesture Control Hub",
        options,
        Box::new(move |_cc| Box::new(app::GestureHubApp::new(config))),
    );

    if let Err(e) = result {
        eprintln!("Error running application: {:?}", e);
    }
}
