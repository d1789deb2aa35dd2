// src/input.rs - OS input injection behind a narrow seam
use anyhow::Result;
use enigo::{Axis, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Space,
    Char(char),
}

/// Fire-and-forget sink for abstract input commands. Failures are logged,
/// never surfaced to the gesture pipeline.
pub trait InputSink {
    fn press_key(&mut self, key: InputKey);
    /// Positive amounts scroll up, negative down.
    fn scroll(&mut self, amount: i32);
}

pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())?;
        Ok(Self { enigo })
    }
}

impl InputSink for EnigoSink {
    fn press_key(&mut self, key: InputKey) {
        let key = match key {
            InputKey::Space => Key::Space,
            InputKey::Char(c) => Key::Unicode(c),
        };
        if let Err(e) = self.enigo.key(key, Direction::Click) {
            warn!("key injection failed: {}", e);
        }
    }

    fn scroll(&mut self, amount: i32) {
        // enigo's vertical axis counts downward, ours counts upward.
        if let Err(e) = self.enigo.scroll(-amount, Axis::Vertical) {
            warn!("scroll injection failed: {}", e);
        }
    }
}

/// Sink that discards everything. Used when input injection is paused.
pub struct NullSink;

impl InputSink for NullSink {
    fn press_key(&mut self, _key: InputKey) {}

    fn scroll(&mut self, _amount: i32) {}
}
