use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use crate::input::queue::key;
use crate::platform::RendererFlags;
use crate::renderer::traits::Color;

/// Configuration for the engine, provided by the game or loaded from JSON.
/// Missing JSON fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title.
    pub title: String,
    /// Window position on the desktop.
    pub window_x: i32,
    pub window_y: i32,
    /// Window and screen size in pixels (default: 1024x768).
    pub screen_width: u32,
    pub screen_height: u32,
    /// Shortest frame in milliseconds; the loop sleeps off the remainder (default: 16).
    pub min_frame_millis: u64,
    /// Upper bound on the per-frame delta in seconds (default: 0.05).
    pub max_delta: f32,
    /// Color the back buffer is cleared to each frame.
    pub clear_color: Color,
    /// Scancode that ends the loop while held (default: Escape).
    pub quit_key: u16,
    /// Seed for the engine RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Request a vsync'd renderer.
    pub vsync: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Game Programming in Rust".to_string(),
            window_x: 100,
            window_y: 100,
            screen_width: 1024,
            screen_height: 768,
            min_frame_millis: 16,
            max_delta: 0.05,
            clear_color: Color::BLUE,
            quit_key: key::ESCAPE,
            seed: None,
            vsync: true,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }

    pub fn renderer_flags(&self) -> RendererFlags {
        RendererFlags {
            accelerated: true,
            present_vsync: self.vsync,
        }
    }
}
