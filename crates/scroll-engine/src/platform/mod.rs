//! Collaborator contracts the game loop consumes.
//!
//! Window creation, texture decoding, event polling and timing belong to the
//! host. A backend implements the five traits below and gets [`Platform`] for
//! free.

pub mod headless;

use crate::api::error::PlatformError;
use crate::input::queue::{InputEvent, KeyboardState};
use crate::renderer::traits::{Renderer, Texture};

/// Opaque window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

/// Opaque renderer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererHandle(pub u32);

/// Renderer creation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererFlags {
    pub accelerated: bool,
    pub present_vsync: bool,
}

impl Default for RendererFlags {
    fn default() -> Self {
        Self {
            accelerated: true,
            present_vsync: true,
        }
    }
}

/// Window and renderer lifetime.
pub trait WindowProvider {
    fn create_window(
        &mut self,
        title: &str,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, PlatformError>;

    fn create_renderer(
        &mut self,
        window: WindowHandle,
        flags: RendererFlags,
    ) -> Result<RendererHandle, PlatformError>;

    fn destroy_renderer(&mut self, renderer: RendererHandle);

    fn destroy_window(&mut self, window: WindowHandle);
}

/// Decodes image files into renderer-bound textures.
pub trait TextureProvider {
    fn load_texture(&mut self, path: &str) -> Result<Texture, PlatformError>;

    fn destroy_texture(&mut self, texture: Texture);
}

/// Event and keyboard polling.
pub trait InputProvider {
    /// Drain the events that arrived since the last poll.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Current held-key snapshot.
    fn keyboard_state(&self) -> KeyboardState;
}

/// Millisecond clock.
pub trait Clock {
    fn now_millis(&mut self) -> u64;

    /// Sleep for roughly `ms` milliseconds.
    fn sleep_millis(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}

/// Everything the game needs from its host.
pub trait Platform: WindowProvider + Renderer + TextureProvider + InputProvider + Clock {}

impl<T> Platform for T where T: WindowProvider + Renderer + TextureProvider + InputProvider + Clock {}
