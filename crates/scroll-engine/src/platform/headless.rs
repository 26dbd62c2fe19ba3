//! In-memory platform: simulated clock, scripted input, recorded draw calls.
//!
//! Drives the game loop without a window. Time only moves when the frame
//! governor sleeps or when [`HeadlessPlatform::advance`] is called, so a run
//! is fully deterministic.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::{Clock, InputProvider, RendererFlags, RendererHandle, TextureProvider, WindowHandle, WindowProvider};
use crate::api::error::PlatformError;
use crate::input::queue::{InputEvent, InputQueue, KeyboardState};
use crate::renderer::traits::{Color, Rect, Renderer, Texture, TextureId};

/// Size handed out for textures without an explicit override.
pub const DEFAULT_TEXTURE_SIZE: (u32, u32) = (64, 64);

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Texture { texture: TextureId, dst: Rect, angle: f64 },
    Present,
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    now: u64,
    draw_color: Color,
    calls: Vec<DrawCall>,
    frames_presented: u64,

    window: Option<WindowHandle>,
    renderer: Option<RendererHandle>,
    window_error: Option<String>,
    renderer_error: Option<String>,

    next_texture: u32,
    texture_sizes: HashMap<String, (u32, u32)>,
    failing_textures: HashSet<String>,
    loaded: Vec<(String, Texture)>,
    destroyed: Vec<TextureId>,

    queue: InputQueue,
    keys: KeyboardState,
    /// Events released once `frames_presented` reaches the frame number.
    scheduled: Vec<(u64, InputEvent)>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            next_texture: 1,
            ..Default::default()
        }
    }

    // -- Scripting --

    /// Make `create_window` fail with `reason`.
    pub fn fail_window(mut self, reason: impl Into<String>) -> Self {
        self.window_error = Some(reason.into());
        self
    }

    /// Make `create_renderer` fail with `reason`.
    pub fn fail_renderer(mut self, reason: impl Into<String>) -> Self {
        self.renderer_error = Some(reason.into());
        self
    }

    /// Native size reported for the texture at `path`.
    pub fn with_texture_size(mut self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.texture_sizes.insert(path.into(), (width, height));
        self
    }

    /// Make loading `path` fail.
    pub fn with_missing_texture(mut self, path: impl Into<String>) -> Self {
        self.failing_textures.insert(path.into());
        self
    }

    /// Queue an event for the next poll.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Queue an event to be delivered once `frame` frames have been presented.
    pub fn schedule(&mut self, frame: u64, event: InputEvent) {
        self.scheduled.push((frame, event));
    }

    /// Request quit once `frames` frames have been presented.
    pub fn quit_after_frames(mut self, frames: u64) -> Self {
        self.schedule(frames, InputEvent::Quit);
        self
    }

    pub fn press(&mut self, scancode: u16) {
        self.keys.set(scancode, true);
    }

    pub fn release(&mut self, scancode: u16) {
        self.keys.set(scancode, false);
    }

    /// Move the simulated clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    // -- Inspection --

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Texture draws recorded since the most recent clear.
    pub fn last_frame_draws(&self) -> Vec<(TextureId, Rect, f64)> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear(_)))
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter_map(|c| match *c {
                DrawCall::Texture { texture, dst, angle } => Some((texture, dst, angle)),
                _ => None,
            })
            .collect()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn window_open(&self) -> bool {
        self.window.is_some()
    }

    pub fn renderer_open(&self) -> bool {
        self.renderer.is_some()
    }

    /// Texture loaded for `path`, if any load succeeded.
    pub fn loaded_texture(&self, path: &str) -> Option<Texture> {
        self.loaded.iter().find(|(p, _)| p == path).map(|(_, t)| *t)
    }

    /// Number of successful loads, duplicates included.
    pub fn load_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn destroyed_textures(&self) -> &[TextureId] {
        &self.destroyed
    }
}

impl WindowProvider for HeadlessPlatform {
    fn create_window(
        &mut self,
        title: &str,
        _x: i32,
        _y: i32,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, PlatformError> {
        if let Some(reason) = &self.window_error {
            return Err(PlatformError::Window(reason.clone()));
        }
        debug!("headless window '{}' {}x{}", title, width, height);
        let handle = WindowHandle(1);
        self.window = Some(handle);
        Ok(handle)
    }

    fn create_renderer(
        &mut self,
        window: WindowHandle,
        _flags: RendererFlags,
    ) -> Result<RendererHandle, PlatformError> {
        if let Some(reason) = &self.renderer_error {
            return Err(PlatformError::Renderer(reason.clone()));
        }
        if self.window != Some(window) {
            return Err(PlatformError::Renderer(format!("unknown window {:?}", window)));
        }
        let handle = RendererHandle(1);
        self.renderer = Some(handle);
        Ok(handle)
    }

    fn destroy_renderer(&mut self, renderer: RendererHandle) {
        if self.renderer == Some(renderer) {
            self.renderer = None;
        }
    }

    fn destroy_window(&mut self, window: WindowHandle) {
        if self.window == Some(window) {
            self.window = None;
        }
    }
}

impl Renderer for HeadlessPlatform {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear(self.draw_color));
    }

    fn draw_texture(&mut self, texture: &Texture, dst: Rect, angle_degrees: f64) {
        self.calls.push(DrawCall::Texture {
            texture: texture.id,
            dst,
            angle: angle_degrees,
        });
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
        self.frames_presented += 1;
    }
}

impl TextureProvider for HeadlessPlatform {
    fn load_texture(&mut self, path: &str) -> Result<Texture, PlatformError> {
        if self.failing_textures.contains(path) {
            return Err(PlatformError::TextureLoad {
                path: path.to_string(),
                reason: "file not found".to_string(),
            });
        }
        let (width, height) = self
            .texture_sizes
            .get(path)
            .copied()
            .unwrap_or(DEFAULT_TEXTURE_SIZE);
        let texture = Texture::new(TextureId(self.next_texture), width, height);
        self.next_texture += 1;
        self.loaded.push((path.to_string(), texture));
        Ok(texture)
    }

    fn destroy_texture(&mut self, texture: Texture) {
        self.destroyed.push(texture.id);
    }
}

impl InputProvider for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let frame = self.frames_presented;
        let (due, later): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|(at, _)| *at <= frame);
        self.scheduled = later;
        for (_, event) in due {
            self.queue.push(event);
        }

        let events = self.queue.drain();
        for event in &events {
            self.keys.apply(event);
        }
        events
    }

    fn keyboard_state(&self) -> KeyboardState {
        self.keys.clone()
    }
}

impl Clock for HeadlessPlatform {
    fn now_millis(&mut self) -> u64 {
        self.now
    }

    fn sleep_millis(&mut self, ms: u64) {
        self.now += ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::key;

    #[test]
    fn window_then_renderer() {
        let mut p = HeadlessPlatform::new();
        let w = p.create_window("t", 0, 0, 640, 480).unwrap();
        let r = p.create_renderer(w, RendererFlags::default()).unwrap();
        assert!(p.window_open() && p.renderer_open());
        p.destroy_renderer(r);
        p.destroy_window(w);
        assert!(!p.window_open() && !p.renderer_open());
    }

    #[test]
    fn scripted_window_failure() {
        let mut p = HeadlessPlatform::new().fail_window("no display");
        let err = p.create_window("t", 0, 0, 640, 480).unwrap_err();
        assert_eq!(err, PlatformError::Window("no display".into()));
    }

    #[test]
    fn textures_get_distinct_ids_and_sizes() {
        let mut p = HeadlessPlatform::new().with_texture_size("ship.png", 64, 29);
        let a = p.load_texture("ship.png").unwrap();
        let b = p.load_texture("other.png").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!((a.width, a.height), (64, 29));
        assert_eq!((b.width, b.height), DEFAULT_TEXTURE_SIZE);
    }

    #[test]
    fn scheduled_events_wait_for_frame() {
        let mut p = HeadlessPlatform::new().quit_after_frames(1);
        p.schedule(0, InputEvent::KeyDown { scancode: key::W });

        assert_eq!(p.poll_events(), vec![InputEvent::KeyDown { scancode: key::W }]);
        assert!(p.keyboard_state().is_pressed(key::W));

        p.present();
        assert_eq!(p.poll_events(), vec![InputEvent::Quit]);
        assert!(p.poll_events().is_empty());
    }

    #[test]
    fn last_frame_draws_start_after_clear() {
        let mut p = HeadlessPlatform::new();
        let t = p.load_texture("a.png").unwrap();
        p.clear();
        p.draw_texture(&t, Rect::new(0, 0, 1, 1), 0.0);
        p.present();
        p.clear();
        p.draw_texture(&t, Rect::new(5, 5, 1, 1), 0.0);
        let draws = p.last_frame_draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].1, Rect::new(5, 5, 1, 1));
    }

    #[test]
    fn sleep_moves_clock() {
        let mut p = HeadlessPlatform::new();
        p.sleep_millis(16);
        p.advance(4);
        assert_eq!(p.now_millis(), 20);
    }
}
