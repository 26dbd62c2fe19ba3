//! Flip-book sprite animation.
//!
//! Cycles through a texture sequence at a fixed rate. A long frame advances
//! as many animation frames as fit in it, so playback stays in sync with time
//! after a hitch instead of silently dropping frames.

use std::any::Any;

use crate::components::actor::Transform;
use crate::components::sprite::{SpriteComponent, DEFAULT_DRAW_ORDER};
use crate::components::Component;
use crate::renderer::traits::{Renderer, Texture};

/// Playback rate for animations that don't set one.
pub const DEFAULT_ANIM_FPS: f32 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimSpriteComponent {
    sprite: SpriteComponent,
    textures: Vec<Texture>,
    /// Frames per second.
    fps: f32,
    frame_index: usize,
    /// Time accumulated in the current frame.
    frame_timer: f32,
}

impl AnimSpriteComponent {
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            textures: Vec::new(),
            fps: DEFAULT_ANIM_FPS,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    pub fn with_textures(mut self, textures: Vec<Texture>) -> Self {
        self.set_anim_textures(textures);
        self
    }

    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Replace the sequence and restart from its first texture.
    pub fn set_anim_textures(&mut self, textures: Vec<Texture>) {
        self.textures = textures;
        self.frame_index = 0;
        self.frame_timer = 0.0;
        if let Some(first) = self.textures.first() {
            self.sprite.set_texture(*first);
        }
    }

    pub fn anim_fps(&self) -> f32 {
        self.fps
    }

    pub fn set_anim_fps(&mut self, fps: f32) {
        self.fps = fps;
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Jump to `index` (wrapped into the sequence) and bind its texture.
    pub fn set_frame_index(&mut self, index: usize) {
        if self.textures.is_empty() {
            return;
        }
        self.frame_index = index % self.textures.len();
        self.sprite.set_texture(self.textures[self.frame_index]);
    }

    pub fn frame_count(&self) -> usize {
        self.textures.len()
    }

    pub fn sprite(&self) -> &SpriteComponent {
        &self.sprite
    }

    /// Advance by `dt` seconds. Returns true if the displayed frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.textures.is_empty() || self.fps <= 0.0 {
            return false;
        }

        let frame_duration = 1.0 / self.fps;
        self.frame_timer += dt;

        let start = self.frame_index;
        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.frame_index = (self.frame_index + 1) % self.textures.len();
        }

        self.sprite.set_texture(self.textures[self.frame_index]);
        self.frame_index != start
    }
}

impl Default for AnimSpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl Component for AnimSpriteComponent {
    fn update(&mut self, _owner: &mut Transform, dt: f32) {
        self.tick(dt);
    }

    fn draw_order(&self) -> Option<i32> {
        Some(self.sprite.draw_order())
    }

    fn draw(&self, owner: &Transform, renderer: &mut dyn Renderer) {
        self.sprite.draw_at(owner, renderer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
