use std::any::Any;

use crate::components::actor::Transform;
use crate::components::Component;
use crate::core::math;
use crate::renderer::traits::{Rect, Renderer, Texture};

/// Draw order for sprites that don't ask for one.
pub const DEFAULT_DRAW_ORDER: i32 = 100;

/// Sprite component: draws one texture centered on its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Lower values draw further back. Fixed once attached.
    draw_order: i32,
    texture: Option<Texture>,
    /// Native width of the bound texture in pixels.
    tex_width: u32,
    /// Native height of the bound texture in pixels.
    tex_height: u32,
}

impl SpriteComponent {
    pub fn new(draw_order: i32) -> Self {
        Self {
            draw_order,
            texture: None,
            tex_width: 0,
            tex_height: 0,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.set_texture(texture);
        self
    }

    /// Bind a texture and refresh the cached dimensions.
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
        self.tex_width = texture.width;
        self.tex_height = texture.height;
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn tex_width(&self) -> u32 {
        self.tex_width
    }

    pub fn tex_height(&self) -> u32 {
        self.tex_height
    }

    /// Destination rectangle for `owner`: texture size times scale, centered.
    pub fn dest_rect(&self, owner: &Transform) -> Rect {
        let w = (self.tex_width as f32 * owner.scale) as i32;
        let h = (self.tex_height as f32 * owner.scale) as i32;
        Rect::new(
            (owner.position.x - (w / 2) as f32) as i32,
            (owner.position.y - (h / 2) as f32) as i32,
            w,
            h,
        )
    }

    /// Draw the bound texture; nothing is drawn without one.
    pub fn draw_at(&self, owner: &Transform, renderer: &mut dyn Renderer) {
        let Some(texture) = &self.texture else {
            return;
        };
        // Renderer angles run clockwise in degrees.
        let angle = -math::to_degrees(owner.rotation) as f64;
        renderer.draw_texture(texture, self.dest_rect(owner), angle);
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl Component for SpriteComponent {
    fn draw_order(&self) -> Option<i32> {
        Some(self.draw_order)
    }

    fn draw(&self, owner: &Transform, renderer: &mut dyn Renderer) {
        self.draw_at(owner, renderer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
