//! Horizontally scrolling, endlessly tiling background.
//!
//! Each texture covers one screen. Tiles start side by side and scroll
//! together; a tile that leaves the left edge jumps behind the last one.

use std::any::Any;

use glam::Vec2;

use crate::components::actor::Transform;
use crate::components::sprite::SpriteComponent;
use crate::components::Component;
use crate::renderer::traits::{Rect, Renderer, Texture};

/// Backgrounds draw behind ordinary sprites by default.
pub const BG_DRAW_ORDER: i32 = 10;

/// One screen-sized tile and its offset from the owner's screen-centered origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BgTexture {
    pub texture: Texture,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BGSpriteComponent {
    sprite: SpriteComponent,
    tiles: Vec<BgTexture>,
    screen_size: Vec2,
    /// Horizontal units per second; negative scrolls left.
    scroll_speed: f32,
}

impl BGSpriteComponent {
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            tiles: Vec::new(),
            screen_size: Vec2::new(1024.0, 768.0),
            scroll_speed: 0.0,
        }
    }

    pub fn with_screen_size(mut self, size: Vec2) -> Self {
        self.screen_size = size;
        self
    }

    pub fn with_scroll_speed(mut self, speed: f32) -> Self {
        self.scroll_speed = speed;
        self
    }

    pub fn with_textures(mut self, textures: &[Texture]) -> Self {
        self.set_bg_textures(textures);
        self
    }

    /// Replace all tiles: tile `i` starts one screen width further right
    /// than tile `i - 1`. Works the same whether or not tiles exist already.
    pub fn set_bg_textures(&mut self, textures: &[Texture]) {
        let width = self.screen_size.x;
        self.tiles = textures
            .iter()
            .enumerate()
            .map(|(i, &texture)| BgTexture {
                texture,
                offset: Vec2::new(i as f32 * width, 0.0),
            })
            .collect();
    }

    pub fn tiles(&self) -> &[BgTexture] {
        &self.tiles
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
    }

    pub fn draw_order(&self) -> i32 {
        self.sprite.draw_order()
    }

    /// Scroll every tile; a tile fully past the left edge wraps to the right
    /// of the others. The wrap lands one pixel short so rounding never opens a seam.
    pub fn scroll(&mut self, dt: f32) {
        let width = self.screen_size.x;
        let wrap_x = (self.tiles.len() as f32 - 1.0) * width - 1.0;
        for tile in &mut self.tiles {
            tile.offset.x += self.scroll_speed * dt;
            if tile.offset.x < -width {
                tile.offset.x = wrap_x;
            }
        }
    }

    /// Screen rectangle covered by `tile` for an owner at `origin`.
    pub fn tile_rect(&self, origin: Vec2, tile: &BgTexture) -> Rect {
        let w = self.screen_size.x as i32;
        let h = self.screen_size.y as i32;
        Rect::new(
            (origin.x - (w / 2) as f32 + tile.offset.x) as i32,
            (origin.y - (h / 2) as f32 + tile.offset.y) as i32,
            w,
            h,
        )
    }
}

impl Default for BGSpriteComponent {
    fn default() -> Self {
        Self::new(BG_DRAW_ORDER)
    }
}

impl Component for BGSpriteComponent {
    fn update(&mut self, _owner: &mut Transform, dt: f32) {
        self.scroll(dt);
    }

    fn draw_order(&self) -> Option<i32> {
        Some(self.sprite.draw_order())
    }

    fn draw(&self, owner: &Transform, renderer: &mut dyn Renderer) {
        for tile in &self.tiles {
            renderer.draw_texture(&tile.texture, self.tile_rect(owner.position, tile), 0.0);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
