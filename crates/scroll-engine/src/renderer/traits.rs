//! Draw-surface contract consumed by sprite components.
//!
//! The engine never talks to a graphics API directly. Components draw through
//! [`Renderer`], and the game clears and presents through the same trait.

use serde::{Deserialize, Serialize};

/// Opaque texture handle issued by the texture provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A loaded texture with its native pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// RGBA draw color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

/// Integer destination rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Renderer contract for platform backends.
pub trait Renderer {
    /// Color used by the next [`clear`](Renderer::clear).
    fn set_draw_color(&mut self, color: Color);

    /// Clear the back buffer.
    fn clear(&mut self);

    /// Copy `texture` into `dst`, rotated clockwise by `angle_degrees`
    /// around the rectangle's center.
    fn draw_texture(&mut self, texture: &Texture, dst: Rect, angle_degrees: f64);

    /// Swap front and back buffers.
    fn present(&mut self);
}
