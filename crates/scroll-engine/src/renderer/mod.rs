pub mod draw_list;
pub mod traits;

// Re-export key types for convenient access
pub use draw_list::{DrawEntry, DrawList};
pub use traits::{Color, Rect, Renderer, Texture, TextureId};
