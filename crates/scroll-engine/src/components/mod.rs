pub mod actor;
pub mod animation;
pub mod background;
pub mod movement;
pub mod sprite;

use std::any::Any;

use crate::input::queue::KeyboardState;
use crate::renderer::traits::Renderer;
use actor::Transform;

/// Update order for components that don't ask for one.
pub const DEFAULT_UPDATE_ORDER: i32 = 100;

/// A behavior unit attached to exactly one actor.
///
/// Every capability has a no-op default, so a component only implements what
/// it does. The owner's transform is passed in instead of a back-reference.
/// Sprite-like components report a draw order and get registered in the
/// game's draw list when their actor is.
pub trait Component: Any {
    /// Lower values update earlier. Read once, when the component is attached.
    fn update_order(&self) -> i32 {
        DEFAULT_UPDATE_ORDER
    }

    fn update(&mut self, _owner: &mut Transform, _dt: f32) {}

    fn process_input(&mut self, _keys: &KeyboardState) {}

    /// `Some(order)` for components that draw. Lower values draw further back.
    fn draw_order(&self) -> Option<i32> {
        None
    }

    fn draw(&self, _owner: &Transform, _renderer: &mut dyn Renderer) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
