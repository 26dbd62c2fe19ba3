use log::warn;

use crate::core::scene::Scene;
use crate::renderer::draw_list::DrawList;
use crate::renderer::traits::Renderer;

/// Draw every registered sprite in ascending draw order.
/// Handles whose actor or component is gone are skipped. Returns the number drawn.
pub fn draw_sprites(sprites: &DrawList, scene: &Scene, renderer: &mut dyn Renderer) -> usize {
    let mut drawn = 0;
    for entry in sprites.iter() {
        let handle = entry.handle;
        let resolved = scene
            .get(handle.actor)
            .is_some_and(|actor| actor.draw_component(handle.component, renderer));
        if resolved {
            drawn += 1;
        } else {
            warn!("skipping stale sprite {:?}", handle);
        }
    }
    drawn
}
