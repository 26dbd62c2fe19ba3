use glam::{Affine2, Vec2};

use crate::api::context::EngineContext;
use crate::api::types::{ActorId, ActorState, ComponentId};
use crate::components::Component;
use crate::core::math;
use crate::input::queue::KeyboardState;
use crate::renderer::traits::Renderer;

/// Position, rotation and uniform scale of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in screen space.
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise on screen.
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    /// Unit heading for the current rotation.
    pub fn forward(&self) -> Vec2 {
        math::forward(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Per-actor gameplay logic, run after the actor's components.
///
/// Replaces subclass hooks: a ship, an asteroid and a laser are plain actors
/// with different behaviors.
pub trait Behavior {
    fn update_actor(&mut self, _actor: &mut Actor, _ctx: &mut EngineContext, _dt: f32) {}

    fn actor_input(&mut self, _actor: &mut Actor, _keys: &KeyboardState, _ctx: &mut EngineContext) {}
}

/// Change to an actor's set of drawable components, waiting to be mirrored
/// into the game's draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpriteChange {
    Added { component: ComponentId, draw_order: i32 },
    Removed { component: ComponentId },
}

struct Slot {
    id: ComponentId,
    order: i32,
    component: Box<dyn Component>,
}

/// A positioned game object composed of components.
pub struct Actor {
    id: ActorId,
    /// String tag for finding actors by name.
    pub tag: String,
    state: ActorState,
    pub transform: Transform,
    world: Affine2,
    /// Sorted by update order; ties keep attach order.
    components: Vec<Slot>,
    next_component: u32,
    behavior: Option<Box<dyn Behavior>>,
    sprite_changes: Vec<SpriteChange>,
}

impl Actor {
    /// Create an active actor at the origin. The id is assigned on registration.
    pub fn new() -> Self {
        Self {
            id: ActorId::UNASSIGNED,
            tag: String::new(),
            state: ActorState::Active,
            transform: Transform::default(),
            world: Affine2::IDENTITY,
            components: Vec::new(),
            next_component: 1,
            behavior: None,
            sprite_changes: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_component(mut self, component: impl Component) -> Self {
        self.add_component(component);
        self
    }

    // -- Identity and lifecycle --

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ActorId) {
        self.id = id;
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Setting `Dead` only marks the actor; the game destroys it at the next sweep.
    pub fn set_state(&mut self, state: ActorState) {
        self.state = state;
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    // -- Transform --

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = rotation;
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
    }

    pub fn forward(&self) -> Vec2 {
        self.transform.forward()
    }

    /// World transform as of the end of the last update.
    pub fn world_transform(&self) -> Affine2 {
        self.world
    }

    pub fn compute_world_transform(&mut self) {
        let t = &self.transform;
        self.world = Affine2::from_scale_angle_translation(Vec2::splat(t.scale), t.rotation, t.position);
    }

    // -- Components --

    /// Attach a component after every component whose update order is less
    /// than or equal to its own.
    ///
    /// Drawable components attached to an actor that is already owned by a
    /// game reach the draw list through `Game::add_component` or at the end of
    /// the current pass.
    pub fn add_component(&mut self, component: impl Component) -> ComponentId {
        self.attach(Box::new(component))
    }

    pub fn add_boxed_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        self.attach(component)
    }

    fn attach(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId(self.next_component);
        self.next_component += 1;

        let order = component.update_order();
        if let Some(draw_order) = component.draw_order() {
            self.sprite_changes.push(SpriteChange::Added { component: id, draw_order });
        }

        let idx = self.components.partition_point(|s| s.order <= order);
        self.components.insert(idx, Slot { id, order, component });
        id
    }

    /// Detach a component. Returns `None` if it isn't attached.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let idx = self.components.iter().position(|s| s.id == id)?;
        let slot = self.components.remove(idx);
        if slot.component.draw_order().is_some() {
            self.sprite_changes.push(SpriteChange::Removed { component: id });
        }
        Some(slot.component)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Components in update order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &dyn Component)> {
        self.components.iter().map(|s| (s.id, s.component.as_ref()))
    }

    /// Update orders in iteration order.
    pub fn update_orders(&self) -> Vec<i32> {
        self.components.iter().map(|s| s.order).collect()
    }

    /// Attached drawable components and their draw orders, in update order.
    pub fn drawables(&self) -> Vec<(ComponentId, i32)> {
        self.components
            .iter()
            .filter_map(|s| s.component.draw_order().map(|order| (s.id, order)))
            .collect()
    }

    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.components
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.component.as_any().downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.component.as_any_mut().downcast_mut::<T>())
    }

    /// First attached component of type `T`.
    pub fn find_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|s| s.component.as_any().downcast_ref::<T>())
    }

    pub fn find_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|s| s.component.as_any_mut().downcast_mut::<T>())
    }

    /// Draw one component with this actor's transform. Returns false if the
    /// component is gone.
    pub fn draw_component(&self, id: ComponentId, renderer: &mut dyn Renderer) -> bool {
        match self.components.iter().find(|s| s.id == id) {
            Some(slot) => {
                slot.component.draw(&self.transform, renderer);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_sprite_changes(&mut self) -> Vec<SpriteChange> {
        std::mem::take(&mut self.sprite_changes)
    }

    // -- Per-frame --

    /// Update components in order, then the behavior, then the world transform.
    /// Does nothing unless the actor is active.
    pub fn update(&mut self, dt: f32, ctx: &mut EngineContext) {
        if self.state != ActorState::Active {
            return;
        }

        for slot in &mut self.components {
            slot.component.update(&mut self.transform, dt);
        }

        if let Some(mut behavior) = self.behavior.take() {
            behavior.update_actor(self, ctx, dt);
            self.behavior.get_or_insert(behavior);
        }

        self.compute_world_transform();
    }

    /// Forward key state to components, then the behavior.
    /// Does nothing unless the actor is active.
    pub fn process_input(&mut self, keys: &KeyboardState, ctx: &mut EngineContext) {
        if self.state != ActorState::Active {
            return;
        }

        for slot in &mut self.components {
            slot.component.process_input(keys);
        }

        if let Some(mut behavior) = self.behavior.take() {
            behavior.actor_input(self, keys, ctx);
            self.behavior.get_or_insert(behavior);
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("state", &self.state)
            .field("transform", &self.transform)
            .field("components", &self.update_orders())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records its tag into a shared log whenever it updates.
    struct Recorder {
        order: i32,
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Component for Recorder {
        fn update_order(&self) -> i32 {
            self.order
        }

        fn update(&mut self, _owner: &mut Transform, _dt: f32) {
            self.log.borrow_mut().push(self.tag);
        }

        fn process_input(&mut self, _keys: &KeyboardState) {
            self.log.borrow_mut().push(self.tag);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Drawable(i32);

    impl Component for Drawable {
        fn draw_order(&self) -> Option<i32> {
            Some(self.0)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct LogBehavior(Rc<RefCell<Vec<&'static str>>>);

    impl Behavior for LogBehavior {
        fn update_actor(&mut self, _actor: &mut Actor, _ctx: &mut EngineContext, _dt: f32) {
            self.0.borrow_mut().push("behavior");
        }

        fn actor_input(&mut self, _actor: &mut Actor, _keys: &KeyboardState, _ctx: &mut EngineContext) {
            self.0.borrow_mut().push("input");
        }
    }

    fn recorder(order: i32, tag: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Recorder {
        Recorder { order, tag, log: log.clone() }
    }

    #[test]
    fn components_stay_sorted_by_update_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        for (order, tag) in [(100, "a"), (10, "b"), (50, "c"), (10, "d"), (200, "e"), (0, "f")] {
            actor.add_component(recorder(order, tag, &log));
            let orders = actor.update_orders();
            assert!(orders.windows(2).all(|w| w[0] <= w[1]), "{orders:?}");
        }
        assert_eq!(actor.update_orders(), vec![0, 10, 10, 50, 100, 200]);
    }

    #[test]
    fn update_runs_components_in_order_then_behavior() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new()
            .with_component(recorder(100, "late", &log))
            .with_component(recorder(10, "early", &log))
            .with_component(recorder(10, "early-tie", &log))
            .with_behavior(LogBehavior(log.clone()));

        let mut ctx = EngineContext::new(1);
        actor.update(0.016, &mut ctx);
        assert_eq!(*log.borrow(), vec!["early", "early-tie", "late", "behavior"]);
    }

    #[test]
    fn inactive_actor_skips_update_and_input() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new()
            .with_component(recorder(100, "c", &log))
            .with_behavior(LogBehavior(log.clone()));
        let mut ctx = EngineContext::new(1);
        let keys = KeyboardState::new();

        actor.set_state(ActorState::Paused);
        actor.update(0.016, &mut ctx);
        actor.process_input(&keys, &mut ctx);
        actor.set_state(ActorState::Dead);
        actor.update(0.016, &mut ctx);
        assert!(log.borrow().is_empty());

        actor.set_state(ActorState::Active);
        actor.process_input(&keys, &mut ctx);
        assert_eq!(*log.borrow(), vec!["c", "input"]);
    }

    #[test]
    fn behavior_survives_update() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new().with_behavior(LogBehavior(log.clone()));
        let mut ctx = EngineContext::new(1);
        actor.update(0.016, &mut ctx);
        actor.update(0.016, &mut ctx);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn typed_component_access() {
        let mut actor = Actor::new();
        let id = actor.add_component(Drawable(5));
        assert_eq!(actor.component::<Drawable>(id).map(|d| d.0), Some(5));
        actor.component_mut::<Drawable>(id).unwrap().0 = 7;
        assert_eq!(actor.find_component::<Drawable>().map(|d| d.0), Some(7));
        assert!(actor.find_component::<Recorder>().is_none());
    }

    #[test]
    fn sprite_changes_track_drawables_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        actor.add_component(recorder(100, "x", &log));
        let sprite = actor.add_component(Drawable(20));
        assert!(actor.remove_component(sprite).is_some());
        assert!(actor.remove_component(sprite).is_none());

        assert_eq!(
            actor.take_sprite_changes(),
            vec![
                SpriteChange::Added { component: sprite, draw_order: 20 },
                SpriteChange::Removed { component: sprite },
            ]
        );
        assert!(actor.take_sprite_changes().is_empty());
    }

    #[test]
    fn drawables_list_current_sprites() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        let a = actor.add_component(Drawable(30));
        actor.add_component(recorder(10, "x", &log));
        let b = actor.add_component(Drawable(5));
        actor.take_sprite_changes();
        assert_eq!(actor.drawables(), vec![(a, 30), (b, 5)]);

        actor.remove_component(a);
        assert_eq!(actor.drawables(), vec![(b, 5)]);
    }

    #[test]
    fn world_transform_follows_update() {
        let mut actor = Actor::new().with_position(Vec2::new(10.0, 20.0)).with_scale(2.0);
        let mut ctx = EngineContext::new(1);
        actor.update(0.0, &mut ctx);
        let p = actor.world_transform().transform_point2(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(12.0, 20.0)).length() < 1e-5);
    }
}
