//! Heading/speed integration, optionally driven by the keyboard.

use std::any::Any;

use crate::components::actor::Transform;
use crate::components::Component;
use crate::core::math::{near_zero, EPSILON};
use crate::input::queue::{key, KeyboardState};

/// Movement updates before the default order so sprites see the new transform.
pub const MOVE_UPDATE_ORDER: i32 = 10;

/// Rotates and translates its owner every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveComponent {
    update_order: i32,
    /// Radians per second.
    angular_speed: f32,
    /// Units per second along the owner's forward vector.
    forward_speed: f32,
}

impl MoveComponent {
    pub fn new() -> Self {
        Self {
            update_order: MOVE_UPDATE_ORDER,
            angular_speed: 0.0,
            forward_speed: 0.0,
        }
    }

    pub fn with_update_order(mut self, order: i32) -> Self {
        self.update_order = order;
        self
    }

    pub fn with_angular_speed(mut self, speed: f32) -> Self {
        self.angular_speed = speed;
        self
    }

    pub fn with_forward_speed(mut self, speed: f32) -> Self {
        self.forward_speed = speed;
        self
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    pub fn set_angular_speed(&mut self, speed: f32) {
        self.angular_speed = speed;
    }

    pub fn set_forward_speed(&mut self, speed: f32) {
        self.forward_speed = speed;
    }

    /// Rotate first, then move along the new heading.
    pub fn integrate(&self, owner: &mut Transform, dt: f32) {
        if !near_zero(self.angular_speed, EPSILON) {
            owner.rotation += self.angular_speed * dt;
        }
        if !near_zero(self.forward_speed, EPSILON) {
            owner.position += owner.forward() * self.forward_speed * dt;
        }
    }
}

impl Default for MoveComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MoveComponent {
    fn update_order(&self) -> i32 {
        self.update_order
    }

    fn update(&mut self, owner: &mut Transform, dt: f32) {
        self.integrate(owner, dt);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Four-key movement: speeds snap to their caps while a key is held.
#[derive(Debug, Clone, PartialEq)]
pub struct InputComponent {
    movement: MoveComponent,
    max_forward_speed: f32,
    max_angular_speed: f32,
    forward_key: u16,
    back_key: u16,
    clockwise_key: u16,
    counter_clockwise_key: u16,
}

impl InputComponent {
    /// W/S drive forward and back, D/A turn clockwise and counter-clockwise.
    pub fn new(max_forward_speed: f32, max_angular_speed: f32) -> Self {
        Self {
            movement: MoveComponent::new(),
            max_forward_speed,
            max_angular_speed,
            forward_key: key::W,
            back_key: key::S,
            clockwise_key: key::D,
            counter_clockwise_key: key::A,
        }
    }

    pub fn with_keys(mut self, forward: u16, back: u16, clockwise: u16, counter_clockwise: u16) -> Self {
        self.forward_key = forward;
        self.back_key = back;
        self.clockwise_key = clockwise;
        self.counter_clockwise_key = counter_clockwise;
        self
    }

    pub fn movement(&self) -> &MoveComponent {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut MoveComponent {
        &mut self.movement
    }

    pub fn max_forward_speed(&self) -> f32 {
        self.max_forward_speed
    }

    pub fn max_angular_speed(&self) -> f32 {
        self.max_angular_speed
    }

    pub fn set_max_forward_speed(&mut self, speed: f32) {
        self.max_forward_speed = speed;
    }

    pub fn set_max_angular_speed(&mut self, speed: f32) {
        self.max_angular_speed = speed;
    }

    pub fn forward_key(&self) -> u16 {
        self.forward_key
    }

    pub fn back_key(&self) -> u16 {
        self.back_key
    }

    pub fn clockwise_key(&self) -> u16 {
        self.clockwise_key
    }

    pub fn counter_clockwise_key(&self) -> u16 {
        self.counter_clockwise_key
    }

    pub fn set_forward_key(&mut self, key: u16) {
        self.forward_key = key;
    }

    pub fn set_back_key(&mut self, key: u16) {
        self.back_key = key;
    }

    pub fn set_clockwise_key(&mut self, key: u16) {
        self.clockwise_key = key;
    }

    pub fn set_counter_clockwise_key(&mut self, key: u16) {
        self.counter_clockwise_key = key;
    }
}

impl Component for InputComponent {
    fn update_order(&self) -> i32 {
        self.movement.update_order
    }

    fn update(&mut self, owner: &mut Transform, dt: f32) {
        self.movement.integrate(owner, dt);
    }

    /// Opposing keys cancel to zero.
    fn process_input(&mut self, keys: &KeyboardState) {
        let mut forward = 0.0;
        if keys.is_pressed(self.forward_key) {
            forward += self.max_forward_speed;
        }
        if keys.is_pressed(self.back_key) {
            forward -= self.max_forward_speed;
        }
        self.movement.set_forward_speed(forward);

        let mut angular = 0.0;
        if keys.is_pressed(self.counter_clockwise_key) {
            angular += self.max_angular_speed;
        }
        if keys.is_pressed(self.clockwise_key) {
            angular -= self.max_angular_speed;
        }
        self.movement.set_angular_speed(angular);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
