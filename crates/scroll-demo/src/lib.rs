//! Side-scrolling ship level for scroll-engine.
//!
//! A ship flies over two parallax star fields among drifting asteroids and
//! fires lasers with space.

use glam::Vec2;
use log::{debug, info};
use scroll_engine::core::math;
use scroll_engine::{
    key, Actor, AnimSpriteComponent, BGSpriteComponent, Behavior, EngineContext, Game, GameError,
    InputComponent, KeyboardState, Level, MoveComponent, Platform, SpriteComponent, Texture,
};

pub const SHIP_FRAMES: [&str; 4] = [
    "Assets/Ship01.png",
    "Assets/Ship02.png",
    "Assets/Ship03.png",
    "Assets/Ship04.png",
];
pub const FAR_BACK: [&str; 2] = ["Assets/Farback01.png", "Assets/Farback02.png"];
pub const STARS: &str = "Assets/Stars.png";
pub const LASER: &str = "Assets/Laser.png";
pub const ASTEROID: &str = "Assets/Asteroid.png";

pub const ASTEROID_COUNT: usize = 5;
pub const ASTEROID_SPEED: f32 = 150.0;

/// Seconds between two shots.
pub const LASER_COOLDOWN: f32 = 0.5;
/// Seconds a laser lives before it is destroyed.
pub const LASER_LIFETIME: f32 = 1.0;
pub const LASER_SPEED: f32 = 800.0;

/// Fires a laser along the ship's heading while space is held and the gun is cool.
pub struct Ship {
    cooldown: f32,
    laser: Option<Texture>,
    shots: u32,
}

impl Ship {
    pub fn new(laser: Option<Texture>) -> Self {
        Self {
            cooldown: 0.0,
            laser,
            shots: 0,
        }
    }
}

impl Behavior for Ship {
    fn update_actor(&mut self, _actor: &mut Actor, _ctx: &mut EngineContext, dt: f32) {
        self.cooldown -= dt;
    }

    fn actor_input(&mut self, actor: &mut Actor, keys: &KeyboardState, ctx: &mut EngineContext) {
        if !keys.is_pressed(key::SPACE) || self.cooldown > 0.0 {
            return;
        }
        self.cooldown = LASER_COOLDOWN;
        self.shots += 1;

        let mut sprite = SpriteComponent::default();
        if let Some(texture) = self.laser {
            sprite.set_texture(texture);
        }
        let id = ctx.spawn(
            Actor::new()
                .with_tag("laser")
                .with_position(actor.position())
                .with_rotation(actor.rotation())
                .with_component(sprite)
                .with_component(MoveComponent::new().with_forward_speed(LASER_SPEED))
                .with_behavior(Laser::new(LASER_LIFETIME)),
        );
        debug!("shot {} fired as actor {:?}", self.shots, id);
    }
}

/// Destroys its actor once its lifetime runs out.
pub struct Laser {
    remaining: f32,
}

impl Laser {
    pub fn new(lifetime: f32) -> Self {
        Self { remaining: lifetime }
    }
}

impl Behavior for Laser {
    fn update_actor(&mut self, actor: &mut Actor, ctx: &mut EngineContext, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            ctx.destroy(actor.id());
        }
    }
}

/// Wraps its actor to the opposite edge when it drifts off screen.
pub struct Asteroid {
    screen: Vec2,
}

impl Asteroid {
    pub fn new(screen: Vec2) -> Self {
        Self { screen }
    }

    /// A drifting asteroid at a random position and heading.
    pub fn spawn(ctx: &mut EngineContext, screen: Vec2) -> Actor {
        let position = ctx.rng.vector(Vec2::ZERO, screen);
        let heading = ctx.rng.float_range(0.0, math::TWO_PI);
        let mut sprite = SpriteComponent::new(150);
        if let Some(texture) = ctx.texture(ASTEROID) {
            sprite.set_texture(texture);
        }
        Actor::new()
            .with_tag("asteroid")
            .with_position(position)
            .with_rotation(heading)
            .with_component(sprite)
            .with_component(MoveComponent::new().with_forward_speed(ASTEROID_SPEED))
            .with_behavior(Asteroid::new(screen))
    }
}

impl Behavior for Asteroid {
    fn update_actor(&mut self, actor: &mut Actor, _ctx: &mut EngineContext, _dt: f32) {
        let mut p = actor.position();
        if p.x < 0.0 {
            p.x = self.screen.x - 2.0;
        } else if p.x > self.screen.x {
            p.x = 2.0;
        }
        if p.y < 0.0 {
            p.y = self.screen.y - 2.0;
        } else if p.y > self.screen.y {
            p.y = 2.0;
        }
        actor.set_position(p);
    }
}

/// The ship, a handful of asteroids, a far background scrolling at -100 and a star field at -200.
#[derive(Debug, Default)]
pub struct ShipLevel;

impl ShipLevel {
    fn textures<P: Platform>(game: &mut Game<P>, paths: &[&str]) -> Result<Vec<Texture>, GameError> {
        paths
            .iter()
            .map(|path| game.texture(path).ok_or_else(|| GameError::Load(format!("missing texture {}", path))))
            .collect()
    }
}

impl<P: Platform> Level<P> for ShipLevel {
    fn load(&mut self, game: &mut Game<P>) -> Result<(), GameError> {
        let screen = game.config().screen_size();

        let frames = Self::textures(game, &SHIP_FRAMES)?;
        let laser = game.texture(LASER);
        let ship = Actor::new()
            .with_tag("ship")
            .with_position(Vec2::new(100.0, 384.0))
            .with_scale(1.5)
            .with_component(AnimSpriteComponent::default().with_textures(frames))
            .with_component(InputComponent::new(300.0, math::TWO_PI / 3.0))
            .with_behavior(Ship::new(laser));
        game.add_actor(ship);

        let far = Self::textures(game, &FAR_BACK)?;
        let stars = Self::textures(game, &[STARS, STARS])?;
        let background = Actor::new()
            .with_tag("background")
            .with_position(screen / 2.0)
            .with_component(
                BGSpriteComponent::default()
                    .with_screen_size(screen)
                    .with_scroll_speed(-100.0)
                    .with_textures(&far),
            )
            .with_component(
                BGSpriteComponent::new(50)
                    .with_screen_size(screen)
                    .with_scroll_speed(-200.0)
                    .with_textures(&stars),
            );
        game.add_actor(background);

        if game.texture(ASTEROID).is_none() {
            return Err(GameError::Load(format!("missing texture {}", ASTEROID)));
        }
        for _ in 0..ASTEROID_COUNT {
            let asteroid = Asteroid::spawn(game.context_mut(), screen);
            game.add_actor(asteroid);
        }

        info!("ship level loaded with {} actors", game.actor_count());
        Ok(())
    }
}
