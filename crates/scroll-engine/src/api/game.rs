use log::{debug, error, info, warn};

use crate::api::config::GameConfig;
use crate::api::context::EngineContext;
use crate::api::error::GameError;
use crate::api::types::{ActorId, ActorState, ComponentId, SpriteHandle};
use crate::components::actor::{Actor, SpriteChange};
use crate::components::Component;
use crate::core::random::Random;
use crate::core::scene::Scene;
use crate::core::time::FrameTimer;
use crate::input::queue::InputEvent;
use crate::platform::{Platform, RendererHandle, WindowHandle};
use crate::renderer::draw_list::DrawList;
use crate::renderer::traits::Texture;
use crate::systems::render::draw_sprites;

/// Lifecycle of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotInitialized,
    Running,
    ShuttingDown,
}

/// Populates a game with its initial actors. Called once from `Game::initialize`,
/// after the window and renderer exist.
pub trait Level<P: Platform> {
    fn load(&mut self, game: &mut Game<P>) -> Result<(), GameError>;
}

/// Owns the platform, the actors and the draw list, and runs the frame loop.
pub struct Game<P: Platform> {
    platform: P,
    config: GameConfig,
    state: GameState,
    running: bool,
    scene: Scene,
    sprites: DrawList,
    ctx: EngineContext,
    timer: FrameTimer,
    window: Option<WindowHandle>,
    renderer: Option<RendererHandle>,
    frames: u64,
}

impl<P: Platform> Game<P> {
    pub fn new(platform: P, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Random::new(seed),
            None => Random::from_entropy(),
        };
        Self {
            platform,
            timer: FrameTimer::new(config.min_frame_millis, config.max_delta),
            config,
            state: GameState::NotInitialized,
            running: false,
            scene: Scene::new(),
            sprites: DrawList::new(),
            ctx: EngineContext::with_rng(rng),
            window: None,
            renderer: None,
            frames: 0,
        }
    }

    // -- Lifecycle --

    /// Create the window and renderer, then load `level`.
    ///
    /// On failure everything acquired so far is released, the error is logged
    /// and the game stays `NotInitialized`.
    pub fn initialize(&mut self, level: &mut dyn Level<P>) -> Result<(), GameError> {
        match self.state {
            GameState::NotInitialized => {}
            GameState::Running => {
                warn!("initialize called on a running game");
                return Ok(());
            }
            GameState::ShuttingDown => return Err(GameError::ShutDown),
        }

        if let Err(e) = self.try_initialize(level) {
            error!("failed to initialize: {}", e);
            self.release();
            return Err(e);
        }

        self.timer.reset(&mut self.platform);
        self.state = GameState::Running;
        self.running = true;
        info!(
            "initialized '{}' ({}x{}) with {} actors",
            self.config.title,
            self.config.screen_width,
            self.config.screen_height,
            self.scene.len() + self.scene.pending_len()
        );
        Ok(())
    }

    fn try_initialize(&mut self, level: &mut dyn Level<P>) -> Result<(), GameError> {
        let window = self.platform.create_window(
            &self.config.title,
            self.config.window_x,
            self.config.window_y,
            self.config.screen_width,
            self.config.screen_height,
        )?;
        self.window = Some(window);

        let renderer = self
            .platform
            .create_renderer(window, self.config.renderer_flags())?;
        self.renderer = Some(renderer);

        level.load(self)
    }

    /// Pump frames until a quit is observed.
    pub fn run_loop(&mut self) -> Result<(), GameError> {
        let start = self.frames;
        while self.run_frame()? {}
        info!("loop ended after {} frames", self.frames - start);
        Ok(())
    }

    /// Run one `process_input → update_game → generate_output` iteration.
    /// Returns whether the game is still running afterwards.
    pub fn run_frame(&mut self) -> Result<bool, GameError> {
        match self.state {
            GameState::NotInitialized => return Err(GameError::NotInitialized),
            GameState::ShuttingDown => return Ok(false),
            GameState::Running => {}
        }

        self.process_input();
        self.update_game();
        self.generate_output();
        self.frames += 1;

        if !self.running {
            self.state = GameState::ShuttingDown;
        }
        Ok(self.running)
    }

    /// Ask the loop to stop after the current frame.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Destroy every actor and texture, then the renderer and the window.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::ShuttingDown;
        }
        self.running = false;
        self.release();
    }

    fn release(&mut self) {
        let actors = self.scene.clear();
        self.sprites.clear();
        self.ctx.take_spawned();
        self.ctx.take_doomed();
        self.ctx.textures.unload(&mut self.platform);

        let had_renderer = self.renderer.is_some();
        if let Some(renderer) = self.renderer.take() {
            self.platform.destroy_renderer(renderer);
        }
        if let Some(window) = self.window.take() {
            self.platform.destroy_window(window);
        }
        if had_renderer || !actors.is_empty() {
            info!("shut down: destroyed {} actors", actors.len());
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    // -- Frame steps --

    fn process_input(&mut self) {
        for event in self.platform.poll_events() {
            if matches!(event, InputEvent::Quit) {
                self.running = false;
            }
        }

        let keys = self.platform.keyboard_state();
        if keys.is_pressed(self.config.quit_key) {
            self.running = false;
        }

        self.run_pass(|actor, ctx| actor.process_input(&keys, ctx));
    }

    fn update_game(&mut self) {
        let dt = self.timer.tick(&mut self.platform);

        self.run_pass(|actor, ctx| actor.update(dt, ctx));

        let added = self.scene.reconcile();
        let dead = self.scene.take_dead();
        for actor in &dead {
            self.sprites.remove_actor(actor.id());
        }
        if added > 0 || !dead.is_empty() {
            debug!(
                "frame {}: {} actors added, {} destroyed, {} live",
                self.frames,
                added,
                dead.len(),
                self.scene.len()
            );
        }
    }

    fn generate_output(&mut self) {
        self.platform.set_draw_color(self.config.clear_color);
        self.platform.clear();
        draw_sprites(&self.sprites, &self.scene, &mut self.platform);
        self.platform.present();
    }

    /// Visit every live actor with structural changes staged: spawns land in
    /// the pending list and destroys only mark actors dead.
    fn run_pass(&mut self, mut visit: impl FnMut(&mut Actor, &mut EngineContext)) {
        self.scene.begin_update();

        for actor in self.scene.iter_mut() {
            if self.ctx.is_doomed(actor.id()) {
                actor.set_state(ActorState::Dead);
            }
            visit(actor, &mut self.ctx);
        }

        for mut actor in self.ctx.take_spawned() {
            register_sprites(&mut self.sprites, &mut actor);
            self.scene.add(actor);
        }
        for id in self.ctx.take_doomed() {
            if !self.scene.kill(id) {
                warn!("destroy requested for unknown actor {:?}", id);
            }
        }

        self.scene.end_update();

        for actor in self.scene.iter_all_mut() {
            sync_sprites(&mut self.sprites, actor);
        }
    }

    // -- Actors --

    /// Register an actor and its sprites. Assigns an id if it has none.
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        if !actor.id().is_assigned() {
            actor.set_id(self.ctx.next_id());
        }
        let id = actor.id();
        register_sprites(&mut self.sprites, &mut actor);
        self.scene.add(actor);
        id
    }

    /// Remove an actor and deregister its sprites. Unknown ids are a no-op.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.scene.remove(id)?;
        self.sprites.remove_actor(id);
        Some(actor)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.scene.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.scene.get_mut(id)
    }

    /// Live actors in registration order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.scene.iter()
    }

    pub fn actor_count(&self) -> usize {
        self.scene.len()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Attach a component to a registered actor, registering it in the draw
    /// list if it draws.
    pub fn add_component(&mut self, actor: ActorId, component: impl Component) -> Option<ComponentId> {
        let Some(owner) = self.scene.get_mut(actor) else {
            warn!("add_component: unknown actor {:?}", actor);
            return None;
        };
        let id = owner.add_component(component);
        sync_sprites(&mut self.sprites, owner);
        Some(id)
    }

    pub fn remove_component(&mut self, actor: ActorId, component: ComponentId) -> Option<Box<dyn Component>> {
        let owner = self.scene.get_mut(actor)?;
        let removed = owner.remove_component(component);
        sync_sprites(&mut self.sprites, owner);
        removed
    }

    // -- Sprites --

    pub fn add_sprite(&mut self, handle: SpriteHandle, draw_order: i32) {
        self.sprites.insert(handle, draw_order);
    }

    /// Returns whether the handle was registered.
    pub fn remove_sprite(&mut self, handle: SpriteHandle) -> bool {
        self.sprites.remove(handle)
    }

    pub fn sprites(&self) -> &DrawList {
        &self.sprites
    }

    // -- Resources --

    /// Cached texture for `path`, loading it on first use.
    pub fn texture(&mut self, path: &str) -> Option<Texture> {
        self.ctx.textures.get_or_load(path, &mut self.platform)
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Register every drawable component of an actor entering the scene. Changes
/// logged before registration are already reflected in its components.
fn register_sprites(sprites: &mut DrawList, actor: &mut Actor) {
    let owner = actor.id();
    actor.take_sprite_changes();
    sprites.remove_actor(owner);
    for (component, draw_order) in actor.drawables() {
        sprites.insert(SpriteHandle::new(owner, component), draw_order);
    }
}

/// Mirror a registered actor's drawable component changes into the draw list.
fn sync_sprites(sprites: &mut DrawList, actor: &mut Actor) {
    let owner = actor.id();
    for change in actor.take_sprite_changes() {
        match change {
            SpriteChange::Added { component, draw_order } => {
                sprites.insert(SpriteHandle::new(owner, component), draw_order);
            }
            SpriteChange::Removed { component } => {
                sprites.remove(SpriteHandle::new(owner, component));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::PlatformError;
    use crate::components::actor::Behavior;
    use crate::components::movement::MoveComponent;
    use crate::components::sprite::SpriteComponent;
    use crate::input::queue::{key, KeyboardState};
    use crate::platform::headless::{DrawCall, HeadlessPlatform};
    use crate::platform::Clock;
    use glam::Vec2;

    struct Empty;

    impl<P: Platform> Level<P> for Empty {
        fn load(&mut self, _game: &mut Game<P>) -> Result<(), GameError> {
            Ok(())
        }
    }

    /// Two actors: one sprite at draw order 10, then one at 5.
    struct TwoSprites {
        ids: Vec<ActorId>,
    }

    impl<P: Platform> Level<P> for TwoSprites {
        fn load(&mut self, game: &mut Game<P>) -> Result<(), GameError> {
            for (path, order) in [("Assets/Ship01.png", 10), ("Assets/Asteroid.png", 5)] {
                let texture = game.texture(path).ok_or_else(|| GameError::Load(path.into()))?;
                let actor = Actor::new().with_component(SpriteComponent::new(order).with_texture(texture));
                self.ids.push(game.add_actor(actor));
            }
            Ok(())
        }
    }

    struct Failing;

    impl<P: Platform> Level<P> for Failing {
        fn load(&mut self, game: &mut Game<P>) -> Result<(), GameError> {
            game.add_actor(Actor::new());
            Err(GameError::Load("missing level data".into()))
        }
    }

    /// Spawns one child on its first update and destroys `victim`.
    struct Spawner {
        victim: ActorId,
        fired: bool,
    }

    impl Behavior for Spawner {
        fn update_actor(&mut self, _actor: &mut Actor, ctx: &mut EngineContext, _dt: f32) {
            if self.fired {
                return;
            }
            self.fired = true;
            ctx.spawn(
                Actor::new()
                    .with_tag("child")
                    .with_component(SpriteComponent::new(50)),
            );
            ctx.destroy(self.victim);
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        }
    }

    fn running_game(level: &mut dyn Level<HeadlessPlatform>) -> Game<HeadlessPlatform> {
        let mut game = Game::new(HeadlessPlatform::new(), config());
        game.initialize(level).unwrap();
        game
    }

    #[test]
    fn sprites_draw_in_order_and_leave_with_their_actor() {
        let mut level = TwoSprites { ids: Vec::new() };
        let mut game = running_game(&mut level);
        assert_eq!(game.sprites().orders(), vec![5, 10]);

        game.run_frame().unwrap();
        let textures: Vec<_> = game.platform().last_frame_draws().into_iter().map(|(t, _, _)| t).collect();
        let asteroid = game.platform().loaded_texture("Assets/Asteroid.png").unwrap().id;
        let ship = game.platform().loaded_texture("Assets/Ship01.png").unwrap().id;
        assert_eq!(textures, vec![asteroid, ship]);

        // The first sprite drawn belongs to the draw-order-5 actor.
        game.actor_mut(level.ids[1]).unwrap().set_state(ActorState::Dead);
        game.run_frame().unwrap();
        assert_eq!(game.sprites().orders(), vec![10]);
        assert!(game.actor(level.ids[1]).is_none());
        let drawn: Vec<_> = game.platform().last_frame_draws().into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(drawn, vec![ship]);
        assert_eq!(game.actor_count(), 1);
    }

    #[test]
    fn frame_clears_draws_then_presents() {
        let mut game = running_game(&mut TwoSprites { ids: Vec::new() });
        game.platform_mut().take_calls();
        game.run_frame().unwrap();
        let calls = game.platform().calls();
        assert_eq!(calls.first(), Some(&DrawCall::Clear(game.config().clear_color)));
        assert_eq!(calls.last(), Some(&DrawCall::Present));
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn spawn_and_destroy_during_update_are_staged() {
        let mut game = running_game(&mut Empty);
        let victim = game.add_actor(Actor::new().with_component(SpriteComponent::new(20)));
        game.add_actor(Actor::new().with_behavior(Spawner { victim, fired: false }));
        assert_eq!(game.sprites().len(), 1);

        game.run_frame().unwrap();
        assert!(game.actor(victim).is_none());
        assert_eq!(game.actor_count(), 2);
        let child = game.scene().find_by_tag("child").unwrap().id();
        assert_eq!(game.sprites().orders(), vec![50]);
        assert!(game.sprites().contains(SpriteHandle::new(child, ComponentId(1))));
    }

    #[test]
    fn remove_actor_is_idempotent() {
        let mut game = running_game(&mut Empty);
        let id = game.add_actor(Actor::new().with_component(SpriteComponent::new(3)));
        assert!(game.remove_actor(id).is_some());
        assert!(game.remove_actor(id).is_none());
        assert!(game.sprites().is_empty());
    }

    #[test]
    fn removed_actor_can_be_added_back_with_its_sprites() {
        let mut game = running_game(&mut Empty);
        let texture = game.texture("Assets/Ship01.png").unwrap();
        let id = game.add_actor(Actor::new().with_component(SpriteComponent::new(10).with_texture(texture)));

        let actor = game.remove_actor(id).unwrap();
        assert!(game.sprites().is_empty());
        assert_eq!(game.add_actor(actor), id);
        game.run_frame().unwrap();

        assert_eq!(game.actor_count(), 1);
        assert_eq!(game.sprites().orders(), vec![10]);
        assert_eq!(game.platform().last_frame_draws().len(), 1);
    }

    #[test]
    fn removed_actor_can_be_respawned_through_the_context() {
        let mut game = running_game(&mut Empty);
        let id = game.add_actor(
            Actor::new()
                .with_component(SpriteComponent::new(10))
                .with_component(SpriteComponent::new(20)),
        );
        let actor = game.remove_actor(id).unwrap();
        game.context_mut().spawn(actor);
        game.run_frame().unwrap();

        assert!(game.actor(id).is_some());
        assert_eq!(game.sprites().orders(), vec![10, 20]);
    }

    #[test]
    fn remove_sprite_erases_once() {
        let mut game = running_game(&mut Empty);
        let handle = SpriteHandle::new(ActorId(9), ComponentId(1));
        game.add_sprite(handle, 4);
        assert!(game.remove_sprite(handle));
        assert!(!game.remove_sprite(handle));
        assert!(game.sprites().is_empty());
    }

    #[test]
    fn components_added_later_reach_the_draw_list() {
        let mut game = running_game(&mut Empty);
        let id = game.add_actor(Actor::new());
        let sprite = game.add_component(id, SpriteComponent::new(7)).unwrap();
        game.add_component(id, MoveComponent::new());
        assert_eq!(game.sprites().orders(), vec![7]);

        assert!(game.remove_component(id, sprite).is_some());
        assert!(game.sprites().is_empty());
        assert!(game.add_component(ActorId(99), SpriteComponent::new(1)).is_none());
    }

    #[test]
    fn window_failure_leaves_game_uninitialized() {
        let mut game = Game::new(HeadlessPlatform::new().fail_window("no display"), config());
        let err = game.initialize(&mut Empty).unwrap_err();
        assert!(matches!(err, GameError::Initialization(PlatformError::Window(_))));
        assert_eq!(game.state(), GameState::NotInitialized);
        assert!(matches!(game.run_loop(), Err(GameError::NotInitialized)));
    }

    #[test]
    fn renderer_failure_closes_the_window() {
        let mut game = Game::new(HeadlessPlatform::new().fail_renderer("no gpu"), config());
        assert!(game.initialize(&mut Empty).is_err());
        assert!(!game.platform().window_open());
    }

    #[test]
    fn level_failure_releases_everything() {
        let mut game = Game::new(HeadlessPlatform::new(), config());
        assert!(matches!(game.initialize(&mut Failing), Err(GameError::Load(_))));
        assert_eq!(game.state(), GameState::NotInitialized);
        assert_eq!(game.actor_count(), 0);
        assert!(!game.platform().window_open());
        assert!(!game.platform().renderer_open());
    }

    #[test]
    fn run_loop_before_initialize_touches_nothing() {
        let mut game = Game::new(HeadlessPlatform::new(), config());
        assert!(matches!(game.run_loop(), Err(GameError::NotInitialized)));
        assert!(game.platform().calls().is_empty());
        assert_eq!(game.frame_count(), 0);
    }

    #[test]
    fn quit_event_ends_loop() {
        let mut game = Game::new(HeadlessPlatform::new().quit_after_frames(3), config());
        game.initialize(&mut Empty).unwrap();
        game.run_loop().unwrap();
        assert_eq!(game.state(), GameState::ShuttingDown);
        assert_eq!(game.frame_count(), 4);
        assert!(!game.run_frame().unwrap());
    }

    #[test]
    fn held_quit_key_ends_loop() {
        let mut game = running_game(&mut Empty);
        assert!(game.run_frame().unwrap());
        game.platform_mut().press(key::ESCAPE);
        assert!(!game.run_frame().unwrap());
        assert!(!game.is_running());
    }

    #[test]
    fn quit_stops_after_the_current_frame() {
        let mut game = running_game(&mut Empty);
        game.quit();
        assert!(!game.run_frame().unwrap());
        assert_eq!(game.platform().frames_presented(), 1);
    }

    #[test]
    fn frames_are_governed_and_clamped() {
        let mut game = running_game(&mut Empty);
        let id = game.add_actor(Actor::new().with_component(MoveComponent::new().with_forward_speed(100.0)));
        let start = game.platform_mut().now_millis();
        game.run_frame().unwrap();
        assert_eq!(game.platform_mut().now_millis() - start, 16);
        assert!((game.actor(id).unwrap().position().x - 1.6).abs() < 1e-4);

        game.platform_mut().advance(1000);
        game.run_frame().unwrap();
        assert!((game.actor(id).unwrap().position().x - 6.6).abs() < 1e-4);
    }

    #[test]
    fn input_reaches_actors() {
        struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<bool>>>);

        impl Behavior for Recorder {
            fn actor_input(&mut self, _actor: &mut Actor, keys: &KeyboardState, _ctx: &mut EngineContext) {
                self.0.borrow_mut().push(keys.is_pressed(key::SPACE));
            }
        }

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut game = running_game(&mut Empty);
        game.add_actor(Actor::new().with_behavior(Recorder(seen.clone())));
        game.run_frame().unwrap();
        game.platform_mut().press(key::SPACE);
        game.run_frame().unwrap();
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn shutdown_tears_down_and_is_idempotent() {
        let mut level = TwoSprites { ids: Vec::new() };
        let mut game = running_game(&mut level);
        let textures = game.context().textures.len();
        game.shutdown();
        assert_eq!(game.actor_count(), 0);
        assert!(game.sprites().is_empty());
        assert_eq!(game.platform().destroyed_textures().len(), textures);
        assert!(!game.platform().window_open());
        assert!(!game.platform().renderer_open());

        game.shutdown();
        assert_eq!(game.platform().destroyed_textures().len(), textures);
        assert_eq!(game.state(), GameState::ShuttingDown);
    }

    #[test]
    fn initialize_after_shutdown_is_an_error() {
        let mut game = running_game(&mut Empty);
        assert!(game.initialize(&mut Empty).is_ok());
        game.shutdown();
        assert!(matches!(game.initialize(&mut Empty), Err(GameError::ShutDown)));
        assert!(!game.platform().window_open());
    }

    #[test]
    fn stale_handles_are_skipped() {
        let mut game = running_game(&mut Empty);
        game.add_sprite(SpriteHandle::new(ActorId(42), ComponentId(1)), 1);
        game.run_frame().unwrap();
        assert!(game.platform().last_frame_draws().is_empty());
        assert_eq!(game.platform().frames_presented(), 1);
    }

    #[test]
    fn texture_loads_once() {
        let mut game = running_game(&mut Empty);
        let a = game.texture("Assets/Laser.png");
        let b = game.texture("Assets/Laser.png");
        assert_eq!(a, b);
        assert_eq!(game.platform().load_count(), 1);
        assert_eq!(game.context().texture("Assets/Laser.png"), a);
    }

    #[test]
    fn spawns_get_positions_from_seeded_rng() {
        let mut a = running_game(&mut Empty);
        let mut b = running_game(&mut Empty);
        let pa = a.context_mut().rng.vector(Vec2::ZERO, Vec2::new(1024.0, 768.0));
        let pb = b.context_mut().rng.vector(Vec2::ZERO, Vec2::new(1024.0, 768.0));
        assert_eq!(pa, pb);
    }
}
