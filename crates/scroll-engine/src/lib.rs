pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod platform;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::context::EngineContext;
pub use api::error::{GameError, PlatformError};
pub use api::game::{Game, GameState, Level};
pub use api::types::{ActorId, ActorState, ComponentId, SpriteHandle};
pub use assets::textures::TextureCache;
pub use components::actor::{Actor, Behavior, Transform};
pub use components::animation::AnimSpriteComponent;
pub use components::background::{BGSpriteComponent, BgTexture};
pub use components::movement::{InputComponent, MoveComponent};
pub use components::sprite::SpriteComponent;
pub use components::Component;
pub use crate::core::random::Random;
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameTimer;
pub use input::queue::{key, InputEvent, InputQueue, KeyboardState};
pub use platform::headless::HeadlessPlatform;
pub use platform::Platform;
pub use renderer::draw_list::DrawList;
pub use renderer::traits::{Color, Rect, Renderer, Texture, TextureId};
