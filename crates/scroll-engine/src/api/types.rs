/// Unique identifier for an actor owned by the game.
/// Allocated by the engine context; `ActorId(0)` means "not yet registered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Placeholder id carried by actors that were never handed to a game.
    pub const UNASSIGNED: ActorId = ActorId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

/// Identifier of a component, unique within its owning actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

/// Addresses one sprite component in the game's draw list.
/// Resolved against the scene on every draw; a handle whose actor or
/// component is gone simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle {
    pub actor: ActorId,
    pub component: ComponentId,
}

impl SpriteHandle {
    pub fn new(actor: ActorId, component: ComponentId) -> Self {
        Self { actor, component }
    }
}

/// Lifecycle state of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    /// Updated and receives input every frame.
    #[default]
    Active,
    /// Kept alive but skipped by update and input.
    Paused,
    /// Destroyed at the next sweep.
    Dead,
}
