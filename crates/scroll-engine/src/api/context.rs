use crate::api::types::ActorId;
use crate::assets::textures::TextureCache;
use crate::components::actor::Actor;
use crate::core::random::Random;
use crate::renderer::traits::Texture;

/// Mutable engine state handed to actors during a pass.
///
/// Spawns and destroys requested here are staged; the game applies them once
/// the pass over the live actors has finished.
pub struct EngineContext {
    pub rng: Random,
    pub textures: TextureCache,
    spawned: Vec<Actor>,
    doomed: Vec<ActorId>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Random::new(seed))
    }

    pub fn with_rng(rng: Random) -> Self {
        Self {
            rng,
            textures: TextureCache::new(),
            spawned: Vec::new(),
            doomed: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique actor ID.
    pub fn next_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stage an actor for registration at the end of the current pass.
    pub fn spawn(&mut self, mut actor: Actor) -> ActorId {
        if !actor.id().is_assigned() {
            actor.set_id(self.next_id());
        }
        let id = actor.id();
        self.spawned.push(actor);
        id
    }

    /// Request removal of an actor. It is marked dead before its next visit.
    pub fn destroy(&mut self, id: ActorId) {
        if let Some(idx) = self.spawned.iter().position(|a| a.id() == id) {
            self.spawned.swap_remove(idx);
            return;
        }
        if !self.doomed.contains(&id) {
            self.doomed.push(id);
        }
    }

    pub fn is_doomed(&self, id: ActorId) -> bool {
        self.doomed.contains(&id)
    }

    /// Actors spawned this pass and not yet handed to the scene.
    pub fn spawned(&self) -> &[Actor] {
        &self.spawned
    }

    /// Already-loaded texture for `path`. Loading goes through `Game::texture`.
    pub fn texture(&self, path: &str) -> Option<Texture> {
        self.textures.get(path)
    }

    pub(crate) fn take_spawned(&mut self) -> Vec<Actor> {
        std::mem::take(&mut self.spawned)
    }

    pub(crate) fn take_doomed(&mut self) -> Vec<ActorId> {
        std::mem::take(&mut self.doomed)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::with_rng(Random::default())
    }
}
