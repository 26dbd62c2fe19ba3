use crate::api::types::{ActorId, ActorState};
use crate::components::actor::Actor;

/// Actor storage with staged mutation.
///
/// Live actors sit in a flat Vec in registration order. While a pass is in
/// progress (`begin_update` .. `end_update`) additions go to a pending list and
/// removals of live actors only mark them dead, so the live Vec is never
/// resized under an iteration. `reconcile` and `take_dead` apply the staged
/// changes between passes.
pub struct Scene {
    actors: Vec<Actor>,
    pending: Vec<Actor>,
    updating: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            actors: Vec::with_capacity(256),
            pending: Vec::new(),
            updating: false,
        }
    }

    /// Add an actor: to the pending list during a pass, else to the live list.
    pub fn add(&mut self, actor: Actor) {
        if self.updating {
            self.pending.push(actor);
        } else {
            self.actors.push(actor);
        }
    }

    /// Remove an actor by id, searching pending first, then live.
    ///
    /// Unordered: the last actor takes the removed one's slot. During a pass a
    /// live actor is only marked dead and `None` is returned; the sweep removes it.
    /// Unknown ids are a no-op.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        if let Some(idx) = self.pending.iter().position(|a| a.id() == id) {
            return Some(self.pending.swap_remove(idx));
        }

        let idx = self.actors.iter().position(|a| a.id() == id)?;
        if self.updating {
            self.actors[idx].set_state(ActorState::Dead);
            None
        } else {
            Some(self.actors.swap_remove(idx))
        }
    }

    /// Mark an actor dead wherever it lives. Returns false if unknown.
    pub fn kill(&mut self, id: ActorId) -> bool {
        match self.get_mut(id) {
            Some(actor) => {
                actor.set_state(ActorState::Dead);
                true
            }
            None => false,
        }
    }

    /// Start a pass: structural changes are staged until `end_update`.
    pub fn begin_update(&mut self) {
        self.updating = true;
    }

    pub fn end_update(&mut self) {
        self.updating = false;
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Move pending actors to the end of the live list. Returns how many moved.
    pub fn reconcile(&mut self) -> usize {
        let count = self.pending.len();
        self.actors.append(&mut self.pending);
        count
    }

    /// Remove and return every dead live actor.
    pub fn take_dead(&mut self) -> Vec<Actor> {
        let dead: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|a| a.is_dead())
            .map(|a| a.id())
            .collect();
        dead.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Get an actor by id, live or pending.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors
            .iter()
            .chain(self.pending.iter())
            .find(|a| a.id() == id)
    }

    /// Get a mutable actor by id, live or pending.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|a| a.id() == id)
    }

    /// Iterate over live actors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Iterate over live actors mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Live then pending actors.
    pub fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut().chain(self.pending.iter_mut())
    }

    pub fn pending(&self) -> impl Iterator<Item = &Actor> {
        self.pending.iter()
    }

    /// Find the first live or pending actor with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Actor> {
        self.actors
            .iter()
            .chain(self.pending.iter())
            .find(|a| a.tag == tag)
    }

    /// Find all live or pending actors with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Actor> {
        self.actors
            .iter()
            .chain(self.pending.iter())
            .filter(|a| a.tag == tag)
            .collect()
    }

    /// Number of live actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether there are no live or pending actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.pending.is_empty()
    }

    /// Drop all actors, pending ones first.
    pub fn clear(&mut self) -> Vec<Actor> {
        let mut all = std::mem::take(&mut self.pending);
        all.append(&mut self.actors);
        all
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
