use crate::api::types::{ActorId, SpriteHandle};

/// One registered sprite and the draw order it was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawEntry {
    pub handle: SpriteHandle,
    pub draw_order: i32,
}

/// Global back-to-front sprite order.
///
/// Always sorted ascending by `draw_order`. Sprites with equal draw order keep
/// their registration order, so a later registration draws on top.
#[derive(Debug, Default)]
pub struct DrawList {
    entries: Vec<DrawEntry>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
        }
    }

    /// Insert before the first entry with a strictly greater draw order.
    pub fn insert(&mut self, handle: SpriteHandle, draw_order: i32) {
        let idx = self.entries.partition_point(|e| e.draw_order <= draw_order);
        self.entries.insert(idx, DrawEntry { handle, draw_order });
    }

    /// Remove a sprite. Returns false if it was not registered.
    pub fn remove(&mut self, handle: SpriteHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every sprite owned by `actor`. Returns how many were removed.
    pub fn remove_actor(&mut self, actor: ActorId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle.actor != actor);
        before - self.entries.len()
    }

    pub fn contains(&self, handle: SpriteHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Iterate in draw order (back first).
    pub fn iter(&self) -> impl Iterator<Item = &DrawEntry> {
        self.entries.iter()
    }

    /// Draw orders in list order.
    pub fn orders(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.draw_order).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ComponentId;

    fn handle(actor: u32, component: u32) -> SpriteHandle {
        SpriteHandle::new(ActorId(actor), ComponentId(component))
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut list = DrawList::new();
        for (i, order) in [100, 10, 50, 150, 10, 75].into_iter().enumerate() {
            list.insert(handle(1, i as u32), order);
            let orders = list.orders();
            assert!(orders.windows(2).all(|w| w[0] <= w[1]), "{orders:?}");
        }
        assert_eq!(list.orders(), vec![10, 10, 50, 75, 100, 150]);
    }

    #[test]
    fn equal_orders_append_after_existing() {
        let mut list = DrawList::new();
        list.insert(handle(1, 0), 50);
        list.insert(handle(2, 0), 50);
        list.insert(handle(3, 0), 10);
        list.insert(handle(4, 0), 50);

        let actors: Vec<u32> = list.iter().map(|e| e.handle.actor.0).collect();
        assert_eq!(actors, vec![3, 1, 2, 4]);
    }

    #[test]
    fn remove_erases_registered_sprite() {
        let mut list = DrawList::new();
        list.insert(handle(1, 0), 10);
        list.insert(handle(2, 0), 20);

        // A stub remove that never erases would leave both entries behind.
        assert!(list.remove(handle(1, 0)));
        assert_eq!(list.len(), 1);
        assert!(!list.contains(handle(1, 0)));
        assert_eq!(list.orders(), vec![20]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut list = DrawList::new();
        list.insert(handle(1, 0), 10);
        assert!(list.remove(handle(1, 0)));
        assert!(!list.remove(handle(1, 0)));
        assert!(!list.remove(handle(9, 9)));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_actor_drops_all_its_sprites() {
        let mut list = DrawList::new();
        list.insert(handle(1, 0), 10);
        list.insert(handle(2, 0), 20);
        list.insert(handle(1, 1), 30);

        assert_eq!(list.remove_actor(ActorId(1)), 2);
        assert_eq!(list.orders(), vec![20]);
    }
}
