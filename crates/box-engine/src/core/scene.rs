use crate::api::types::{EntityId, Role};
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// Insertion order is kept, so entities of one role form an ordered roster.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Append an entity. Appended entities are visible to the renderer next frame.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove every entity for which `keep` returns false, keeping the order of
    /// the rest. Returns how many went.
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(keep);
        before - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities with the given role, in spawn order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.role == role)
    }

    pub fn with_role_mut(&mut self, role: Role) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut().filter(move |e| e.role == role)
    }

    /// First entity with the given role (mutable).
    pub fn first_with_role_mut(&mut self, role: Role) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.role == role)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.with_role(role).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
