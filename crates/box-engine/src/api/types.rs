use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity is for. Roles only pick call-sites and collision checks;
/// every role shares the same box data and physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Ground,
    Enemy,
}

impl Role {
    /// Numeric tag written into render instances.
    pub fn as_f32(self) -> f32 {
        match self {
            Role::Player => 0.0,
            Role::Ground => 1.0,
            Role::Enemy => 2.0,
        }
    }
}

/// A game event communicated from Rust to the JS host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn roles_have_distinct_tags() {
        assert_ne!(Role::Player.as_f32(), Role::Ground.as_f32());
        assert_ne!(Role::Ground.as_f32(), Role::Enemy.as_f32());
    }
}
