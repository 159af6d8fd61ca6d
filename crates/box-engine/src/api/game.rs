use serde::Deserialize;

use crate::api::error::EngineError;
use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::{BoxDesc, Entity};
use crate::core::physics::{self, PhysicsConfig};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::systems::rng::Rng;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60). Physics rates are per step.
    pub fixed_dt: f32,
    /// Maximum number of box instances handed to the renderer (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_instances: 512,
            max_events: 32,
            physics: PhysicsConfig::default(),
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and spawn entities into a fresh context.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// Advance one fixed frame. `input` holds the events received since the last frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Whether the runner should keep stepping frames.
    fn is_running(&self) -> bool {
        true
    }

    /// Apply game-specific settings from JSON. Takes effect on the next init.
    fn load_settings(&mut self, _json: &str) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    pub physics: PhysicsConfig,
    next_id: u32,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self::with_physics(seed, PhysicsConfig::default())
    }

    pub fn with_physics(seed: u64, physics: PhysicsConfig) -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            rng: Rng::new(seed),
            physics,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Validate `desc`, give it an id and append it to the scene.
    pub fn spawn(&mut self, desc: &BoxDesc) -> Result<EntityId, EngineError> {
        let id = self.next_id();
        let entity = Entity::from_desc(id, desc)?;
        self.scene.spawn(entity);
        Ok(id)
    }

    /// Look up an entity that must exist.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, EngineError> {
        self.scene.get(id).ok_or(EngineError::MissingEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EngineError> {
        self.scene.get_mut(id).ok_or(EngineError::MissingEntity(id))
    }

    /// Step one entity's physics against `ground`.
    pub fn step(&mut self, id: EntityId, ground: &Entity) -> Result<(), EngineError> {
        let config = self.physics;
        let entity = self.entity_mut(id)?;
        physics::step(entity, ground, &config);
        Ok(())
    }

    /// Emit a game event to be forwarded to JS.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(42)
    }
}
