pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::error::EngineError;
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, Role};
pub use components::entity::{BoxDesc, Entity, DEFAULT_GRAVITY};
pub use components::mesh::{BoxColor, BoxMaterial};
pub use core::physics::PhysicsConfig;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{BoxInstance, RenderBuffer};
pub use input::queue::{keys, InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;
pub use systems::rng::Rng;
