use crate::api::types::EntityId;

/// Errors raised by the engine. Game-over is a game state, never an error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("box dimensions must be positive and finite, got {width}x{height}x{depth}")]
    InvalidDimensions { width: f32, height: f32, depth: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} {reason}")]
    InvalidSetting { field: &'static str, reason: &'static str },

    #[error("entity {0} is not in the scene")]
    MissingEntity(EntityId),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
