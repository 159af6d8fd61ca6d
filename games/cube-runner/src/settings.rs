use box_engine::{BoxDesc, EngineError, PhysicsConfig};
use glam::Vec3;
use serde::Deserialize;

use crate::controller::KeyBindings;
use crate::spawner::OffsetTarget;

/// Game tuning. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    pub track: TrackSettings,
    pub player: BodySettings,
    /// The single enemy present when a session starts.
    pub seed_enemy: BodySettings,
    /// Start the seed enemy at a random lateral offset instead of its configured x.
    pub seed_enemy_offset: bool,
    pub spawn: SpawnSettings,
    pub controls: ControlSettings,
    pub physics: PhysicsConfig,
    /// Player wins once `z <= -track.depth / 2 + finish_margin`.
    pub finish_margin: f32,
    /// When set, enemies more than this far behind the player (+z) are removed.
    pub despawn_margin: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Centre height of the track box.
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Frames between spawns.
    pub interval: u64,
    /// Spawn depth (far end of the track).
    pub z: f32,
    pub velocity: Vec3,
    /// Which enemy receives the random lateral offset.
    pub offset_target: OffsetTarget,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub move_speed: f32,
    pub jump_impulse: f32,
    /// Jumping is only possible below this height.
    pub jump_ceiling: f32,
    pub bindings: KeyBindings,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            track: TrackSettings::default(),
            player: BodySettings {
                position: Vec3::ZERO,
                velocity: Vec3::new(0.0, -0.01, 0.0),
            },
            seed_enemy: BodySettings {
                position: Vec3::new(0.0, 0.0, -20.0),
                velocity: Vec3::new(0.0, -0.01, 0.05),
            },
            seed_enemy_offset: true,
            spawn: SpawnSettings::default(),
            controls: ControlSettings::default(),
            physics: PhysicsConfig::default(),
            finish_margin: 4.0,
            despawn_margin: None,
        }
    }
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 0.5,
            depth: 50.0,
            y: -2.0,
        }
    }
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            interval: 20,
            z: -20.0,
            velocity: Vec3::new(0.0, -0.01, 0.02),
            offset_target: OffsetTarget::Spawned,
        }
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.04,
            jump_impulse: 0.07,
            jump_ceiling: 0.07,
            bindings: KeyBindings::default(),
        }
    }
}

impl RunnerSettings {
    /// Parse and validate settings JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn ground_desc(&self) -> BoxDesc {
        let t = &self.track;
        BoxDesc::ground(t.width, t.height, t.depth).with_position(Vec3::new(0.0, t.y, 0.0))
    }

    pub fn player_desc(&self) -> BoxDesc {
        BoxDesc::player()
            .with_position(self.player.position)
            .with_velocity(self.player.velocity)
    }

    pub fn seed_enemy_desc(&self) -> BoxDesc {
        BoxDesc::enemy()
            .with_position(self.seed_enemy.position)
            .with_velocity(self.seed_enemy.velocity)
    }

    /// A freshly spawned enemy before its lateral offset is applied.
    pub fn spawned_enemy_desc(&self) -> BoxDesc {
        BoxDesc::enemy()
            .with_position(Vec3::new(0.0, 0.0, self.spawn.z))
            .with_velocity(self.spawn.velocity)
    }

    /// Check everything that would otherwise surface as broken geometry mid-game.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.ground_desc().validate()?;
        self.player_desc().validate()?;
        self.seed_enemy_desc().validate()?;
        self.spawned_enemy_desc().validate()?;

        let scalars = [
            ("controls.move_speed", self.controls.move_speed),
            ("controls.jump_impulse", self.controls.jump_impulse),
            ("controls.jump_ceiling", self.controls.jump_ceiling),
            ("physics.drift_per_frame", self.physics.drift_per_frame),
            ("physics.bounce_retain", self.physics.bounce_retain),
            ("finish_margin", self.finish_margin),
            ("despawn_margin", self.despawn_margin.unwrap_or(0.0)),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(EngineError::NonFinite { field });
            }
        }
        if !(self.physics.bounce_divisor.is_finite() && self.physics.bounce_divisor != 0.0) {
            return Err(EngineError::InvalidSetting {
                field: "physics.bounce_divisor",
                reason: "must be finite and non-zero",
            });
        }
        if self.despawn_margin.is_some_and(|margin| margin < 0.0) {
            return Err(EngineError::InvalidSetting {
                field: "despawn_margin",
                reason: "must not be negative",
            });
        }
        if self.spawn.interval == 0 {
            return Err(EngineError::InvalidSetting {
                field: "spawn.interval",
                reason: "must be at least one frame",
            });
        }
        Ok(())
    }
}
