use box_engine::{BoxDesc, EngineContext, EngineError, EntityId, Role};
use serde::Deserialize;

/// Which enemy the spawner's random lateral offset is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetTarget {
    /// The enemy being spawned.
    #[default]
    Spawned,
    /// The first enemy of the roster. The new enemy keeps the template's x
    /// and the oldest enemy is moved sideways on every spawn.
    FirstEnemy,
}

/// Appends one enemy every `interval` frames at a random lateral offset.
#[derive(Debug, Clone)]
pub struct Spawner {
    frame: u64,
    interval: u64,
    target: OffsetTarget,
}

impl Spawner {
    pub fn new(interval: u64, target: OffsetTarget) -> Self {
        Self {
            frame: 0,
            interval: interval.max(1),
            target,
        }
    }

    /// Frames counted so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count one frame; spawn from `template` when the interval comes round.
    pub fn tick(
        &mut self,
        ctx: &mut EngineContext,
        template: &BoxDesc,
        track_width: f32,
    ) -> Result<Option<EntityId>, EngineError> {
        self.frame += 1;
        if self.frame % self.interval != 0 {
            return Ok(None);
        }

        let offset = lateral_offset(ctx, track_width);
        let mut desc = *template;
        if self.target == OffsetTarget::Spawned {
            desc.position.x = offset;
        }
        let id = ctx.spawn(&desc)?;

        if self.target == OffsetTarget::FirstEnemy {
            if let Some(first) = ctx.scene.first_with_role_mut(Role::Enemy) {
                first.pos.x = offset;
            }
        }

        log::debug!("frame {}: spawned enemy {} at x={}", self.frame, id, offset);
        Ok(Some(id))
    }
}

/// A whole-unit offset in `(-track_width/2, track_width/2)`: pick a magnitude
/// `r` in `[0, track_width/2)`, then `r` or `-r` with equal chance.
pub fn lateral_offset(ctx: &mut EngineContext, track_width: f32) -> f32 {
    let r = (ctx.rng.next_f32() * track_width / 2.0).floor();
    let candidates = [r, -r];
    ctx.rng.choose(&candidates).copied().unwrap_or(r)
}
