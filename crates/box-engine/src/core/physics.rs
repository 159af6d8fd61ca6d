use serde::Deserialize;

use crate::components::entity::Entity;

/// Tuning for the per-frame box physics. All rates are per frame.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to z-velocity every frame for drifting entities.
    pub drift_per_frame: f32,
    /// Fraction of vertical speed kept on ground contact, before the divisor.
    pub bounce_retain: f32,
    /// Divides the retained speed on ground contact.
    pub bounce_divisor: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            drift_per_frame: 0.0003,
            bounce_retain: 0.6,
            bounce_divisor: 1.5,
        }
    }
}

/// Advance one entity by one frame against `ground`.
///
/// Horizontal motion is never touched by gravity or the ground; vertical
/// motion goes through [`apply_gravity`].
pub fn step(entity: &mut Entity, ground: &Entity, config: &PhysicsConfig) {
    if entity.lateral_drift {
        entity.vel.z += config.drift_per_frame;
    }

    entity.pos.x += entity.vel.x;
    entity.pos.z += entity.vel.z;

    apply_gravity(entity, ground, config);
}

/// Integrate gravity, bouncing off the ground instead of passing through it.
///
/// Returns `true` when the frame ended in a ground contact. On contact the
/// vertical position is held for this frame.
pub fn apply_gravity(entity: &mut Entity, ground: &Entity, config: &PhysicsConfig) -> bool {
    entity.vel.y += entity.gravity;

    let landing = entity.bottom() + entity.vel.y <= ground.top();
    if landing && footprints_overlap(entity, ground) {
        entity.vel.y = bounce(entity.vel.y, config);
        true
    } else {
        entity.pos.y += entity.vel.y;
        false
    }
}

/// Vertical velocity after a ground contact: reversed and damped.
pub fn bounce(vel_y: f32, config: &PhysicsConfig) -> f32 {
    -(vel_y * config.bounce_retain) / config.bounce_divisor
}

/// Whether the x/z rectangles of two boxes intersect (edges touching counts).
pub fn footprints_overlap(a: &Entity, b: &Entity) -> bool {
    let dx = (a.pos.x - b.pos.x).abs();
    let dz = (a.pos.z - b.pos.z).abs();
    dx <= (a.width() + b.width()) / 2.0 && dz <= (a.depth() + b.depth()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use crate::api::types::EntityId;
    use crate::components::entity::BoxDesc;

    fn ground() -> Entity {
        let desc = BoxDesc::ground(15.0, 0.5, 50.0).with_position(Vec3::new(0.0, -2.0, 0.0));
        Entity::from_desc(EntityId(100), &desc).unwrap()
    }

    fn cube(desc: BoxDesc) -> Entity {
        Entity::from_desc(EntityId(1), &desc).unwrap()
    }

    #[test]
    fn bounds_match_position_after_every_step() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(BoxDesc::player());
        for _ in 0..500 {
            step(&mut e, &ground, &config);
            assert_eq!(e.bottom(), e.pos.y - e.height() / 2.0);
            assert_eq!(e.top(), e.pos.y + e.height() / 2.0);
        }
    }

    #[test]
    fn free_fall_accumulates_gravity() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(BoxDesc::player().with_velocity(Vec3::ZERO));

        step(&mut e, &ground, &config);
        assert_relative_eq!(e.vel.y, -0.002, epsilon = 1e-6);
        assert_relative_eq!(e.pos.y, -0.002, epsilon = 1e-6);

        step(&mut e, &ground, &config);
        assert_relative_eq!(e.vel.y, -0.004, epsilon = 1e-6);
        assert_relative_eq!(e.pos.y, -0.006, epsilon = 1e-6);
    }

    #[test]
    fn bounce_reverses_and_loses_energy() {
        let config = PhysicsConfig::default();
        for v in [-0.001_f32, -0.01, -0.05, -0.3, -2.0] {
            let post = bounce(v, &config);
            assert_relative_eq!(post, -(v * 0.6) / 1.5);
            assert!(post > 0.0);
            assert!(post.abs() < v.abs());
        }
    }

    #[test]
    fn contact_holds_position_for_the_frame() {
        let ground = ground();
        let config = PhysicsConfig::default();
        // Bottom sits exactly on the ground top (-1.75).
        let mut e = cube(BoxDesc::player().with_position(Vec3::new(0.0, -1.25, 0.0)));
        let before = e.pos.y;

        let landed = apply_gravity(&mut e, &ground, &config);

        assert!(landed);
        assert_eq!(e.pos.y, before);
        assert_relative_eq!(e.vel.y, bounce(-0.012, &config), epsilon = 1e-6);
    }

    #[test]
    fn settled_box_never_tunnels() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(BoxDesc::player());
        for _ in 0..5000 {
            step(&mut e, &ground, &config);
            assert!(e.bottom() >= ground.top() - 1e-5, "tunnelled: bottom={}", e.bottom());
        }
        assert!(e.vel.y.abs() < 0.002, "should be at rest, vel.y={}", e.vel.y);
        assert!(e.bottom() - ground.top() < 0.01);
    }

    #[test]
    fn box_off_the_track_keeps_falling() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(BoxDesc::player().with_position(Vec3::new(20.0, 0.0, 0.0)));
        for _ in 0..200 {
            step(&mut e, &ground, &config);
        }
        assert!(e.bottom() < ground.top());
    }

    #[test]
    fn footprint_edges_touching_count_as_overlap() {
        let ground = ground();
        let edge = cube(BoxDesc::player().with_position(Vec3::new(8.0, 0.0, 0.0)));
        assert!(footprints_overlap(&edge, &ground));
        let past = cube(BoxDesc::player().with_position(Vec3::new(8.1, 0.0, 0.0)));
        assert!(!footprints_overlap(&past, &ground));
        let left = cube(BoxDesc::player().with_position(Vec3::new(-8.0, 0.0, 0.0)));
        assert!(footprints_overlap(&left, &ground));
        let far = cube(BoxDesc::player().with_position(Vec3::new(0.0, 0.0, -25.6)));
        assert!(!footprints_overlap(&far, &ground));
    }

    #[test]
    fn lateral_drift_grows_linearly() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(BoxDesc::enemy().with_position(Vec3::new(0.0, 0.0, -20.0)));
        let initial = e.vel.z;
        for n in 1..=100 {
            step(&mut e, &ground, &config);
            assert_relative_eq!(e.vel.z, initial + n as f32 * 0.0003, epsilon = 1e-5);
        }
    }

    #[test]
    fn horizontal_motion_ignores_ground_contact() {
        let ground = ground();
        let config = PhysicsConfig::default();
        let mut e = cube(
            BoxDesc::player()
                .with_position(Vec3::new(0.0, -1.25, 0.0))
                .with_velocity(Vec3::new(0.04, 0.0, -0.04)),
        );
        step(&mut e, &ground, &config);
        assert_relative_eq!(e.pos.x, 0.04, epsilon = 1e-6);
        assert_relative_eq!(e.pos.z, -0.04, epsilon = 1e-6);
    }
}
