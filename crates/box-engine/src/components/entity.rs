use glam::Vec3;
use crate::api::error::EngineError;
use crate::api::types::{EntityId, Role};
use crate::components::mesh::{BoxColor, BoxMaterial};

/// Vertical acceleration applied every frame, in units/frame².
pub const DEFAULT_GRAVITY: f32 = -0.002;

/// Description of a box before it is validated and given an id.
/// Player, ground and enemy differ only in the values set here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDesc {
    pub role: Role,
    /// Width (x), height (y), depth (z).
    pub dims: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity: f32,
    pub lateral_drift: bool,
    pub material: BoxMaterial,
}

impl BoxDesc {
    /// A unit cube at the origin with default gravity.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            dims: Vec3::ONE,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            gravity: DEFAULT_GRAVITY,
            lateral_drift: false,
            material: BoxMaterial::default(),
        }
    }

    /// The player cube: green, casts shadows, starts slowly falling.
    pub fn player() -> Self {
        Self::new(Role::Player)
            .with_velocity(Vec3::new(0.0, -0.01, 0.0))
            .with_material(BoxMaterial::new(BoxColor::GREEN).with_cast_shadow(true))
    }

    /// The static track. It never moves and is never stepped.
    pub fn ground(width: f32, height: f32, depth: f32) -> Self {
        Self::new(Role::Ground)
            .with_dims(Vec3::new(width, height, depth))
            .with_gravity(0.0)
            .with_material(BoxMaterial::new(BoxColor::TRACK).with_receive_shadow(true))
    }

    /// A hostile cube drifting down the track toward the player.
    pub fn enemy() -> Self {
        Self::new(Role::Enemy)
            .with_velocity(Vec3::new(0.0, -0.01, 0.02))
            .with_lateral_drift(true)
            .with_material(BoxMaterial::new(BoxColor::RED).with_cast_shadow(true))
    }

    // -- Builder pattern --

    pub fn with_dims(mut self, dims: Vec3) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_lateral_drift(mut self, enabled: bool) -> Self {
        self.lateral_drift = enabled;
        self
    }

    pub fn with_material(mut self, material: BoxMaterial) -> Self {
        self.material = material;
        self
    }

    /// Reject geometry that would silently turn into NaN or degenerate boxes.
    pub fn validate(&self) -> Result<(), EngineError> {
        let d = self.dims;
        if !(d.is_finite() && d.x > 0.0 && d.y > 0.0 && d.z > 0.0) {
            return Err(EngineError::InvalidDimensions {
                width: d.x,
                height: d.y,
                depth: d.z,
            });
        }
        if !self.position.is_finite() {
            return Err(EngineError::NonFinite { field: "position" });
        }
        if !self.velocity.is_finite() {
            return Err(EngineError::NonFinite { field: "velocity" });
        }
        if !self.gravity.is_finite() {
            return Err(EngineError::NonFinite { field: "gravity" });
        }
        Ok(())
    }
}

/// An axis-aligned box moving through the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    pub role: Role,
    /// Fixed at construction; see [`Entity::dims`].
    dims: Vec3,
    /// World-space centre.
    pub pos: Vec3,
    /// Units per frame.
    pub vel: Vec3,
    pub gravity: f32,
    /// When set, z-velocity grows every update.
    pub lateral_drift: bool,
    pub material: BoxMaterial,
}

impl Entity {
    /// Validate `desc` and build the entity.
    pub fn from_desc(id: EntityId, desc: &BoxDesc) -> Result<Self, EngineError> {
        desc.validate()?;
        Ok(Self {
            id,
            role: desc.role,
            dims: desc.dims,
            pos: desc.position,
            vel: desc.velocity,
            gravity: desc.gravity,
            lateral_drift: desc.lateral_drift,
            material: desc.material,
        })
    }

    pub fn dims(&self) -> Vec3 {
        self.dims
    }

    pub fn width(&self) -> f32 {
        self.dims.x
    }

    pub fn height(&self) -> f32 {
        self.dims.y
    }

    pub fn depth(&self) -> f32 {
        self.dims.z
    }

    /// Lowest y of the box.
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.dims.y / 2.0
    }

    /// Highest y of the box.
    pub fn top(&self) -> f32 {
        self.pos.y + self.dims.y / 2.0
    }
}
