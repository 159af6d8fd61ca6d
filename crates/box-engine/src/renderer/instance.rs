use bytemuck::{Pod, Zeroable};

/// Per-box render data read by the JS renderer.
/// Must match the JS protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    /// Centre in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Box size along x, y, z.
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Material color.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Role tag (see `Role::as_f32`).
    pub role: f32,
    /// 1.0 when the mesh casts shadows.
    pub cast_shadow: f32,
    /// 1.0 when the mesh receives shadows.
    pub receive_shadow: f32,
}

impl BoxInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// All box instances for one frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<BoxInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BoxInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from JS memory views.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
