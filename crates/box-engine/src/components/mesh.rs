/// Linear RGB color handed to the renderer's material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BoxColor {
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Track blue (#0369a1).
    pub const TRACK: Self = Self::from_hex(0x0369a1);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a 0xRRGGBB literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for BoxColor {
    fn default() -> Self {
        Self::GREEN
    }
}

/// Material hints for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMaterial {
    pub color: BoxColor,
    /// Whether the mesh casts shadows.
    pub cast_shadow: bool,
    /// Whether the mesh receives shadows.
    pub receive_shadow: bool,
}

impl BoxMaterial {
    pub fn new(color: BoxColor) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_cast_shadow(mut self, cast: bool) -> Self {
        self.cast_shadow = cast;
        self
    }

    pub fn with_receive_shadow(mut self, receive: bool) -> Self {
        self.receive_shadow = receive;
        self
    }
}
