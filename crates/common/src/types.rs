use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Stable handle to a slot in the scene registry.
///
/// Handles are dense indices handed out in insertion order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub u32);

impl ObjectHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two shapes the toy knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Sphere,
    Cube,
}

/// Shape dimensions, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere { radius: f32 },
    Cube { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Cube { .. } => ShapeKind::Cube,
        }
    }

    /// Every random dimension of this shape.
    pub fn dimensions(&self) -> Vec<f32> {
        match *self {
            Self::Sphere { radius } => vec![radius],
            Self::Cube {
                width,
                height,
                depth,
            } => vec![width, height, depth],
        }
    }

    /// Scale applied to the unit mesh of this shape (unit-radius sphere, unit-edge cube).
    pub fn scale(&self) -> Vec3 {
        match *self {
            Self::Sphere { radius } => Vec3::splat(radius),
            Self::Cube {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
        }
    }
}

/// A 24-bit sRGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub fn hex(self) -> u32 {
        self.0
    }

    /// sRGB components in [0, 1].
    pub fn to_srgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Linear RGBA with opaque alpha, ready for an sRGB render target.
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let [r, g, b] = self.to_srgb();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The seven display colors every object and flash draws from.
pub const PALETTE: [Color; 7] = [
    Color(0xff5e5b),
    Color(0xffc914),
    Color(0x2ec4b6),
    Color(0x6a4cff),
    Color(0xf7b32b),
    Color(0x3a86ff),
    Color(0xff006e),
];

/// Surface description of an object. Only `color` ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn for_shape(kind: ShapeKind, color: Color) -> Self {
        match kind {
            ShapeKind::Sphere => Self {
                color,
                roughness: 0.5,
                metalness: 0.3,
            },
            ShapeKind::Cube => Self {
                color,
                roughness: 0.4,
                metalness: 0.2,
            },
        }
    }
}

/// Position plus Euler rotation (radians, XYZ order).
///
/// Rotation is stored as raw angles so spin can accumulate without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Model matrix: translation * rotation * scale.
    pub fn model_matrix(&self, scale: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(scale, self.rotation_quat(), self.position)
    }
}
