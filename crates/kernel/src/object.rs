use glam::Vec3;
use serde::{Deserialize, Serialize};
use toybox_common::{Color, Geometry, Material, ShapeKind, Transform};

/// Parameters of an active bounce window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceParams {
    pub amplitude: f32,
    pub phase: f32,
    /// Vertical position at the moment the bounce started.
    pub base_y: f32,
}

/// A sphere or cube living in the scene.
///
/// Presence of `velocity` or `bounce` is the state signal for the kinetic
/// and bounce phases; `None` means the object is just spinning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualObject {
    geometry: Geometry,
    spin: f32,
    pub material: Material,
    pub transform: Transform,
    pub velocity: Option<Vec3>,
    pub bounce: Option<BounceParams>,
}

impl VisualObject {
    pub fn new(geometry: Geometry, color: Color, position: Vec3, spin: f32) -> Self {
        Self {
            geometry,
            spin,
            material: Material::for_shape(geometry.kind(), color),
            transform: Transform::at(position),
            velocity: None,
            bounce: None,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Radians of rotation added per frame on the X and Y axes.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn color(&self) -> Color {
        self.material.color
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}
