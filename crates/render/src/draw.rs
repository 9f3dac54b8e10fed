use glam::Mat4;
use toybox_common::{Color, ShapeKind};
use toybox_kernel::Scene;

/// One object, ready to draw with its shape's unit mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub model: Mat4,
    pub color: Color,
    pub metalness: f32,
}

/// Instances split by mesh, each list in registry order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub spheres: Vec<Instance>,
    pub cubes: Vec<Instance>,
}

impl DrawList {
    pub fn build(scene: &Scene) -> Self {
        let mut list = Self::default();
        for (_, obj) in scene.iter() {
            let instance = Instance {
                model: obj.transform.model_matrix(obj.geometry().scale()),
                color: obj.color(),
                metalness: obj.material.metalness,
            };
            match obj.kind() {
                ShapeKind::Sphere => list.spheres.push(instance),
                ShapeKind::Cube => list.cubes.push(instance),
            }
        }
        tracing::trace!(
            spheres = list.spheres.len(),
            cubes = list.cubes.len(),
            "draw list built"
        );
        list
    }

    pub fn len(&self) -> usize {
        self.spheres.len() + self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
