use crate::object::VisualObject;
use glam::Vec3;
use rand::Rng;
use toybox_common::{Color, Geometry, PALETTE, ShapeKind};

/// Range every sphere radius and cube edge is drawn from.
pub const SIZE_RANGE: std::ops::Range<f32> = 0.5..1.5;
/// Per-frame spin rate range, radians.
pub const SPIN_RANGE: std::ops::Range<f32> = 0.01..0.03;
/// Half extents of the box default placement is drawn from.
pub const SPAWN_HALF_EXTENTS: Vec3 = Vec3::new(8.0, 5.0, 5.0);

/// Builds randomly parameterized spheres and cubes.
///
/// The factory holds no RNG of its own; callers pass theirs so one seed
/// drives an entire session.
#[derive(Debug, Clone, Copy)]
pub struct ObjectFactory {
    half_extents: Vec3,
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self {
            half_extents: SPAWN_HALF_EXTENTS,
        }
    }
}

impl ObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object at a random spot inside the spawn box.
    /// A missing `kind` is a coin flip between sphere and cube.
    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R, kind: Option<ShapeKind>) -> VisualObject {
        let kind = kind.unwrap_or_else(|| random_kind(rng));
        let geometry = random_geometry(rng, kind);
        let color = random_color(rng);
        let h = self.half_extents;
        let position = Vec3::new(
            rng.random_range(-h.x..h.x),
            rng.random_range(-h.y..h.y),
            rng.random_range(-h.z..h.z),
        );
        let spin = rng.random_range(SPIN_RANGE);
        VisualObject::new(geometry, color, position, spin)
    }

    /// Create an object placed exactly at `center`.
    pub fn create_at<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: Option<ShapeKind>,
        center: Vec3,
    ) -> VisualObject {
        let mut obj = self.create(rng, kind);
        obj.transform.position = center;
        obj
    }
}

pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> ShapeKind {
    if rng.random_bool(0.5) {
        ShapeKind::Sphere
    } else {
        ShapeKind::Cube
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

fn random_geometry<R: Rng + ?Sized>(rng: &mut R, kind: ShapeKind) -> Geometry {
    match kind {
        ShapeKind::Sphere => Geometry::Sphere {
            radius: rng.random_range(SIZE_RANGE),
        },
        ShapeKind::Cube => Geometry::Cube {
            width: rng.random_range(SIZE_RANGE),
            height: rng.random_range(SIZE_RANGE),
            depth: rng.random_range(SIZE_RANGE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dimensions_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let factory = ObjectFactory::new();
        for _ in 0..1000 {
            let obj = factory.create(&mut rng, None);
            for d in obj.geometry().dimensions() {
                assert!(SIZE_RANGE.contains(&d), "dimension {d} out of range");
            }
        }
    }

    #[test]
    fn colors_from_palette() {
        let mut rng = StdRng::seed_from_u64(2);
        let factory = ObjectFactory::new();
        for _ in 0..500 {
            let obj = factory.create(&mut rng, None);
            assert!(PALETTE.contains(&obj.color()));
        }
    }

    #[test]
    fn spin_and_position_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let factory = ObjectFactory::new();
        for _ in 0..500 {
            let obj = factory.create(&mut rng, None);
            assert!(SPIN_RANGE.contains(&obj.spin()));
            let p = obj.position();
            assert!(p.x.abs() <= 8.0 && p.y.abs() <= 5.0 && p.z.abs() <= 5.0);
        }
    }

    #[test]
    fn explicit_kind_is_respected() {
        let mut rng = StdRng::seed_from_u64(4);
        let factory = ObjectFactory::new();
        for _ in 0..50 {
            assert_eq!(
                factory.create(&mut rng, Some(ShapeKind::Cube)).kind(),
                ShapeKind::Cube
            );
            assert_eq!(
                factory.create(&mut rng, Some(ShapeKind::Sphere)).kind(),
                ShapeKind::Sphere
            );
        }
    }

    #[test]
    fn omitted_kind_produces_both_shapes() {
        let mut rng = StdRng::seed_from_u64(5);
        let factory = ObjectFactory::new();
        let spheres = (0..400)
            .filter(|_| factory.create(&mut rng, None).kind() == ShapeKind::Sphere)
            .count();
        assert!(spheres > 100 && spheres < 300, "spheres={spheres}");
    }

    #[test]
    fn create_at_overrides_position() {
        let mut rng = StdRng::seed_from_u64(6);
        let center = Vec3::new(3.0, -1.0, 2.5);
        let obj = ObjectFactory::new().create_at(&mut rng, None, center);
        assert_eq!(obj.position(), center);
        assert!(obj.velocity.is_none());
    }
}
