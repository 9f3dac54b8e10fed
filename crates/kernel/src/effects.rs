//! The interactive effects: burst, flash, and bounce-all.

use crate::factory::{ObjectFactory, random_color};
use crate::object::BounceParams;
use crate::scene::Scene;
use crate::timers::{TimerQueue, TimerTask};
use glam::Vec3;
use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use toybox_common::ObjectHandle;

/// Objects spawned by one burst.
pub const BURST_COUNT: usize = 8;
/// Bound on each burst velocity component.
pub const BURST_SPEED: f32 = 0.35;
/// How long a flash color is shown before the old color comes back.
pub const FLASH_DURATION: Duration = Duration::from_millis(400);
/// How long bounce state lives after a bounce-all.
pub const BOUNCE_DURATION: Duration = Duration::from_millis(1100);
pub const BOUNCE_AMPLITUDE: Range<f32> = 0.5..1.5;

/// An effect the input layer can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Spawn [`BURST_COUNT`] drifting objects at `center`, or the origin.
    Burst { center: Option<Vec3> },
    /// Temporarily recolor every object.
    Flash,
    /// Make every object bounce for [`BOUNCE_DURATION`].
    BounceAll,
}

/// Spawn a burst of drifting objects at `center` (origin when `None`).
pub fn burst<R: Rng + ?Sized>(
    scene: &mut Scene,
    factory: &ObjectFactory,
    rng: &mut R,
    center: Option<Vec3>,
) -> Vec<ObjectHandle> {
    let center = center.unwrap_or(Vec3::ZERO);
    (0..BURST_COUNT)
        .map(|_| {
            let mut obj = factory.create_at(rng, None, center);
            obj.velocity = Some(Vec3::new(
                rng.random_range(-BURST_SPEED..BURST_SPEED),
                rng.random_range(-BURST_SPEED..BURST_SPEED),
                rng.random_range(-BURST_SPEED..BURST_SPEED),
            ));
            scene.insert(obj)
        })
        .collect()
}

/// Give every object a random palette color and schedule the old one back.
///
/// Restores are independent tasks: a second flash inside the window can have
/// its color overwritten by the first flash's restore.
pub fn flash<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    timers: &mut TimerQueue,
    now: Duration,
) {
    let deadline = now + FLASH_DURATION;
    for (handle, obj) in scene.iter_mut() {
        let original = obj.material.color;
        obj.material.color = random_color(rng);
        timers.schedule(
            deadline,
            TimerTask::RestoreColor {
                handle,
                color: original,
            },
        );
    }
}

/// Attach bounce state to every object and schedule its removal.
pub fn bounce_all<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    timers: &mut TimerQueue,
    now: Duration,
) {
    for obj in scene.objects_mut() {
        obj.bounce = Some(BounceParams {
            amplitude: rng.random_range(BOUNCE_AMPLITUDE),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            base_y: obj.transform.position.y,
        });
    }
    timers.schedule(now + BOUNCE_DURATION, TimerTask::ClearBounce);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use toybox_common::PALETTE;

    fn seeded_scene(rng: &mut StdRng, n: usize) -> Scene {
        let factory = ObjectFactory::new();
        let mut scene = Scene::new();
        for _ in 0..n {
            scene.insert(factory.create(rng, None));
        }
        scene
    }

    #[test]
    fn burst_spawns_at_center_with_bounded_velocity() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut scene = seeded_scene(&mut rng, 3);
        let center = Vec3::new(1.0, 2.0, -3.0);
        let handles = burst(&mut scene, &ObjectFactory::new(), &mut rng, Some(center));

        assert_eq!(handles.len(), BURST_COUNT);
        assert_eq!(scene.len(), 3 + BURST_COUNT);
        for h in handles {
            let obj = scene.get(h).unwrap();
            assert_eq!(obj.position(), center);
            let v = obj.velocity.expect("burst objects drift");
            for c in v.to_array() {
                assert!((-BURST_SPEED..BURST_SPEED).contains(&c));
            }
        }
    }

    #[test]
    fn burst_defaults_to_origin() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut scene = Scene::new();
        let handles = burst(&mut scene, &ObjectFactory::new(), &mut rng, None);
        assert!(handles
            .iter()
            .all(|h| scene.get(*h).unwrap().position() == Vec3::ZERO));
    }

    #[test]
    fn flash_schedules_one_restore_per_object() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut scene = seeded_scene(&mut rng, 6);
        let before: Vec<_> = scene.objects().iter().map(|o| o.color()).collect();
        let mut timers = TimerQueue::new();

        flash(&mut scene, &mut rng, &mut timers, Duration::from_millis(50));

        assert_eq!(timers.len(), 6);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(450)));
        assert!(scene.objects().iter().all(|o| PALETTE.contains(&o.color())));

        let mut restored = Vec::new();
        while let Some(task) = timers.pop_due(Duration::from_millis(450)) {
            match task {
                TimerTask::RestoreColor { handle, color } => restored.push((handle, color)),
                TimerTask::ClearBounce => panic!("flash must not clear bounce"),
            }
        }
        let colors: Vec<_> = restored.iter().map(|(_, c)| *c).collect();
        assert_eq!(colors, before);
    }

    #[test]
    fn bounce_all_records_base_height() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut scene = seeded_scene(&mut rng, 5);
        let mut timers = TimerQueue::new();
        bounce_all(&mut scene, &mut rng, &mut timers, Duration::from_secs(2));

        for obj in scene.objects() {
            let b = obj.bounce.expect("bounce attached");
            assert_eq!(b.base_y, obj.position().y);
            assert!(BOUNCE_AMPLITUDE.contains(&b.amplitude));
            assert!((0.0..std::f32::consts::TAU).contains(&b.phase));
        }
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(3100)));
    }
}
