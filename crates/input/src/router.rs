use crate::event::{InputEvent, Key};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use toybox_common::PerspectiveCamera;
use toybox_kernel::Effect;

/// Chance that a single pointer move spawns a burst under the pointer.
pub const MOVE_BURST_CHANCE: f64 = 0.04;
/// Chance that a single pointer move flashes colors. Drawn independently
/// of the burst roll, so one move can do both.
pub const MOVE_FLASH_CHANCE: f64 = 0.10;

/// Turns input events into effects.
///
/// Owns the RNG for the pointer-move rolls and keeps the camera in sync
/// with the viewport.
#[derive(Debug)]
pub struct InputRouter<R = StdRng> {
    rng: R,
}

impl InputRouter<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> InputRouter<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Route one event. Effects come back in the order they should be applied.
    pub fn route(&mut self, event: InputEvent, camera: &mut PerspectiveCamera) -> Vec<Effect> {
        match event {
            InputEvent::Resize { width, height } => {
                camera.resize(width, height);
                tracing::debug!(width, height, aspect = camera.aspect, "viewport resized");
                Vec::new()
            }
            InputEvent::PointerMove(pixel) => {
                let mut effects = Vec::new();
                if self.rng.random_bool(MOVE_BURST_CHANCE) {
                    effects.push(Effect::Burst {
                        center: Some(camera.screen_to_world(pixel)),
                    });
                }
                if self.rng.random_bool(MOVE_FLASH_CHANCE) {
                    effects.push(Effect::Flash);
                }
                effects
            }
            InputEvent::Click(pixel) => vec![
                Effect::Burst {
                    center: Some(camera.screen_to_world(pixel)),
                },
                Effect::Flash,
            ],
            InputEvent::KeyDown(key) => key_effect(key).into_iter().collect(),
        }
    }
}

/// The effect bound to a key, if any. Letters are case sensitive.
pub fn key_effect(key: Key) -> Option<Effect> {
    match key {
        Key::Space => Some(Effect::BounceAll),
        Key::Character('b') => Some(Effect::Burst { center: None }),
        Key::Character('c') => Some(Effect::Flash),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::time::Duration;
    use toybox_kernel::Playground;
    use toybox_kernel::effects::BURST_COUNT;

    #[test]
    fn keys_map_to_effects() {
        assert_eq!(key_effect(Key::Space), Some(Effect::BounceAll));
        assert_eq!(
            key_effect(Key::Character('b')),
            Some(Effect::Burst { center: None })
        );
        assert_eq!(key_effect(Key::Character('c')), Some(Effect::Flash));
        assert_eq!(key_effect(Key::Character('B')), None);
        assert_eq!(key_effect(Key::Character('x')), None);
        assert_eq!(key_effect(Key::Other), None);
    }

    #[test]
    fn click_bursts_at_unprojected_point_and_flashes() {
        let mut router = InputRouter::new(1);
        let mut camera = PerspectiveCamera::new(800, 600);
        let pixel = Vec2::new(120.0, 80.0);
        let effects = router.route(InputEvent::Click(pixel), &mut camera);
        assert_eq!(
            effects,
            vec![
                Effect::Burst {
                    center: Some(camera.screen_to_world(pixel))
                },
                Effect::Flash
            ]
        );
    }

    #[test]
    fn click_grows_registry_by_one_burst() {
        let mut router = InputRouter::new(2);
        let mut camera = PerspectiveCamera::new(800, 600);
        let mut playground = Playground::new(2);
        let before = playground.scene().len();

        let pixel = Vec2::new(400.0, 300.0);
        let now = Duration::from_millis(16);
        for effect in router.route(InputEvent::Click(pixel), &mut camera) {
            playground.apply(effect, now);
        }

        assert_eq!(playground.scene().len(), before + BURST_COUNT);
        let target = camera.screen_to_world(pixel);
        assert!(
            playground.scene().objects()[before..]
                .iter()
                .all(|o| o.position() == target)
        );
        // One restore per object, new ones included.
        assert_eq!(playground.pending_timers(), before + BURST_COUNT);
    }

    #[test]
    fn pointer_moves_roll_independently() {
        let mut router = InputRouter::new(3);
        let mut camera = PerspectiveCamera::new(800, 600);
        let (mut bursts, mut flashes, mut both) = (0, 0, 0);
        for i in 0..20_000 {
            let pixel = Vec2::new((i % 800) as f32, (i % 600) as f32);
            let effects = router.route(InputEvent::PointerMove(pixel), &mut camera);
            let b = effects.iter().any(|e| matches!(e, Effect::Burst { .. }));
            let f = effects.contains(&Effect::Flash);
            bursts += b as u32;
            flashes += f as u32;
            both += (b && f) as u32;
        }
        // Expected: 800 bursts, 2000 flashes, 80 with both.
        assert!((600..1000).contains(&bursts), "bursts={bursts}");
        assert!((1700..2300).contains(&flashes), "flashes={flashes}");
        assert!((30..150).contains(&both), "both={both}");
    }

    #[test]
    fn resize_updates_camera_only() {
        let mut router = InputRouter::new(4);
        let mut camera = PerspectiveCamera::new(800, 600);
        let effects = router.route(
            InputEvent::Resize {
                width: 1000,
                height: 500,
            },
            &mut camera,
        );
        assert!(effects.is_empty());
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.viewport, Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn space_bounces_everything() {
        let mut router = InputRouter::new(5);
        let mut camera = PerspectiveCamera::default();
        let mut playground = Playground::new(5);
        for effect in router.route(InputEvent::KeyDown(Key::Space), &mut camera) {
            playground.apply(effect, Duration::ZERO);
        }
        assert!(playground.scene().objects().iter().all(|o| o.bounce.is_some()));
    }
}
