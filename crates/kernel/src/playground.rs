use crate::animate;
use crate::effects::{self, Effect};
use crate::factory::ObjectFactory;
use crate::scene::Scene;
use crate::timers::{TimerQueue, TimerTask};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use toybox_common::ObjectHandle;

/// Objects placed in the scene at startup.
pub const INITIAL_OBJECTS: usize = 10;

/// The running toy: registry, RNG, pending timers and the loop clock.
///
/// All time values are offsets from session start and must not go
/// backwards. Every entry point first fires the timers that are due, so a
/// timer always runs before any frame or effect that happens after its
/// deadline.
#[derive(Debug)]
pub struct Playground {
    scene: Scene,
    factory: ObjectFactory,
    rng: StdRng,
    timers: TimerQueue,
    clock: Duration,
    frames: u64,
}

impl Playground {
    /// A session seeded with [`INITIAL_OBJECTS`] random objects.
    pub fn new(seed: u64) -> Self {
        let mut playground = Self::empty(seed);
        playground.populate(INITIAL_OBJECTS);
        tracing::info!(seed, objects = playground.scene.len(), "scene seeded");
        playground
    }

    /// A session with nothing in it yet.
    pub fn empty(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            scene: Scene::new(),
            factory: ObjectFactory::new(),
            rng,
            timers: TimerQueue::new(),
            clock: Duration::ZERO,
            frames: 0,
        }
    }

    /// Add `count` objects with default placement.
    pub fn populate(&mut self, count: usize) -> Vec<ObjectHandle> {
        (0..count)
            .map(|_| {
                let obj = self.factory.create(&mut self.rng, None);
                self.scene.insert(obj)
            })
            .collect()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Loop clock as of the latest frame or effect.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run one render-loop tick at loop time `now`.
    pub fn frame(&mut self, now: Duration) {
        self.advance_to(now);
        animate::run_frame(&mut self.scene, self.clock);
        self.frames += 1;
    }

    /// Trigger an effect at loop time `now`.
    pub fn apply(&mut self, effect: Effect, now: Duration) {
        self.advance_to(now);
        match effect {
            Effect::Burst { center } => {
                let spawned =
                    effects::burst(&mut self.scene, &self.factory, &mut self.rng, center);
                tracing::debug!(
                    count = spawned.len(),
                    total = self.scene.len(),
                    center = ?center.unwrap_or(Vec3::ZERO),
                    "burst"
                );
            }
            Effect::Flash => {
                effects::flash(&mut self.scene, &mut self.rng, &mut self.timers, self.clock);
                tracing::debug!(objects = self.scene.len(), "flash");
            }
            Effect::BounceAll => {
                effects::bounce_all(&mut self.scene, &mut self.rng, &mut self.timers, self.clock);
                tracing::debug!(objects = self.scene.len(), "bounce");
            }
        }
    }

    pub fn burst(&mut self, center: Option<Vec3>, now: Duration) {
        self.apply(Effect::Burst { center }, now);
    }

    pub fn flash(&mut self, now: Duration) {
        self.apply(Effect::Flash, now);
    }

    pub fn bounce_all(&mut self, now: Duration) {
        self.apply(Effect::BounceAll, now);
    }

    /// Move the clock forward and fire every timer due by then.
    pub fn advance_to(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
        while let Some(task) = self.timers.pop_due(self.clock) {
            self.fire(task);
        }
    }

    fn fire(&mut self, task: TimerTask) {
        match task {
            TimerTask::RestoreColor { handle, color } => {
                if let Err(e) = self.scene.set_color(handle, color) {
                    tracing::warn!("color restore skipped: {e}");
                }
            }
            TimerTask::ClearBounce => {
                for obj in self.scene.objects_mut() {
                    obj.bounce = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BOUNCE_DURATION, BURST_COUNT, BURST_SPEED, FLASH_DURATION};
    use toybox_common::PALETTE;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn new_seeds_ten_objects() {
        let p = Playground::new(1);
        assert_eq!(p.scene().len(), INITIAL_OBJECTS);
        assert!(p.scene().objects().iter().all(|o| o.velocity.is_none()));
        assert_eq!(p.pending_timers(), 0);
    }

    #[test]
    fn same_seed_same_session() {
        let mut a = Playground::new(42);
        let mut b = Playground::new(42);
        for i in 0..30 {
            if i % 7 == 0 {
                a.burst(None, ms(i * 16));
                b.burst(None, ms(i * 16));
            }
            a.frame(ms(i * 16));
            b.frame(ms(i * 16));
        }
        assert_eq!(a.scene().objects(), b.scene().objects());
    }

    #[test]
    fn burst_at_origin_after_seeding() {
        let mut p = Playground::new(7);
        p.burst(None, Duration::ZERO);
        assert_eq!(p.scene().len(), INITIAL_OBJECTS + BURST_COUNT);

        let max_speed = BURST_SPEED * 3.0_f32.sqrt();
        for obj in &p.scene().objects()[INITIAL_OBJECTS..] {
            assert_eq!(obj.position(), Vec3::ZERO);
            let speed = obj.velocity.unwrap().length();
            assert!(speed > 0.0 && speed <= max_speed, "speed={speed}");
        }
    }

    #[test]
    fn flash_round_trip() {
        let mut p = Playground::new(3);
        let before: Vec<_> = p.scene().objects().iter().map(|o| o.color()).collect();

        p.flash(ms(1000));
        p.frame(ms(1200));
        assert!(p.scene().objects().iter().all(|o| PALETTE.contains(&o.color())));
        assert_eq!(p.pending_timers(), INITIAL_OBJECTS);

        p.frame(ms(1000) + FLASH_DURATION);
        let after: Vec<_> = p.scene().objects().iter().map(|o| o.color()).collect();
        assert_eq!(before, after);
        assert_eq!(p.pending_timers(), 0);
    }

    #[test]
    fn overlapping_flashes_race() {
        let mut p = Playground::empty(5);
        p.populate(1);
        let h = ObjectHandle(0);
        let original = p.scene().get(h).unwrap().color();

        p.flash(ms(0));
        let first = p.scene().get(h).unwrap().color();
        p.flash(ms(200));

        // The first restore lands while the second flash is still showing.
        p.frame(ms(400));
        assert_eq!(p.scene().get(h).unwrap().color(), original);

        // The second restore puts back what the first flash showed.
        p.frame(ms(600));
        assert_eq!(p.scene().get(h).unwrap().color(), first);
    }

    #[test]
    fn restore_fires_before_later_effect() {
        let mut p = Playground::empty(8);
        p.populate(1);
        let h = ObjectHandle(0);
        let original = p.scene().get(h).unwrap().color();

        p.flash(ms(0));
        // No frame between: the due restore still runs before the second flash.
        p.flash(ms(450));
        p.frame(ms(850));
        assert_eq!(p.scene().get(h).unwrap().color(), original);
    }

    #[test]
    fn bounce_window_on_five_objects() {
        let mut p = Playground::empty(9);
        p.populate(5);
        let t = ms(5000);
        p.bounce_all(t);

        for step in [0, 16, 500, 1000, 1099] {
            p.frame(t + ms(step));
            assert!(
                p.scene().objects().iter().all(|o| o.bounce.is_some()),
                "missing bounce at +{step}ms"
            );
        }
        p.frame(t + BOUNCE_DURATION);
        assert!(p.scene().objects().iter().all(|o| o.bounce.is_none()));
        p.frame(t + ms(2000));
        assert!(p.scene().objects().iter().all(|o| o.bounce.is_none()));
    }

    #[test]
    fn bounce_clear_hits_objects_added_later() {
        let mut p = Playground::empty(10);
        p.populate(2);
        p.bounce_all(ms(0));
        p.bounce_all(ms(600));
        // The first window's timer clears everything, including the second window.
        p.frame(ms(1100));
        assert!(p.scene().objects().iter().all(|o| o.bounce.is_none()));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut p = Playground::new(2);
        p.frame(ms(100));
        p.frame(ms(50));
        assert_eq!(p.clock(), ms(100));
        assert_eq!(p.frame_count(), 2);
    }

    #[test]
    fn burst_objects_come_to_rest() {
        let mut p = Playground::empty(4);
        p.burst(Some(Vec3::new(1.0, 1.0, 1.0)), Duration::ZERO);
        for i in 0..400 {
            p.frame(ms(i * 16));
        }
        assert!(p.scene().objects().iter().all(|o| o.velocity.is_none()));
    }
}
