//! Per-frame animator passes. Each pass touches every object once.

use crate::scene::Scene;
use std::time::Duration;

/// Velocity multiplier applied every frame while an object drifts.
pub const DAMPING: f32 = 0.97;
/// Speed under which a drifting object comes to rest.
pub const REST_SPEED: f32 = 0.01;
/// Milliseconds of loop clock per radian of bounce phase.
pub const BOUNCE_MS_PER_RADIAN: f64 = 200.0;

/// Add each object's spin rate to its X and Y rotation. Angles are never wrapped.
pub fn spin(scene: &mut Scene) {
    for obj in scene.objects_mut() {
        let rate = obj.spin();
        obj.transform.rotation.x += rate;
        obj.transform.rotation.y += rate;
    }
}

/// Move drifting objects by their velocity, then damp it.
/// Velocity is dropped the first frame its magnitude falls under [`REST_SPEED`].
pub fn kinetic(scene: &mut Scene) {
    for obj in scene.objects_mut() {
        let Some(velocity) = obj.velocity.as_mut() else {
            continue;
        };
        obj.transform.position += *velocity;
        *velocity *= DAMPING;
        if velocity.length() < REST_SPEED {
            obj.velocity = None;
        }
    }
}

/// Place bouncing objects on their sine curve for the loop clock `elapsed`.
///
/// This pass never clears bounce state; the bounce timer does.
pub fn bounce(scene: &mut Scene, elapsed: Duration) {
    let t = elapsed.as_secs_f64() * 1000.0 / BOUNCE_MS_PER_RADIAN;
    for obj in scene.objects_mut() {
        if let Some(b) = obj.bounce {
            let offset = (t + f64::from(b.phase)).sin() as f32 * b.amplitude;
            obj.transform.position.y = b.base_y + offset;
        }
    }
}

/// All three passes in their fixed order.
pub fn run_frame(scene: &mut Scene, elapsed: Duration) {
    spin(scene);
    kinetic(scene);
    bounce(scene, elapsed);
}
