use crate::draw::DrawList;
use std::fmt::Write;
use toybox_common::PerspectiveCamera;
use toybox_kernel::Playground;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the playground and a camera, then produces output.
/// It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given playground state and camera.
    fn render(&self, playground: &Playground, camera: &PerspectiveCamera) -> Self::Output;
}

/// Human-readable dump of the scene, one line per object.
///
/// Used by the CLI and tests in place of a GPU backend.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, playground: &Playground, camera: &PerspectiveCamera) -> String {
        let scene = playground.scene();
        let draws = DrawList::build(scene);
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Scene (frame={}, clock={}ms) ===",
            playground.frame_count(),
            playground.clock().as_millis()
        );
        let _ = writeln!(
            out,
            "Objects: {} (spheres={}, cubes={})  pending timers: {}",
            scene.len(),
            draws.spheres.len(),
            draws.cubes.len(),
            playground.pending_timers()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) aspect={:.3} fov={:.0}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.aspect,
            camera.fov.to_degrees()
        );

        for (handle, obj) in scene.iter() {
            let p = obj.position();
            let r = obj.transform.rotation;
            let _ = write!(
                out,
                "  [{handle}] {:<6} {} pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2})",
                format!("{:?}", obj.kind()).to_lowercase(),
                obj.color(),
                p.x,
                p.y,
                p.z,
                r.x,
                r.y
            );
            if let Some(v) = obj.velocity {
                let _ = write!(out, " speed={:.3}", v.length());
            }
            if obj.bounce.is_some() {
                out.push_str(" bouncing");
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn debug_renderer_empty_scene() {
        let playground = Playground::empty(0);
        let output = DebugTextRenderer::new().render(&playground, &PerspectiveCamera::default());
        assert!(output.contains("frame=0"));
        assert!(output.contains("Objects: 0"));
    }

    #[test]
    fn debug_renderer_with_objects() {
        let mut playground = Playground::new(1);
        playground.burst(None, Duration::ZERO);
        playground.bounce_all(Duration::ZERO);
        playground.frame(Duration::from_millis(16));

        let output = DebugTextRenderer::new().render(&playground, &PerspectiveCamera::default());
        assert!(output.contains("Objects: 18"));
        assert!(output.contains("frame=1"));
        assert!(output.contains("speed="));
        assert!(output.contains("bouncing"));
        assert_eq!(output.lines().count(), 3 + 18);
    }
}
