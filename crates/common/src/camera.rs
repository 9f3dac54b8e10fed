use glam::{Mat4, Vec2, Vec3};

/// NDC depth used when turning a pointer position into a world point.
pub const POINTER_DEPTH: f32 = 0.5;

/// Fixed perspective camera looking down -Z at the scene.
///
/// Only the aspect ratio and viewport change at runtime (on resize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl PerspectiveCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            fov: 60.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            viewport: Vec2::ONE,
        };
        camera.resize(width, height);
        camera
    }

    /// Recompute aspect ratio and viewport for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        self.viewport = Vec2::new(w, h);
        self.aspect = w / h;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection with a [0, 1] depth range, as wgpu expects.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Map pixel coordinates to normalized device coordinates, Y up.
    pub fn screen_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            (pixel.x / self.viewport.x) * 2.0 - 1.0,
            -(pixel.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// Unproject an NDC point back into world space.
    ///
    /// The depth follows the OpenGL [-1, 1] clip convention so that a depth
    /// of 0.5 lands at the same place regardless of the render backend.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let gl_proj = Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far);
        (gl_proj * self.view_matrix()).inverse().project_point3(ndc)
    }

    /// World point under a pointer at the fixed pointer depth.
    pub fn screen_to_world(&self, pixel: Vec2) -> Vec3 {
        let ndc = self.screen_to_ndc(pixel);
        self.unproject(ndc.extend(POINTER_DEPTH))
    }
}
