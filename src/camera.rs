//! Perspective camera with an idle sway.

use glam::{Mat4, Vec3};

/// Perspective camera that drifts on a slow sine/cosine path, always looking
/// at the origin. The sway depends only on time, never on the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SwayCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +z.
    pub distance: f32,
    /// Current world position.
    pub position: Vec3,
}

impl SwayCamera {
    pub const FOV_Y_DEGREES: f32 = 75.0;
    pub const DISTANCE: f32 = 8.0;
    /// Horizontal sway: amplitude in world units, angular rate per millisecond.
    pub const SWAY_X: (f32, f64) = (0.5, 0.0005);
    /// Vertical sway: amplitude in world units, angular rate per millisecond.
    pub const SWAY_Y: (f32, f64) = (0.3, 0.0003);

    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            fov_y: Self::FOV_Y_DEGREES.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
            distance: Self::DISTANCE,
            position: Vec3::ZERO,
        };
        camera.update(0.0);
        camera
    }

    /// Build a camera for a viewport, falling back to a square aspect when
    /// either side is zero.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let mut camera = Self::new(1.0);
        camera.set_viewport(width, height);
        camera
    }

    /// Move the camera to its sway position at `time_ms` milliseconds.
    pub fn update(&mut self, time_ms: f64) {
        let (ax, wx) = Self::SWAY_X;
        let (ay, wy) = Self::SWAY_Y;
        self.position = Vec3::new(
            (time_ms * wx).sin() as f32 * ax,
            (time_ms * wy).cos() as f32 * ay,
            self.distance,
        );
    }

    /// Recompute the aspect ratio. Zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for SwayCamera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
