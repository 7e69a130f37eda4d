//! Simulated bodies and their per-instance GPU layout.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::config::hex_to_linear;

/// One ball in the pit.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Radius of the unit sphere mesh after scaling. Fixed at spawn.
    pub scale: f32,
    /// `0xRRGGBB`, fixed at spawn.
    pub color: u32,
    /// Where the body spawned. Kept for reference, not read by the step.
    pub home: Vec3,
    /// Decorative spin about x and y, in radians.
    pub rotation: Vec2,
}

impl Body {
    pub fn new(position: Vec3, velocity: Vec3, scale: f32, color: u32) -> Self {
        Self {
            position,
            velocity,
            scale,
            color,
            home: position,
            rotation: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Model matrix: translate, then spin about x then y, then scale.
    pub fn transform(&self) -> Mat4 {
        let rotation = Quat::from_rotation_x(self.rotation.x) * Quat::from_rotation_y(self.rotation.y);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }

    pub fn to_instance(&self) -> BodyInstance {
        let color = hex_to_linear(self.color);
        BodyInstance {
            model: self.transform().to_cols_array_2d(),
            color: [color.x, color.y, color.z, 1.0],
        }
    }
}

/// GPU instance data for one body. Matches `InstanceInput` in `ball.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl BodyInstance {
    /// World-space center, the translation column of `model`.
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}

/// Order instances farthest from `eye` first, so translucent bodies blend
/// over whatever lies behind them.
pub fn sort_back_to_front(instances: &mut [BodyInstance], eye: Vec3) {
    instances.sort_by(|a, b| {
        b.position()
            .distance_squared(eye)
            .total_cmp(&a.position().distance_squared(eye))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_home() {
        let body = Body::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 0.2, 0xff0000);
        assert_eq!(body.home, body.position);
        assert_eq!(body.rotation, Vec2::ZERO);
    }

    #[test]
    fn test_transform_places_and_scales() {
        let body = Body::new(Vec3::new(1.0, -2.0, 0.5), Vec3::ZERO, 0.25, 0xffffff);
        let m = body.transform();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - body.position).length() < 1e-6);
        let surface = m.transform_point3(Vec3::X);
        assert!(((surface - body.position).length() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 80);
        let body = Body::new(Vec3::ZERO, Vec3::ZERO, 1.0, 0x00ff00);
        let instance = body.to_instance();
        assert_eq!(instance.color[0], 0.0);
        assert!((instance.color[1] - 1.0).abs() < 1e-6);
        assert_eq!(instance.color[3], 1.0);
    }

    #[test]
    fn test_instance_position_is_translation() {
        let body = Body::new(Vec3::new(-1.5, 0.25, 2.0), Vec3::ZERO, 0.3, 0);
        assert_eq!(body.to_instance().position(), body.position);
    }

    #[test]
    fn test_sort_back_to_front() {
        let eye = Vec3::new(0.0, 0.0, 8.0);
        let mut instances: Vec<BodyInstance> = [2.0, -2.0, 0.0, 5.0]
            .into_iter()
            .map(|z| Body::new(Vec3::new(0.0, 0.0, z), Vec3::ZERO, 0.1, 0).to_instance())
            .collect();

        sort_back_to_front(&mut instances, eye);

        let order: Vec<f32> = instances.iter().map(|i| i.position().z).collect();
        assert_eq!(order, vec![-2.0, 0.0, 2.0, 5.0]);
    }
}
