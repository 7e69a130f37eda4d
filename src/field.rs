//! The particle field: body construction and the per-frame update.
//!
//! A step is one synchronous pass over every body, in order:
//!
//! 1. gravity: `velocity.y -= gravity`
//! 2. pointer attraction, when enabled and the body is within
//!    [`ATTRACTION_RADIUS`] of the pointer
//! 3. integrate: `position += velocity`
//! 4. wall reflection per axis: clamp to the wall, negate and damp velocity
//! 5. drag: `velocity *= friction`
//! 6. speed limit: rescale to `max_velocity` when faster
//! 7. decorative spin
//!
//! There is no time step. Every quantity is per frame, so the motion speeds up
//! or slows down with the host's refresh rate.

use glam::{Vec2, Vec3};
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::body::{Body, BodyInstance};
use crate::config::{Bounds, SimulationConfig};
use crate::pointer::PointerSource;

/// Bodies farther than this from the pointer are not attracted.
pub const ATTRACTION_RADIUS: f32 = 2.0;
/// Velocity added per frame towards the pointer.
pub const ATTRACTION_FORCE: f32 = 0.001;
/// Scale from normalized pointer coordinates to world units. Depth is fixed at 0.
pub const POINTER_SCALE: Vec2 = Vec2::new(5.0, 3.0);
/// Rotation added about x and y every frame.
pub const SPIN_PER_FRAME: f32 = 0.01;
/// Full extents of the box bodies spawn in, centered on the origin.
pub const SPAWN_EXTENTS: Vec3 = Vec3::new(10.0, 8.0, 5.0);
/// Full range of each initial velocity component, centered on zero.
pub const SPAWN_VELOCITY_RANGE: f32 = 0.02;

/// Fallback color when the palette is empty.
const DEFAULT_COLOR: u32 = 0xffffff;

/// Map a normalized pointer position into the simulation's coordinate space.
#[inline]
pub fn pointer_target(pointer: Vec2) -> Vec3 {
    (pointer * POINTER_SCALE).extend(0.0)
}

/// A fixed-size set of bodies bouncing around a bounded volume.
#[derive(Debug, Clone)]
pub struct ParticleField {
    bodies: Vec<Body>,
    gravity: f32,
    friction: f32,
    wall_bounce: f32,
    follow_cursor: bool,
    max_velocity: f32,
    bounds: Bounds,
    frame: u64,
}

impl ParticleField {
    /// Build a field from `config`, seeded by `config.seed` when set.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Build a field drawing every random sample from `rng`.
    pub fn with_rng<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Self {
        let bodies = (0..config.count)
            .map(|_| spawn_body(config, rng))
            .collect();
        Self::with_bodies(config, bodies)
    }

    /// Build a field around explicitly placed bodies.
    ///
    /// `config.count` and the sampling parameters are ignored.
    pub fn with_bodies(config: &SimulationConfig, bodies: Vec<Body>) -> Self {
        debug!(
            "ParticleField::new(count={}, gravity={}, friction={}, wall_bounce={}, follow_cursor={}, bounds={:?})",
            bodies.len(),
            config.gravity,
            config.friction,
            config.wall_bounce,
            config.follow_cursor,
            config.bounds
        );
        Self {
            bodies,
            gravity: config.gravity,
            friction: config.friction,
            wall_bounce: config.wall_bounce,
            follow_cursor: config.follow_cursor,
            max_velocity: config.max_velocity,
            bounds: config.bounds,
            frame: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of steps taken so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance every body by one frame.
    ///
    /// The pointer is read once, and only when attraction is enabled.
    pub fn step<P: PointerSource + ?Sized>(&mut self, pointer: &P) {
        let target = self
            .follow_cursor
            .then(|| pointer_target(pointer.current_pointer()));
        let half = self.bounds.half_extents();

        for body in &mut self.bodies {
            body.velocity.y -= self.gravity;

            if let Some(target) = target {
                let offset = target - body.position;
                if offset.length() < ATTRACTION_RADIUS {
                    if let Some(dir) = offset.try_normalize() {
                        body.velocity += dir * ATTRACTION_FORCE;
                    }
                }
            }

            body.position += body.velocity;

            for axis in 0..3 {
                if body.position[axis].abs() > half[axis] {
                    body.velocity[axis] *= -self.wall_bounce;
                    body.position[axis] = body.position[axis].signum() * half[axis];
                }
            }

            body.velocity *= self.friction;
            body.velocity = body.velocity.clamp_length_max(self.max_velocity);

            body.rotation += Vec2::splat(SPIN_PER_FRAME);
        }

        self.frame += 1;
        trace!("ParticleField::step(frame={}, target={:?})", self.frame, target);
    }

    /// GPU instance data for every body, in body order.
    pub fn instances(&self) -> impl ExactSizeIterator<Item = BodyInstance> + '_ {
        self.bodies.iter().map(Body::to_instance)
    }

    /// Drop every body. The field stays usable but empty.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.bodies.shrink_to_fit();
    }
}

fn spawn_body<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Body {
    let centered = |rng: &mut R| rng.gen::<f32>() - 0.5;

    let position = Vec3::new(centered(rng), centered(rng), centered(rng)) * SPAWN_EXTENTS;
    let velocity =
        Vec3::new(centered(rng), centered(rng), centered(rng)) * SPAWN_VELOCITY_RANGE;
    let scale = rng.gen::<f32>() * (config.max_size - config.min_size) + config.min_size;
    let color = if config.colors.is_empty() {
        DEFAULT_COLOR
    } else {
        config.colors[rng.gen_range(0..config.colors.len())]
    };

    Body::new(position, velocity, scale, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_gravity(0.0)
            .with_friction(1.0)
            .with_max_velocity(10.0)
    }

    #[test]
    fn test_spawn_respects_sampling_ranges() {
        let config = SimulationConfig::default().with_count(500).with_seed(3);
        let field = ParticleField::new(&config);

        assert_eq!(field.len(), 500);
        let half = SPAWN_EXTENTS * 0.5;
        for body in field.bodies() {
            assert!(body.position.abs().cmple(half).all());
            assert!(body.velocity.abs().max_element() <= SPAWN_VELOCITY_RANGE * 0.5);
            assert!(body.scale >= config.min_size && body.scale <= config.max_size);
            assert!(config.colors.contains(&body.color));
            assert_eq!(body.home, body.position);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = SimulationConfig::default().with_count(20).with_seed(99);
        let a = ParticleField::new(&config);
        let b = ParticleField::new(&config);
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        let config = SimulationConfig::default()
            .with_count(4)
            .with_colors(Vec::new())
            .with_seed(1);
        let field = ParticleField::new(&config);
        assert!(field.bodies().iter().all(|b| b.color == DEFAULT_COLOR));
    }

    #[test]
    fn test_pointer_target_mapping() {
        assert_eq!(pointer_target(Vec2::new(1.0, -1.0)), Vec3::new(5.0, -3.0, 0.0));
        assert_eq!(pointer_target(Vec2::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_body_on_pointer_gets_no_force() {
        let config = still_config();
        let body = Body::new(Vec3::ZERO, Vec3::ZERO, 0.1, 0);
        let mut field = ParticleField::with_bodies(&config, vec![body]);
        field.step(&Vec2::ZERO);
        assert_eq!(field.bodies()[0].velocity, Vec3::ZERO);
        assert!(!field.bodies()[0].velocity.is_nan());
    }

    #[test]
    fn test_spin_accumulates() {
        let config = still_config();
        let body = Body::new(Vec3::ZERO, Vec3::ZERO, 0.1, 0);
        let mut field = ParticleField::with_bodies(&config.with_follow_cursor(false), vec![body]);
        for _ in 0..3 {
            field.step(&Vec2::ZERO);
        }
        assert!((field.bodies()[0].rotation - Vec2::splat(0.03)).length() < 1e-6);
        assert_eq!(field.frame(), 3);
    }

    #[test]
    fn test_clear_empties_field() {
        let config = SimulationConfig::default().with_count(10).with_seed(5);
        let mut field = ParticleField::new(&config);
        field.clear();
        assert!(field.is_empty());
        // Stepping an empty field is a no-op.
        field.step(&Vec2::ZERO);
        assert_eq!(field.len(), 0);
    }
}
