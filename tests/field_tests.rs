//! Integration tests for the per-frame field update.
//!
//! These drive `ParticleField::step` directly with hand-placed bodies or a
//! seeded layout and check the motion rules frame by frame.

use approx::assert_relative_eq;
use ballpit::field::{ATTRACTION_FORCE, ATTRACTION_RADIUS};
use ballpit::{Body, Bounds, ParticleField, PointerSlot, SimulationConfig, Vec2, Vec3};

fn single_body(config: &SimulationConfig, position: Vec3, velocity: Vec3) -> ParticleField {
    ParticleField::with_bodies(config, vec![Body::new(position, velocity, 0.2, 0xffffff)])
}

fn still_config() -> SimulationConfig {
    SimulationConfig::default()
        .with_gravity(0.0)
        .with_friction(1.0)
        .with_max_velocity(100.0)
        .with_follow_cursor(false)
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_bodies_stay_inside_bounds() {
    let config = SimulationConfig::default()
        .with_count(200)
        .with_seed(7)
        .with_gravity(0.05)
        .with_max_velocity(0.8);
    let mut field = ParticleField::new(&config);
    let half = config.bounds.half_extents();
    let pointer = PointerSlot::new();

    for frame in 0..500 {
        // Drag the pointer around so attraction plays a part.
        pointer.set(Vec2::new((frame as f32 * 0.05).sin(), (frame as f32 * 0.03).cos()));
        field.step(&pointer);
        for body in field.bodies() {
            for axis in 0..3 {
                assert!(
                    body.position[axis].abs() <= half[axis],
                    "frame {}: axis {} at {} outside {}",
                    frame,
                    axis,
                    body.position[axis],
                    half[axis]
                );
            }
        }
    }
}

#[test]
fn test_speed_never_exceeds_max_velocity() {
    let config = SimulationConfig::default()
        .with_count(100)
        .with_seed(3)
        .with_gravity(0.5)
        .with_max_velocity(0.1);
    let mut field = ParticleField::new(&config);

    for _ in 0..300 {
        field.step(&Vec2::new(0.3, -0.2));
        for body in field.bodies() {
            assert!(body.speed() <= config.max_velocity + 1e-5);
        }
    }
}

#[test]
fn test_count_matches_config() {
    for count in [0, 1, 80, 500] {
        let field = ParticleField::new(&SimulationConfig::default().with_count(count));
        assert_eq!(field.len(), count);
    }
}

// ============================================================================
// Motion rules
// ============================================================================

#[test]
fn test_gravity_then_friction() {
    let gravity = 0.01;
    let friction = 0.9975;
    let config = SimulationConfig::default()
        .with_gravity(gravity)
        .with_friction(friction)
        .with_follow_cursor(false);
    let v0 = Vec3::new(0.0, 0.02, 0.0);
    let mut field = single_body(&config, Vec3::ZERO, v0);

    field.step(&Vec2::ZERO);

    let body = &field.bodies()[0];
    assert_relative_eq!(body.velocity.y, (v0.y - gravity) * friction, epsilon = 1e-7);
    assert_relative_eq!(body.position.y, v0.y - gravity, epsilon = 1e-7);
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.velocity.z, 0.0);
}

#[test]
fn test_wall_bounce_reflects_and_clamps() {
    let speed = 0.05;
    let wall_bounce = 0.8;
    let config = still_config().with_wall_bounce(wall_bounce);
    let bound = config.bounds.x;
    let mut field = single_body(&config, Vec3::new(bound + 1.0, 0.0, 0.0), Vec3::new(speed, 0.0, 0.0));

    field.step(&Vec2::ZERO);

    let body = &field.bodies()[0];
    assert_eq!(body.position.x, bound);
    assert_relative_eq!(body.velocity.x, -speed * wall_bounce, epsilon = 1e-7);
}

#[test]
fn test_negative_wall_clamps_to_negative_bound() {
    let config = still_config().with_bounds(Bounds::new(2.0, 2.0, 2.0));
    let mut field = single_body(&config, Vec3::new(0.0, 0.0, -1.99), Vec3::new(0.0, 0.0, -0.1));

    field.step(&Vec2::ZERO);

    let body = &field.bodies()[0];
    assert_eq!(body.position.z, -2.0);
    assert!(body.velocity.z > 0.0);
}

#[test]
fn test_velocity_capped_after_friction() {
    let config = still_config().with_max_velocity(0.1);
    let mut field = single_body(&config, Vec3::ZERO, Vec3::new(0.3, 0.4, 0.0));

    field.step(&Vec2::ZERO);

    let body = &field.bodies()[0];
    assert_relative_eq!(body.speed(), 0.1, epsilon = 1e-6);
    // Direction is preserved by the cap.
    assert_relative_eq!(body.velocity.x / body.velocity.y, 0.75, epsilon = 1e-5);
}

#[test]
fn test_rotation_advances_every_frame() {
    let config = still_config();
    let mut field = single_body(&config, Vec3::ZERO, Vec3::ZERO);

    for _ in 0..10 {
        field.step(&Vec2::ZERO);
    }

    let rotation = field.bodies()[0].rotation;
    assert_relative_eq!(rotation.x, 0.1, epsilon = 1e-5);
    assert_relative_eq!(rotation.y, 0.1, epsilon = 1e-5);
    assert_eq!(field.frame(), 10);
}

// ============================================================================
// Pointer attraction
// ============================================================================

#[test]
fn test_pointer_pulls_nearby_body() {
    let config = still_config().with_follow_cursor(true);
    let mut field = single_body(&config, Vec3::ZERO, Vec3::ZERO);

    // Pointer (0.2, 0) maps to (1, 0, 0), one unit away.
    field.step(&Vec2::new(0.2, 0.0));

    let body = &field.bodies()[0];
    assert_relative_eq!(body.velocity.x, ATTRACTION_FORCE, epsilon = 1e-7);
    assert_relative_eq!(body.velocity.y, 0.0);
    assert_relative_eq!(body.position.x, ATTRACTION_FORCE, epsilon = 1e-7);
}

#[test]
fn test_pointer_ignores_distant_body() {
    let config = still_config().with_follow_cursor(true);
    let far = Vec3::new(-4.0, 0.0, 0.0);
    let mut field = single_body(&config, far, Vec3::ZERO);

    field.step(&Vec2::new(0.2, 0.0));

    let body = &field.bodies()[0];
    assert!(body.position.distance(Vec3::X) > ATTRACTION_RADIUS);
    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(body.position, far);
}

#[test]
fn test_follow_cursor_disabled_ignores_pointer() {
    let config = SimulationConfig::default()
        .with_count(50)
        .with_seed(11)
        .with_follow_cursor(false);
    let mut still = ParticleField::new(&config);
    let mut chased = ParticleField::new(&config);
    let pointer = PointerSlot::new();

    for frame in 0..120 {
        pointer.set(Vec2::new((frame as f32 * 0.1).cos(), (frame as f32 * 0.1).sin()));
        still.step(&Vec2::ZERO);
        chased.step(&pointer);
    }

    assert_eq!(still.bodies(), chased.bodies());
}
