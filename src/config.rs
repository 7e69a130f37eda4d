//! Simulation configuration.
//!
//! [`SimulationConfig`] is the only boundary surface of the simulator. Every
//! field has a default, can be overridden with a `with_*` builder method, and
//! can be loaded from a YAML file where all keys are optional.
//!
//! ```ignore
//! let config = SimulationConfig::default()
//!     .with_count(120)
//!     .with_gravity(0.005)
//!     .with_follow_cursor(false);
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Half extents of the rectangular volume bodies are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Whether `p` lies inside the closed box.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() <= self.x && p.y.abs() <= self.y && p.z.abs() <= self.z
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(5.0, 4.0, 2.5)
    }
}

/// Scene lighting. Rendering only, never read by the physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Ambient light color, `0xRRGGBB`.
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    /// Intensity of the white directional light.
    pub light_intensity: f32,
    /// Position the directional light shines from, towards the origin.
    pub light_position: Vec3,
}

/// Immutable parameter set a [`ParticleField`](crate::ParticleField) is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of bodies simulated.
    pub count: usize,
    /// Downward acceleration applied per frame.
    pub gravity: f32,
    /// Per-frame velocity decay multiplier, in `(0, 1]`.
    pub friction: f32,
    /// Restitution coefficient on boundary collision, in `(0, 1]`.
    pub wall_bounce: f32,
    /// Enable the pointer attraction force.
    pub follow_cursor: bool,
    /// Palette bodies sample their color from, `0xRRGGBB` each.
    pub colors: Vec<u32>,
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub light_intensity: f32,
    /// Smallest body scale.
    pub min_size: f32,
    /// Largest body scale.
    pub max_size: f32,
    /// Hard speed ceiling.
    pub max_velocity: f32,
    /// Clamp box half extents.
    pub bounds: Bounds,
    /// Seed for construction. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: 80,
            gravity: 0.01,
            friction: 0.9975,
            wall_bounce: 0.95,
            follow_cursor: true,
            colors: vec![0x00d4ff, 0x8b5cf6, 0xf59e0b, 0xef4444, 0x10b981],
            ambient_color: 0x404040,
            ambient_intensity: 0.4,
            light_intensity: 1.0,
            min_size: 0.1,
            max_size: 0.3,
            max_velocity: 0.1,
            bounds: Bounds::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Render every field as YAML that [`from_yaml_str`](Self::from_yaml_str)
    /// reads back unchanged.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that numeric ranges are sane.
    ///
    /// The simulator never calls this; out-of-range values there simply give
    /// odd motion. Hosts that take user input should.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn bad(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::OutOfRange { field, reason })
        }

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return bad("friction", "must be in (0, 1]");
        }
        if !(self.wall_bounce > 0.0 && self.wall_bounce <= 1.0) {
            return bad("wall_bounce", "must be in (0, 1]");
        }
        if !(self.min_size >= 0.0) {
            return bad("min_size", "must be non-negative");
        }
        if self.min_size > self.max_size {
            return bad("min_size", "must not exceed max_size");
        }
        if !(self.max_velocity >= 0.0) {
            return bad("max_velocity", "must be non-negative");
        }
        if !(self.bounds.x > 0.0 && self.bounds.y > 0.0 && self.bounds.z > 0.0) {
            return bad("bounds", "all half extents must be positive");
        }
        if self.colors.iter().any(|&c| c > 0xff_ffff) {
            return bad("colors", "entries must be 24-bit 0xRRGGBB values");
        }
        Ok(())
    }

    pub fn lighting(&self) -> Lighting {
        Lighting {
            ambient_color: self.ambient_color,
            ambient_intensity: self.ambient_intensity,
            light_intensity: self.light_intensity,
            light_position: Vec3::new(5.0, 5.0, 5.0),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_wall_bounce(mut self, wall_bounce: f32) -> Self {
        self.wall_bounce = wall_bounce;
        self
    }

    pub fn with_follow_cursor(mut self, follow: bool) -> Self {
        self.follow_cursor = follow;
        self
    }

    pub fn with_colors(mut self, colors: impl Into<Vec<u32>>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_ambient(mut self, color: u32, intensity: f32) -> Self {
        self.ambient_color = color;
        self.ambient_intensity = intensity;
        self
    }

    pub fn with_light_intensity(mut self, intensity: f32) -> Self {
        self.light_intensity = intensity;
        self
    }

    /// Set the scale sampling range `[min, max]`.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Convert a `0xRRGGBB` sRGB color to linear RGB in `0.0..=1.0`.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    fn channel(c: u32) -> f32 {
        let c = (c & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec3::new(channel(hex >> 16), channel(hex >> 8), channel(hex))
}
