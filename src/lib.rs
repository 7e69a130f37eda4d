//! # Ballpit
//!
//! A physics-driven field of colored spheres that drift under gravity, bounce
//! off the walls of a box and are pulled toward the mouse pointer.
//!
//! The simulation runs on the CPU, one fixed step per displayed frame. Drawing
//! goes through wgpu: every body is an instance of a shared sphere mesh, lit
//! by an ambient term plus one point light, on a transparent surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ballpit::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let config = SimulationConfig::default()
//!         .with_count(120)
//!         .with_gravity(0.002)
//!         .with_colors(vec![0xff6b6b, 0x4ecdc4, 0xffe66d]);
//!     ballpit::run(config)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! [`ParticleField`] owns the bodies and advances them with
//! [`ParticleField::step`]. Each step, in order:
//!
//! - gravity pulls the velocity down
//! - bodies near the pointer target are nudged toward it
//! - velocity is added to position
//! - bodies past a wall are clamped onto it and bounced
//! - friction damps the velocity, then its length is capped
//!
//! ### Mounting
//!
//! [`Ballpit::mount`] builds a field, starts a [`Scheduler`], subscribes to
//! host events on an [`EventHub`] and takes ownership of a [`RenderSurface`].
//! [`Ballpit::teardown`] (also run on drop) releases all of it exactly once.
//!
//! The scheduler and surface are traits so the frame loop can be driven by
//! hand in tests:
//!
//! ```ignore
//! let clock = ManualClock::new();
//! let mut pit = Ballpit::mount(&config, FrameScheduler::new(clock.clone()), surface, &hub);
//! clock.advance(Duration::from_millis(16));
//! pit.frame()?;
//! ```
//!
//! ### Pointer
//!
//! Host pointer events are normalized to [-1, 1] on both axes (y up) and
//! written to a [`PointerSlot`]. The step reads the slot once per frame, so
//! the last position written before a frame wins.

pub mod ballpit;
pub mod body;
pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod listeners;
pub mod pointer;
pub mod scheduler;
pub mod surface;
pub mod time;
mod window;

pub use ballpit::{Ballpit, Scene};
pub use body::{Body, BodyInstance};
pub use bytemuck;
pub use camera::SwayCamera;
pub use config::{Bounds, Lighting, SimulationConfig};
pub use error::{ConfigError, GpuError, SimulationError};
pub use field::ParticleField;
pub use glam::{Vec2, Vec3};
pub use gpu::Renderer;
pub use input::Input;
pub use listeners::{EventHub, HostEvent, ListenerGuard};
pub use pointer::{PointerSlot, PointerSource};
pub use scheduler::{FrameScheduler, FrameTime, Scheduler};
pub use surface::RenderSurface;
pub use time::{Clock, ManualClock, SystemClock, Time};
pub use window::BallpitApp;

use winit::event_loop::{ControlFlow, EventLoop};

/// Open a window and run the ball pit until it is closed.
pub fn run(config: SimulationConfig) -> Result<(), SimulationError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BallpitApp::new(config);
    event_loop.run_app(&mut app)?;
    app.into_result()
}

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use ballpit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ballpit::{Ballpit, Scene};
    pub use crate::body::Body;
    pub use crate::camera::SwayCamera;
    pub use crate::config::{Bounds, SimulationConfig};
    pub use crate::error::SimulationError;
    pub use crate::field::ParticleField;
    pub use crate::listeners::{EventHub, HostEvent};
    pub use crate::pointer::{PointerSlot, PointerSource};
    pub use crate::scheduler::{FrameScheduler, Scheduler};
    pub use crate::surface::RenderSurface;
    pub use crate::time::{ManualClock, SystemClock};
    pub use crate::{Vec2, Vec3};
}
