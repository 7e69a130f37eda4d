//! The seam between the simulation and whatever draws it.

use crate::body::BodyInstance;
use crate::camera::SwayCamera;

/// A drawable target bodies are handed to once per frame.
///
/// [`gpu::Renderer`](crate::gpu::Renderer) is the real implementation.
pub trait RenderSurface {
    /// Current size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Match a new viewport size. Zero-sized requests are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of `instances` seen from `camera`.
    fn render(
        &mut self,
        camera: &SwayCamera,
        instances: &[BodyInstance],
    ) -> Result<(), wgpu::SurfaceError>;

    /// Free every graphics resource. Safe to call more than once; later
    /// calls and later renders do nothing.
    fn release(&mut self);
}
