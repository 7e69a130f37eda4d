//! UV sphere mesh shared by every body.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

/// Mesh vertex. Matches `VertexInput` in `ball.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh of a unit sphere.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u16>,
}

impl SphereMesh {
    /// Build a radius-1 sphere with `width_segments` around the equator and
    /// `height_segments` from pole to pole. Triangles wind counter-clockwise
    /// seen from outside; the degenerate triangles at the poles are skipped.
    pub fn new(width_segments: u16, height_segments: u16) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);

        let mut vertices = Vec::with_capacity(usize::from(w + 1) * usize::from(h + 1));
        for iy in 0..=h {
            let v = f32::from(iy) / f32::from(h);
            let (sin_v, cos_v) = (v * PI).sin_cos();
            for ix in 0..=w {
                let u = f32::from(ix) / f32::from(w);
                let (sin_u, cos_u) = (u * TAU).sin_cos();
                let p = [-cos_u * sin_v, cos_v, sin_u * sin_v];
                vertices.push(SphereVertex {
                    position: p,
                    normal: p,
                });
            }
        }

        let row = w + 1;
        let at = |ix: u16, iy: u16| iy * row + ix;
        let mut indices = Vec::new();
        for iy in 0..h {
            for ix in 0..w {
                let a = at(ix + 1, iy);
                let b = at(ix, iy);
                let c = at(ix, iy + 1);
                let d = at(ix + 1, iy + 1);
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::new(16, 16)
    }
}
