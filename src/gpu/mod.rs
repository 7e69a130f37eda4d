//! wgpu renderer for the ball pit.
//!
//! Every body is an instance of one shared sphere mesh. Per frame the CPU
//! uploads the instance transforms and a small uniform block (camera and
//! lighting), then draws everything in a single instanced call onto a
//! transparent surface.

mod sphere;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use sphere::{SphereMesh, SphereVertex};

use crate::body::BodyInstance;
use crate::camera::SwayCamera;
use crate::config::{hex_to_linear, Lighting};
use crate::error::GpuError;
use crate::surface::RenderSurface;

pub const SHADER_SOURCE: &str = include_str!("ball.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SPHERE_SEGMENTS: u16 = 16;
const SHININESS: f32 = 100.0;
const OPACITY: f32 = 0.8;
const SPECULAR_STRENGTH: f32 = 0.067;
const MSAA_SAMPLES: u32 = 4;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4
];

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    material: [f32; 4],
}

impl Uniforms {
    pub(crate) fn new(camera: &SwayCamera, lighting: &Lighting) -> Self {
        let light_dir = lighting.light_position.normalize_or_zero();
        let ambient = hex_to_linear(lighting.ambient_color) * lighting.ambient_intensity;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            light: light_dir.extend(lighting.light_intensity).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            material: [SHININESS, OPACITY, SPECULAR_STRENGTH, 0.0],
        }
    }
}

/// GPU state for drawing bodies into a window.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sample_count: u32,
    targets: RenderTargets,
    lighting: Lighting,
    released: bool,
}

impl Renderer {
    /// Set up a surface on `window` sized for `capacity` bodies.
    pub async fn new(
        window: Arc<Window>,
        lighting: Lighting,
        capacity: usize,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let adapter_info = adapter.get_info();
        info!(
            "Using GPU adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = pick_alpha_mode(&surface_caps.alpha_modes);
        debug!("Surface format {:?}, alpha mode {:?}", surface_format, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count =
            pick_sample_count(adapter.get_texture_format_features(surface_format).flags);
        debug!("Rendering with {}x multisampling", sample_count);
        let targets = RenderTargets::new(&device, &config, sample_count);

        let mesh = SphereMesh::new(SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_capacity = capacity.max(1);
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        let uniforms = Uniforms::new(&SwayCamera::for_viewport(config.width, config.height), &lighting);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ball Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SphereVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &VERTEX_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRIBUTES,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            instance_buffer,
            instance_capacity,
            uniform_buffer,
            uniform_bind_group,
            sample_count,
            targets,
            lighting,
            released: false,
        })
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn ensure_capacity(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        debug!("Growing instance buffer {} -> {}", self.instance_capacity, capacity);
        self.instance_buffer.destroy();
        self.instance_buffer = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }
}

impl RenderSurface for Renderer {
    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.released || width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.destroy();
        self.targets = RenderTargets::new(&self.device, &self.config, self.sample_count);
        info!("Surface resized to {}x{}", width, height);
    }

    fn render(
        &mut self,
        camera: &SwayCamera,
        instances: &[BodyInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        if self.released {
            return Ok(());
        }

        self.ensure_capacity(instances.len());
        let uniforms = Uniforms::new(camera, &self.lighting);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.targets.color_view(&view),
                    resolve_target: self.targets.resolve_target(&view),
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: self.targets.color_store(),
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !instances.is_empty() {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..self.index_count, 0, 0..instances.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.instance_buffer.destroy();
        self.uniform_buffer.destroy();
        self.targets.destroy();
        info!("GPU resources released");
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.release();
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<BodyInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Prefer an alpha mode that composites the clear color as transparent.
fn pick_alpha_mode(supported: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    [
        wgpu::CompositeAlphaMode::PreMultiplied,
        wgpu::CompositeAlphaMode::PostMultiplied,
    ]
    .into_iter()
    .find(|mode| supported.contains(mode))
    .or_else(|| supported.first().copied())
    .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

fn pick_sample_count(flags: wgpu::TextureFormatFeatureFlags) -> u32 {
    if flags.sample_count_supported(MSAA_SAMPLES) {
        MSAA_SAMPLES
    } else {
        1
    }
}

/// Depth buffer plus, when multisampling, the color target resolved into the
/// swapchain image.
struct RenderTargets {
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
}

impl RenderTargets {
    fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, sample_count: u32) -> Self {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };
        let create = |label, format| {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            (texture, view)
        };

        let (depth_texture, depth_view) = create("Depth Texture", DEPTH_FORMAT);
        let msaa = (sample_count > 1).then(|| create("MSAA Color Texture", config.format));
        Self {
            depth_texture,
            depth_view,
            msaa,
        }
    }

    /// The view the render pass draws into.
    fn color_view<'a>(&'a self, frame: &'a wgpu::TextureView) -> &'a wgpu::TextureView {
        self.msaa.as_ref().map_or(frame, |(_, view)| view)
    }

    fn resolve_target<'a>(&self, frame: &'a wgpu::TextureView) -> Option<&'a wgpu::TextureView> {
        self.msaa.as_ref().map(|_| frame)
    }

    /// Multisampled color only lives until it is resolved.
    fn color_store(&self) -> wgpu::StoreOp {
        if self.msaa.is_some() {
            wgpu::StoreOp::Discard
        } else {
            wgpu::StoreOp::Store
        }
    }

    fn destroy(&self) {
        self.depth_texture.destroy();
        if let Some((texture, _)) = &self.msaa {
            texture.destroy();
        }
    }
}
