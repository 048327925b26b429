use std::sync::Arc;

use tracing::{info, warn};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::math::{ShapeId, TriangleMesh};
use crate::renderer::mesh_buffers::{MeshLibrary, normal_layout, position_layout};
use crate::renderer::uniforms::DrawUniforms;
use crate::scene::{DrawCommand, Program};

pub const MAX_DRAWS: usize = 64;

const UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;

/// Distance between per-draw uniform slots for the device's offset alignment.
pub fn uniform_stride(alignment: u32) -> u64 {
    wgpu::util::align_to(UNIFORM_SIZE, alignment.max(1) as u64)
}

/// Lays out one uniform block per command, `stride` bytes apart. Commands
/// past [`MAX_DRAWS`] are dropped.
pub fn pack_draws(commands: &[DrawCommand], stride: u64) -> Vec<u8> {
    let count = commands.len().min(MAX_DRAWS);
    let stride = stride as usize;
    let mut bytes = vec![0u8; count * stride];
    for (slot, cmd) in commands.iter().take(count).enumerate() {
        let uniforms = DrawUniforms::from_command(cmd);
        let start = slot * stride;
        bytes[start..start + UNIFORM_SIZE as usize]
            .copy_from_slice(bytemuck::bytes_of(&uniforms));
    }
    bytes
}

async fn checked<T>(
    device: &wgpu::Device,
    label: &'static str,
    build: impl FnOnce() -> T,
) -> Result<T, DemoError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    match device.pop_error_scope().await {
        Some(err) => Err(DemoError::ShaderCompile {
            label,
            message: err.to_string(),
        }),
        None => Ok(value),
    }
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,

    pipelines: [wgpu::RenderPipeline; Program::ALL.len()],

    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,

    meshes: MeshLibrary,

    depth_texture: wgpu::TextureView,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, demo: &DemoConfig) -> Result<Self, DemoError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(DemoError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            "using GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Demo Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(DemoError::NoAdapter)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if demo.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = checked(&device, "shaders", || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Shape Shaders"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
            })
        })
        .await?;

        let draw_stride = uniform_stride(device.limits().min_uniform_buffer_offset_alignment);

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniform Buffer"),
            size: draw_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                    },
                    count: None,
                }],
            });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout: &draw_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(UNIFORM_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&draw_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = Vec::with_capacity(Program::ALL.len());
        for program in Program::ALL {
            let pipeline = checked(&device, program.label(), || {
                Self::create_pipeline(&device, &pipeline_layout, &shader, config.format, program)
            })
            .await?;
            pipelines.push(pipeline);
        }
        let pipelines: [wgpu::RenderPipeline; Program::ALL.len()] = pipelines
            .try_into()
            .map_err(|_| DemoError::ShaderCompile {
                label: "pipelines",
                message: "pipeline count mismatch".into(),
            })?;

        let depth_texture = Self::create_depth_texture(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            pipelines,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            meshes: MeshLibrary::default(),
            depth_texture,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        program: Program,
    ) -> wgpu::RenderPipeline {
        let topology = if program.is_wireframe() {
            wgpu::PrimitiveTopology::LineList
        } else {
            wgpu::PrimitiveTopology::TriangleList
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(program.label()),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[position_layout(), normal_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(program.fragment_entry()),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn upload_meshes(&mut self, meshes: Vec<(ShapeId, TriangleMesh)>) {
        self.meshes = MeshLibrary::upload(&self.device, meshes);
    }

    /// Uploads per-draw uniforms and returns how many slots were filled.
    pub fn write_draws(&self, commands: &[DrawCommand]) -> usize {
        if commands.len() > MAX_DRAWS {
            warn!(
                requested = commands.len(),
                max = MAX_DRAWS,
                "draw list truncated"
            );
        }
        let bytes = pack_draws(commands, self.draw_stride);
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.draw_buffer, 0, &bytes);
        }
        commands.len().min(MAX_DRAWS)
    }

    pub fn render_scene(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        commands: &[DrawCommand],
    ) {
        let slots = self.write_draws(commands);

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let mut bound = None;
        for (slot, cmd) in commands.iter().take(slots).enumerate() {
            let Some(mesh) = self.meshes.get(cmd.shape) else {
                continue;
            };
            if bound != Some(cmd.program) {
                render_pass.set_pipeline(&self.pipelines[cmd.program as usize]);
                bound = Some(cmd.program);
            }
            let offset = (slot as u64 * self.draw_stride) as u32;
            render_pass.set_bind_group(0, &self.draw_bind_group, &[offset]);
            mesh.draw(&mut render_pass, cmd.program.is_wireframe());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Program;
    use glam::{Mat4, Vec2, Vec3};

    fn command(shininess: f32) -> DrawCommand {
        DrawCommand {
            shape: ShapeId::Sphere,
            program: Program::Grey,
            transform: Mat4::IDENTITY,
            color: Vec3::ONE,
            shininess,
            mouse: Vec2::ZERO,
        }
    }

    #[test]
    fn test_uniform_stride_alignment() {
        assert_eq!(UNIFORM_SIZE, 160);
        assert_eq!(uniform_stride(256), 256);
        assert_eq!(uniform_stride(64), 192);
        assert_eq!(uniform_stride(0), 160);
    }

    #[test]
    fn test_pack_draws_slots() {
        let bytes = pack_draws(&[command(1.0), command(2.0)], 256);
        assert_eq!(bytes.len(), 512);

        // shininess is the last float of `material`, at byte 140 of a slot
        let shininess = |slot: usize| {
            let at = slot * 256 + 140;
            f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        assert_eq!(shininess(0), 1.0);
        assert_eq!(shininess(1), 2.0);
        assert!(bytes[160..256].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pack_draws_truncates() {
        let commands = vec![command(8.0); MAX_DRAWS + 5];
        assert_eq!(pack_draws(&commands, 256).len(), MAX_DRAWS * 256);
    }
}
