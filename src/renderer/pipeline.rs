//! WebGPU backend that executes a `FramePlan`
//!
//! Meshes and textures arrive from the asset loader through `upload_mesh` and
//! `upload_texture`. Each frame the per-pass camera uniforms and per-draw model
//! uniforms are packed at dynamic offsets, then both passes are encoded into a
//! single render pass with their own viewport and scissor.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use super::compose::{FramePlan, MeshKind, Program, Rect, TextureKind};
use super::texture::mip_chain;
use super::vertex::{CameraUniform, DrawUniform, MeshVertex, aligned_stride};
use crate::error::{Result, SceneError};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Initial per-draw uniform slots; grows on demand
const INITIAL_DRAW_CAPACITY: usize = 256;
/// Camera slots, one per pass
const MAX_PASSES: usize = 4;

pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ClearUniform {
    color: [f32; 4],
}

pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,

    textured_pipeline: wgpu::RenderPipeline,
    color_pipeline: wgpu::RenderPipeline,
    clear_pipeline: wgpu::RenderPipeline,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    camera_stride: u64,

    draw_layout: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,
    draw_capacity: usize,

    clear_buffer: wgpu::Buffer,
    clear_bind_group: wgpu::BindGroup,

    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    depth_view: wgpu::TextureView,

    meshes: HashMap<MeshKind, GpuMesh>,
    textures: HashMap<TextureKind, GpuTexture>,

    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> std::result::Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("maze-runner-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let camera_stride = aligned_stride(std::mem::size_of::<CameraUniform>(), alignment);
        let draw_stride = aligned_stride(std::mem::size_of::<DrawUniform>(), alignment);

        let camera_layout = dynamic_uniform_layout(&device, "camera_layout", std::mem::size_of::<CameraUniform>());
        let draw_layout = dynamic_uniform_layout(&device, "draw_layout", std::mem::size_of::<DrawUniform>());
        let clear_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("clear_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: camera_stride * MAX_PASSES as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = dynamic_uniform_bind_group(
            &device,
            &camera_layout,
            &camera_buffer,
            std::mem::size_of::<CameraUniform>(),
        );

        let draw_buffer = create_draw_buffer(&device, draw_stride, INITIAL_DRAW_CAPACITY);
        let draw_bind_group = dynamic_uniform_bind_group(
            &device,
            &draw_layout,
            &draw_buffer,
            std::mem::size_of::<DrawUniform>(),
        );

        let clear_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("clear_uniform"),
            contents: bytemuck::bytes_of(&ClearUniform { color: [0.0; 4] }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let clear_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clear_bind_group"),
            layout: &clear_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: clear_buffer.as_entire_binding(),
            }],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let clear_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("clear_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("clear.wgsl").into()),
        });

        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &draw_layout, &texture_layout],
            immediate_size: 0,
        });
        let color_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("color_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &draw_layout],
            immediate_size: 0,
        });
        let clear_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("clear_pipeline_layout"),
            bind_group_layouts: &[&clear_layout],
            immediate_size: 0,
        });

        let textured_pipeline = mesh_pipeline(
            &device,
            "textured_pipeline",
            &textured_layout,
            &scene_shader,
            "fs_textured",
            config.format,
        );
        let color_pipeline = mesh_pipeline(
            &device,
            "color_pipeline",
            &color_layout,
            &scene_shader,
            "fs_color",
            config.format,
        );
        let clear_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("clear_pipeline"),
            layout: Some(&clear_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &clear_shader,
                entry_point: Some("vs_main"),
                buffers: &[], // Fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &clear_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // Overwrite depth with the far plane inside the scissor
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("albedo_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let depth_view = create_depth_view(&device, width, height);

        log::info!("Render state ready ({}x{})", width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            textured_pipeline,
            color_pipeline,
            clear_pipeline,
            camera_buffer,
            camera_bind_group,
            camera_stride,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            draw_capacity: INITIAL_DRAW_CAPACITY,
            clear_buffer,
            clear_bind_group,
            texture_layout,
            sampler,
            depth_view,
            meshes: HashMap::new(),
            textures: HashMap::new(),
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, new_width, new_height);
        }
    }

    /// Upload geometry for a mesh slot, replacing any previous upload
    pub fn upload_mesh(&mut self, kind: MeshKind, vertices: &[MeshVertex], indices: &[u32]) -> Result<()> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(SceneError::InvalidAsset(format!("{kind:?} mesh is empty")));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(SceneError::InvalidAsset(format!(
                "{kind:?} index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!("Uploaded mesh {:?}: {} vertices, {} indices", kind, vertices.len(), indices.len());
        self.meshes.insert(
            kind,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
            },
        );
        Ok(())
    }

    /// Upload RGBA8 pixels for a texture slot
    pub fn upload_texture(&mut self, kind: TextureKind, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(SceneError::InvalidAsset(format!(
                "{kind:?} texture {width}x{height} expects {expected} bytes, got {}",
                rgba.len()
            )));
        }
        let chain = mip_chain(width, height, rgba);
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("albedo_texture"),
            size,
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        for (level, mip) in chain.iter().enumerate() {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &mip.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width),
                    rows_per_image: Some(mip.height),
                },
                wgpu::Extent3d {
                    width: mip.width,
                    height: mip.height,
                    depth_or_array_layers: 1,
                },
            );
        }
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("albedo_bind_group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        log::debug!("Uploaded texture {:?}: {}x{}, {} mips", kind, width, height, chain.len());
        self.textures.insert(
            kind,
            GpuTexture {
                bind_group,
                _texture: texture,
            },
        );
        Ok(())
    }

    /// Grow the per-draw uniform buffer to hold at least `draws` slots
    fn ensure_draw_capacity(&mut self, draws: usize) {
        if draws <= self.draw_capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        self.draw_buffer = create_draw_buffer(&self.device, self.draw_stride, capacity);
        self.draw_bind_group = dynamic_uniform_bind_group(
            &self.device,
            &self.draw_layout,
            &self.draw_buffer,
            std::mem::size_of::<DrawUniform>(),
        );
        self.draw_capacity = capacity;
        log::debug!("Draw uniform capacity grown to {}", capacity);
    }

    /// Write uniforms for the plan and draw both passes
    pub fn render(&mut self, plan: &FramePlan) -> std::result::Result<(), wgpu::SurfaceError> {
        let passes = &plan.passes[..plan.passes.len().min(MAX_PASSES)];
        let total_draws: usize = passes.iter().map(|p| p.draws.len()).sum();
        self.ensure_draw_capacity(total_draws.max(1));

        let mut camera_bytes = vec![0u8; self.camera_stride as usize * passes.len()];
        for (i, pass) in passes.iter().enumerate() {
            let uniform = CameraUniform::new(&pass.camera, &plan.light);
            let at = i * self.camera_stride as usize;
            camera_bytes[at..at + std::mem::size_of::<CameraUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        let mut draw_bytes = vec![0u8; self.draw_stride as usize * total_draws];
        for (i, draw) in passes.iter().flat_map(|p| p.draws.iter()).enumerate() {
            let uniform = DrawUniform::new(draw);
            let at = i * self.draw_stride as usize;
            draw_bytes[at..at + std::mem::size_of::<DrawUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        if !camera_bytes.is_empty() {
            self.queue.write_buffer(&self.camera_buffer, 0, &camera_bytes);
        }
        if !draw_bytes.is_empty() {
            self.queue.write_buffer(&self.draw_buffer, 0, &draw_bytes);
        }
        self.queue.write_buffer(
            &self.clear_buffer,
            0,
            bytemuck::bytes_of(&ClearUniform {
                color: plan.clear_color,
            }),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = plan.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let mut draw_index = 0u64;
            for (pass_index, pass) in passes.iter().enumerate() {
                let (Some(viewport), Some(scissor)) = (
                    clamp_rect(pass.viewport, self.size),
                    clamp_rect(pass.scissor, self.size),
                ) else {
                    draw_index += pass.draws.len() as u64;
                    continue;
                };

                render_pass.set_viewport(
                    viewport.x as f32,
                    viewport.y as f32,
                    viewport.width as f32,
                    viewport.height as f32,
                    0.0,
                    1.0,
                );
                let scissor = if pass.scissor_test {
                    scissor
                } else {
                    Rect::new(0, 0, self.size.0, self.size.1)
                };
                render_pass.set_scissor_rect(scissor.x, scissor.y, scissor.width, scissor.height);

                if pass.scissor_test {
                    render_pass.set_pipeline(&self.clear_pipeline);
                    render_pass.set_bind_group(0, &self.clear_bind_group, &[]);
                    render_pass.draw(0..3, 0..1);
                }

                let camera_offset = (pass_index as u64 * self.camera_stride) as u32;
                for draw in &pass.draws {
                    let draw_offset = (draw_index * self.draw_stride) as u32;
                    draw_index += 1;

                    let Some(mesh) = self.meshes.get(&draw.mesh) else {
                        continue;
                    };
                    match draw.program {
                        Program::Textured => {
                            let Some(texture) = draw.texture.and_then(|t| self.textures.get(&t)) else {
                                continue;
                            };
                            render_pass.set_pipeline(&self.textured_pipeline);
                            render_pass.set_bind_group(2, &texture.bind_group, &[]);
                        }
                        Program::Color => render_pass.set_pipeline(&self.color_pipeline),
                    }
                    render_pass.set_bind_group(0, &self.camera_bind_group, &[camera_offset]);
                    render_pass.set_bind_group(1, &self.draw_bind_group, &[draw_offset]);
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Clip a rectangle to the render target; `None` when nothing remains
pub fn clamp_rect(rect: Rect, size: (u32, u32)) -> Option<Rect> {
    let x = rect.x.min(size.0);
    let y = rect.y.min(size.1);
    let width = rect.width.min(size.0 - x);
    let height = rect.height.min(size.1 - y);
    (width > 0 && height > 0).then_some(Rect::new(x, y, width, height))
}

fn dynamic_uniform_layout(device: &wgpu::Device, label: &str, size: usize) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(size as u64),
            },
            count: None,
        }],
    })
}

fn dynamic_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    size: usize,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("dynamic_uniform_bind_group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(size as u64),
            }),
        }],
    })
}

fn create_draw_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw_uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn mesh_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
