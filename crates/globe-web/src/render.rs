//! WebGPU state: globe shells, instanced flat pass for markers, tubes and
//! airplanes, plus per-connection tube meshes that are disposed and rebuilt
//! when the connection set changes.

use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

use globe_core::constants::{
    ATMOSPHERE_RADIUS, CLOUD_RADIUS, GLOBE_RADIUS, TUBE_SEGMENTS,
};
use globe_core::geometry::{self, Mesh};
use globe_core::paths::ConnectionPath;

use crate::constants::CLEAR_COLOR;

pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");
pub static FLAT_WGSL: &str = include_str!("../shaders/flat.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const INSTANCE_CAPACITY: usize = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobeUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FlatUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
}

/// One instanced draw of the flat pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: f32,
    pub _pad: [f32; 3],
}

impl Instance {
    pub fn new(model: Mat4, color: [f32; 4], emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            emissive,
            _pad: [0.0; 3],
        }
    }
}

/// Everything the renderer needs for one frame, assembled by the frame loop.
#[derive(Default)]
pub struct DrawList {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub eye: Vec3,
    pub time_s: f32,
    pub shell_opacity: f32,
    pub cloud_yaw: f32,
    pub spheres: Vec<Instance>,
    pub spikes: Vec<Instance>,
    pub rings: Vec<Instance>,
    pub planes: Vec<Instance>,
    /// One entry per connection tube, parallel to the uploaded tube meshes.
    pub tubes: Vec<Instance>,
}

struct GpuMesh {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
}

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &Mesh) -> GpuMesh {
    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buf,
        index_buf,
        index_count: mesh.indices.len() as u32,
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globe_pipeline: wgpu::RenderPipeline,
    cloud_pipeline: wgpu::RenderPipeline,
    atmosphere_pipeline: wgpu::RenderPipeline,
    globe_uniform_buffer: wgpu::Buffer,
    globe_bind_group: wgpu::BindGroup,
    globe_mesh: GpuMesh,
    cloud_mesh: GpuMesh,
    atmosphere_mesh: GpuMesh,

    flat_pipeline: wgpu::RenderPipeline,
    flat_uniform_buffer: wgpu::Buffer,
    flat_bind_group: wgpu::BindGroup,
    sphere_mesh: GpuMesh,
    spike_mesh: GpuMesh,
    ring_mesh: GpuMesh,
    airplane_mesh: GpuMesh,
    tube_meshes: Vec<GpuMesh>,

    instance_buf: wgpu::Buffer,
    instance_capacity: usize,

    width: u32,
    height: u32,
}

fn make_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
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
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 6) as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 12,
            shader_location: 1,
        },
    ],
};

const INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Instance>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 0, shader_location: 2 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 16, shader_location: 3 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 32, shader_location: 4 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 48, shader_location: 5 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 64, shader_location: 6 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32, offset: 80, shader_location: 7 },
    ],
};

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = make_depth(&device, width, height);

        let globe_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });
        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat"),
            source: wgpu::ShaderSource::Wgsl(FLAT_WGSL.into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniforms"),
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
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });

        let globe_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globe uniforms"),
            size: std::mem::size_of::<GlobeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globe_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globe_uniform_buffer.as_entire_binding(),
            }],
        });
        let flat_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("flat uniforms"),
            size: std::mem::size_of::<FlatUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let flat_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("flat bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: flat_uniform_buffer.as_entire_binding(),
            }],
        });

        let shell_pipeline = |fs: &str, depth_write: bool, blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(fs),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &globe_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[VERTEX_LAYOUT],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &globe_shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let globe_pipeline = shell_pipeline("fs_surface", true, wgpu::BlendState::REPLACE);
        let cloud_pipeline = shell_pipeline("fs_clouds", false, wgpu::BlendState::ALPHA_BLENDING);
        let atmosphere_pipeline =
            shell_pipeline("fs_atmosphere", false, wgpu::BlendState::ALPHA_BLENDING);

        let flat_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("flat"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &flat_shader,
                entry_point: Some("vs_main"),
                buffers: &[VERTEX_LAYOUT, INSTANCE_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &flat_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let globe_mesh = upload_mesh(&device, "globe", &geometry::uv_sphere(GLOBE_RADIUS, 48, 64));
        let cloud_mesh = upload_mesh(&device, "clouds", &geometry::uv_sphere(CLOUD_RADIUS, 32, 48));
        let atmosphere_mesh =
            upload_mesh(&device, "atmosphere", &geometry::uv_sphere(ATMOSPHERE_RADIUS, 32, 48));
        let sphere_mesh = upload_mesh(&device, "unit sphere", &geometry::uv_sphere(1.0, 12, 16));
        let spike_mesh = upload_mesh(&device, "spike", &geometry::cylinder(1.0, 1.0, 8));
        let ring_mesh = upload_mesh(
            &device,
            "ring",
            &geometry::ring(
                globe_core::constants::MARKER_RING_INNER,
                globe_core::constants::MARKER_RING_OUTER,
                32,
            ),
        );
        let airplane_mesh = upload_mesh(&device, "airplane", &geometry::airplane());

        let instance_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (std::mem::size_of::<Instance>() * INSTANCE_CAPACITY) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globe_pipeline,
            cloud_pipeline,
            atmosphere_pipeline,
            globe_uniform_buffer,
            globe_bind_group,
            globe_mesh,
            cloud_mesh,
            atmosphere_mesh,
            flat_pipeline,
            flat_uniform_buffer,
            flat_bind_group,
            sphere_mesh,
            spike_mesh,
            ring_mesh,
            airplane_mesh,
            tube_meshes: Vec::new(),
            instance_buf,
            instance_capacity: INSTANCE_CAPACITY,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = make_depth(&self.device, width, height);
        }
    }

    /// Drop the previous tube meshes and upload one per connection. The old
    /// buffers are destroyed explicitly rather than waiting for GC.
    pub fn rebuild_tubes(&mut self, paths: &[ConnectionPath]) {
        for m in self.tube_meshes.drain(..) {
            m.vertex_buf.destroy();
            m.index_buf.destroy();
        }
        for (i, p) in paths.iter().enumerate() {
            let mesh = geometry::tube(&p.curve, TUBE_SEGMENTS);
            self.tube_meshes
                .push(upload_mesh(&self.device, &format!("tube {i}"), &mesh));
        }
        log::info!("[render] uploaded {} connection tubes", self.tube_meshes.len());
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        self.instance_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (std::mem::size_of::<Instance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.instance_capacity = capacity;
    }

    pub fn render(&mut self, dl: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let eye = dl.eye.extend(1.0);
        self.queue.write_buffer(
            &self.globe_uniform_buffer,
            0,
            bytemuck::bytes_of(&GlobeUniforms {
                view_proj: dl.view_proj.to_cols_array_2d(),
                model: dl.model.to_cols_array_2d(),
                camera_pos: eye.to_array(),
                params: [dl.time_s, dl.shell_opacity, dl.cloud_yaw, 0.0],
            }),
        );
        self.queue.write_buffer(
            &self.flat_uniform_buffer,
            0,
            bytemuck::bytes_of(&FlatUniforms {
                view_proj: dl.view_proj.to_cols_array_2d(),
                camera_pos: eye.to_array(),
            }),
        );

        // Concatenate all instances into one upload; remember slice offsets.
        let mut instances: Vec<Instance> = Vec::with_capacity(
            dl.spheres.len() + dl.spikes.len() + dl.rings.len() + dl.planes.len() + dl.tubes.len(),
        );
        let spheres = 0..dl.spheres.len() as u32;
        instances.extend_from_slice(&dl.spheres);
        let spikes = spheres.end..spheres.end + dl.spikes.len() as u32;
        instances.extend_from_slice(&dl.spikes);
        let rings = spikes.end..spikes.end + dl.rings.len() as u32;
        instances.extend_from_slice(&dl.rings);
        let planes = rings.end..rings.end + dl.planes.len() as u32;
        instances.extend_from_slice(&dl.planes);
        let tubes_start = planes.end;
        instances.extend_from_slice(&dl.tubes);

        self.ensure_instance_capacity(instances.len());
        self.queue
            .write_buffer(&self.instance_buf, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("encoder") });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
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
            });

            // Opaque globe first.
            rpass.set_pipeline(&self.globe_pipeline);
            rpass.set_bind_group(0, &self.globe_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.globe_mesh.vertex_buf.slice(..));
            rpass.set_index_buffer(self.globe_mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.globe_mesh.index_count, 0, 0..1);

            // Translucent entities on top, depth-tested against the globe.
            rpass.set_pipeline(&self.flat_pipeline);
            rpass.set_bind_group(0, &self.flat_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buf.slice(..));

            for (i, tube) in self.tube_meshes.iter().enumerate().take(dl.tubes.len()) {
                let k = tubes_start + i as u32;
                rpass.set_vertex_buffer(0, tube.vertex_buf.slice(..));
                rpass.set_index_buffer(tube.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..tube.index_count, 0, k..k + 1);
            }

            let mut draw_kind = |rpass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, range: std::ops::Range<u32>| {
                if range.is_empty() {
                    return;
                }
                rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
                rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, range);
            };
            draw_kind(&mut rpass, &self.sphere_mesh, spheres);
            draw_kind(&mut rpass, &self.spike_mesh, spikes);
            draw_kind(&mut rpass, &self.ring_mesh, rings);
            draw_kind(&mut rpass, &self.airplane_mesh, planes);

            // Shells last so they tint everything behind them.
            rpass.set_pipeline(&self.cloud_pipeline);
            rpass.set_bind_group(0, &self.globe_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.cloud_mesh.vertex_buf.slice(..));
            rpass.set_index_buffer(self.cloud_mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.cloud_mesh.index_count, 0, 0..1);

            rpass.set_pipeline(&self.atmosphere_pipeline);
            rpass.set_vertex_buffer(0, self.atmosphere_mesh.vertex_buf.slice(..));
            rpass.set_index_buffer(
                self.atmosphere_mesh.index_buf.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            rpass.draw_indexed(0..self.atmosphere_mesh.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release everything held on the GPU side. Idempotent.
    pub fn dispose(&mut self) {
        for m in self.tube_meshes.drain(..) {
            m.vertex_buf.destroy();
            m.index_buf.destroy();
        }
        self.instance_buf.destroy();
    }
}
