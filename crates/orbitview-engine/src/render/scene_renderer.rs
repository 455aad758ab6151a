use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::render::depth::DEPTH_FORMAT;
use crate::render::uniforms::{CameraUniform, ObjectUniform};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Scene, SceneObject, Side, Topology, Vertex};

/// Which of the three pipelines draws a mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum PipelineKind {
    /// Triangles, back faces culled.
    Front,
    /// Triangles, no culling.
    Double,
    Lines,
}

impl PipelineKind {
    pub(crate) fn for_object(object: &SceneObject) -> Self {
        if object.material.wireframe {
            return Self::Lines;
        }
        match (object.geometry.topology, object.material.side) {
            (Topology::Lines, _) => Self::Lines,
            (Topology::Triangles, Side::Front) => Self::Front,
            (Topology::Triangles, Side::Double) => Self::Double,
        }
    }
}

struct Pipelines {
    front: wgpu::RenderPipeline,
    double: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    camera_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    fn get(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::Front => &self.front,
            PipelineKind::Double => &self.double,
            PipelineKind::Lines => &self.lines,
        }
    }
}

/// GPU-side copy of one scene object.
struct GpuMesh {
    kind: PipelineKind,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws a [`Scene`] through a [`Camera`] with depth testing.
///
/// Geometry is uploaded the first time an object is seen and kept until its
/// pipeline kind changes; transforms and colors are rewritten every frame.
#[derive(Default)]
pub struct SceneRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<Pipelines>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    /// Indexed by `ObjectId`.
    meshes: Vec<Option<GpuMesh>>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently resident on the GPU.
    pub fn uploaded(&self) -> usize {
        self.meshes.iter().flatten().count()
    }

    /// Clears to the scene background, then draws every visible object.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &Scene, camera: &Camera) {
        self.ensure_pipelines(ctx);
        self.ensure_camera_binding(ctx);
        self.sync_meshes(ctx, scene);

        if let Some(ubo) = self.camera_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&CameraUniform::new(scene, camera)));
        }

        let Some(pipelines) = self.pipelines.as_ref() else { return };
        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orbitview scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.background.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, camera_bind_group, &[]);

        for (id, object) in scene.iter() {
            if !object.visible {
                continue;
            }
            let Some(Some(mesh)) = self.meshes.get(id.index()) else { continue };

            rpass.set_pipeline(pipelines.get(mesh.kind));
            rpass.set_bind_group(1, &mesh.bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orbitview scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let camera_layout = uniform_layout(ctx.device, "orbitview camera bgl", size_of_u64::<CameraUniform>());
        let object_layout = uniform_layout(ctx.device, "orbitview object bgl", size_of_u64::<ObjectUniform>());

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orbitview scene pipeline layout"),
            bind_group_layouts: &[&camera_layout, &object_layout],
            immediate_size: 0,
        });

        let build = |label: &str, topology: wgpu::PrimitiveTopology, cull_mode: Option<wgpu::Face>| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
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
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let pipelines = Pipelines {
            front: build(
                "orbitview front pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                Some(wgpu::Face::Back),
            ),
            double: build("orbitview double pipeline", wgpu::PrimitiveTopology::TriangleList, None),
            lines: build("orbitview lines pipeline", wgpu::PrimitiveTopology::LineList, None),
            camera_layout,
            object_layout,
        };

        log::debug!("scene pipelines built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipelines = Some(pipelines);

        // Bind groups were made against the old layouts.
        self.camera_ubo = None;
        self.camera_bind_group = None;
        self.meshes.clear();
    }

    fn ensure_camera_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bind_group.is_some() {
            return;
        }
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orbitview camera ubo"),
            size: size_of_u64::<CameraUniform>(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orbitview camera bind group"),
            layout: &pipelines.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(ubo);
        self.camera_bind_group = Some(bind_group);
    }

    /// Uploads new objects and refreshes per-object uniforms.
    fn sync_meshes(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        if self.meshes.len() < scene.len() {
            self.meshes.resize_with(scene.len(), || None);
        }

        for (id, object) in scene.iter() {
            let kind = PipelineKind::for_object(object);
            let slot = &mut self.meshes[id.index()];

            if slot.as_ref().is_none_or(|m| m.kind != kind) {
                *slot = upload(ctx, &pipelines.object_layout, object, kind);
            }

            if let Some(mesh) = slot.as_ref() {
                ctx.queue.write_buffer(&mesh.ubo, 0, bytemuck::bytes_of(&ObjectUniform::new(object)));
            }
        }
    }
}

fn upload(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    object: &SceneObject,
    kind: PipelineKind,
) -> Option<GpuMesh> {
    let geometry = object.render_geometry();
    if geometry.vertices.is_empty() || geometry.indices.is_empty() {
        return None;
    }

    let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orbitview mesh vbo"),
        contents: bytemuck::cast_slice(&geometry.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orbitview mesh ibo"),
        contents: bytemuck::cast_slice(&geometry.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("orbitview object ubo"),
        size: size_of_u64::<ObjectUniform>(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("orbitview object bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    log::debug!(
        "uploaded '{}': {} vertices, {} indices ({:?})",
        object.name,
        geometry.vertices.len(),
        geometry.indices.len(),
        kind
    );

    Some(GpuMesh {
        kind,
        vbo,
        ibo,
        index_count: geometry.indices.len() as u32,
        ubo,
        bind_group,
    })
}

fn uniform_layout(device: &wgpu::Device, label: &str, size: u64) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size),
            },
            count: None,
        }],
    })
}

fn size_of_u64<T>() -> u64 {
    std::mem::size_of::<T>() as u64
}
