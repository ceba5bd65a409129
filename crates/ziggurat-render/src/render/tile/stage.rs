use anyhow::Result;

use crate::render::RenderCtx;

use super::uniforms::uniform_min_binding_size;
use super::{TileUniforms, TileVertex};

/// Host-configurable parts of the pipeline assembled around the tile vertex
/// stage.
///
/// The fragment module is the downstream collaborator consuming the stage's
/// varyings; its entry point must declare locations 0–4 with matching
/// flat/smooth interpolation (see `shaders/tile.wgsl`).
pub struct TilePipelineDesc<'a> {
    pub fragment_module: &'a wgpu::ShaderModule,
    pub fragment_entry: &'a str,
    /// Blend state for the color target; `None` for opaque tiles.
    pub blend: Option<wgpu::BlendState>,
    /// Depth/stencil configuration; `None` disables depth testing.
    pub depth_stencil: Option<wgpu::DepthStencilState>,
}

/// GPU objects of the tile vertex stage.
///
/// Owns the shader module, the per-draw uniform buffer, and its bind group.
/// Host protocol per draw call: fill a [`TileUniforms`] snapshot, upload it
/// with [`write_uniforms`](Self::write_uniforms), set bind group 0 to
/// [`bind_group`](Self::bind_group), and feed vertex buffers laid out per
/// [`TileVertex::layout`].
pub struct TileStage {
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
}

impl TileStage {
    /// Creates the stage's GPU objects on the host's device.
    ///
    /// Fails if the device cannot bind a uniform buffer large enough for
    /// [`TileUniforms`] (the 256-entry light table dominates its size).
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self> {
        let uniform_size = std::mem::size_of::<TileUniforms>() as u64;
        let max = ctx.device.limits().max_uniform_buffer_binding_size as u64;
        anyhow::ensure!(
            uniform_size <= max,
            "tile uniform block ({uniform_size} bytes) exceeds device limit ({max} bytes)"
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ziggurat tile shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tile.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("ziggurat tile bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(uniform_min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ziggurat tile ubo"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ziggurat tile bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            shader,
            bind_group_layout,
            bind_group,
            uniform_buffer,
        })
    }

    /// Uploads the per-draw uniform snapshot.
    ///
    /// Per-draw inputs are immutable for the duration of a draw call; write
    /// before issuing the draw, not mid-pass.
    pub fn write_uniforms(&self, ctx: &RenderCtx<'_>, uniforms: &TileUniforms) {
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Bind group carrying the uniform snapshot (group 0).
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Layout of bind group 0, for hosts composing their own pipeline layout.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Assembles a render pipeline from this vertex stage and the host's
    /// fragment collaborator.
    pub fn pipeline(
        &self,
        ctx: &RenderCtx<'_>,
        desc: &TilePipelineDesc<'_>,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("ziggurat tile pipeline layout"),
                    bind_group_layouts: &[&self.bind_group_layout],
                    immediate_size: 0,
                });

        ctx.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("ziggurat tile pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &self.shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[TileVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: desc.fragment_module,
                    entry_point: Some(desc.fragment_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.color_format,
                        blend: desc.blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: desc.depth_stencil.clone(),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            })
    }
}
