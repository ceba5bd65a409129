//! Headless demo host for the tile vertex stage.
//!
//! Creates a GPU device without a window, binds the stage's uniforms, and
//! renders one frame of an animated, scrolling tile into an offscreen
//! texture. Run with `cargo run --example offscreen`.

use anyhow::{Context, Result};
use glam::{Mat4, Vec2};
use wgpu::util::DeviceExt;

use ziggurat_render::lights::LightTable;
use ziggurat_render::logging::{init_logging, LoggingConfig};
use ziggurat_render::render::tile::{TilePipelineDesc, TileStage, TileUniforms, TileVertex};
use ziggurat_render::render::RenderCtx;
use ziggurat_render::time::AnimClock;

const TARGET_SIZE: u32 = 256;

// Stand-in for the fragment collaborator: consumes the stage's varyings and
// shades a checker from the resolved frame UV, modulated by the light. A real
// host samples the atlas texture here instead.
const FS_SRC: &str = r#"
struct VsOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) dist: f32,
    @location(1) tile_uv: vec2<f32>,
    @location(2) @interpolate(flat) atlas_uv: vec2<f32>,
    @location(3) @interpolate(flat) tile_size: vec2<f32>,
    @location(4) @interpolate(flat) light: f32,
};

@fragment
fn fs_main(v: VsOut) -> @location(0) vec4<f32> {
    let frame_uv = v.atlas_uv + fract(v.tile_uv) * v.tile_size;
    let checker = f32((u32(frame_uv.x / 8.0) + u32(frame_uv.y / 8.0)) % 2u);
    return vec4<f32>(vec3<f32>((0.2 + 0.8 * checker) * v.light), 1.0);
}
"#;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    pollster::block_on(run())
}

async fn run() -> Result<()> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a GPU adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("offscreen demo device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let ctx = RenderCtx::new(&device, &queue, format);

    let stage = TileStage::new(&ctx)?;

    let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("offscreen demo fragment"),
        source: wgpu::ShaderSource::Wgsl(FS_SRC.into()),
    });

    let pipeline = stage.pipeline(
        &ctx,
        &TilePipelineDesc {
            fragment_module: &fragment,
            fragment_entry: "fs_main",
            blend: None,
            depth_stencil: None,
        },
    );

    let vertices = tile_quad();
    let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("offscreen demo vbo"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let mut lights = LightTable::new();
    lights.set(3, 0.8);

    let clock = AnimClock::new();
    let projection = Mat4::orthographic_rh(
        0.0,
        TARGET_SIZE as f32,
        TARGET_SIZE as f32,
        0.0,
        -1.0,
        1.0,
    );
    let uniforms = TileUniforms::new(
        projection,
        Mat4::IDENTITY,
        Vec2::new(256.0, 128.0),
        clock.seconds(),
        &lights,
    );
    stage.write_uniforms(&ctx, &uniforms);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen demo target"),
        size: wgpu::Extent3d {
            width: TARGET_SIZE,
            height: TARGET_SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("offscreen demo encoder"),
    });
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("offscreen demo pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&pipeline);
        rpass.set_bind_group(0, stage.bind_group(), &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }
    queue.submit(std::iter::once(encoder.finish()));

    log::info!(
        "rendered one {TARGET_SIZE}x{TARGET_SIZE} frame at t={:.3}",
        uniforms.time
    );
    Ok(())
}

// One animated tile (4 frames, slow scroll) covering most of the target.
fn tile_quad() -> [TileVertex; 6] {
    let corner = |x: f32, y: f32, u: f32, v: f32| TileVertex {
        position: [x, y, 0.0],
        atlas_uv: [0.0, 0.0],
        tile_uv: [u, v],
        tile_size: [64.0, 64.0],
        scroll_rate: 0.1,
        num_frames: 4,
        frame_offset: 1,
        light_index: 3,
    };

    let (x0, y0, x1, y1) = (32.0, 32.0, 224.0, 224.0);
    [
        corner(x0, y0, 0.0, 0.0),
        corner(x1, y0, 1.0, 0.0),
        corner(x1, y1, 1.0, 1.0),
        corner(x0, y0, 0.0, 0.0),
        corner(x1, y1, 1.0, 1.0),
        corner(x0, y1, 0.0, 1.0),
    ]
}
