use bytemuck::{Pod, Zeroable};

/// Per-vertex attributes of a tile mesh.
///
/// The field order, shader locations, and packing are shared with
/// `shaders/tile.wgsl` and are part of the host contract; do not reorder.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TileVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Atlas UV of the tile's first animation frame.
    pub atlas_uv: [f32; 2],
    /// Tile-local UV before scrolling.
    pub tile_uv: [f32; 2],
    /// Size of one animation frame in atlas UV units.
    pub tile_size: [f32; 2],
    /// Horizontal scroll speed in tile-UV units per unit of time.
    pub scroll_rate: f32,
    /// Animation frame count; 1 for static tiles.
    pub num_frames: u32,
    /// Phase offset so tiles sharing an animation are not synchronized.
    pub frame_offset: u32,
    /// Index into the 256-entry light table.
    pub light_index: u32,
}

impl TileVertex {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2, // atlas_uv
        2 => Float32x2, // tile_uv
        3 => Float32x2, // tile_size
        4 => Float32,   // scroll_rate
        5 => Uint32,    // num_frames
        6 => Uint32,    // frame_offset
        7 => Uint32     // light_index
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
