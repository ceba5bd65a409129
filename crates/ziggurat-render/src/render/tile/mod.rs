//! Tile vertex stage.
//!
//! One invocation per vertex, no cross-vertex state: scrolled tile-local UV,
//! animated atlas UV with row wrapping, clip-space transform, and a light
//! intensity from the bound table. The stage ships in two forms that share
//! one set of semantics: the WGSL vertex shader the GPU runs ([`TileStage`])
//! and a CPU reference resolver ([`resolve_vertex`]).

mod resolve;
mod stage;
mod uniforms;
mod vertex;

pub use resolve::{
    frame_index, resolve_vertex, resolve_vertices, DrawParams, ResolvedVertex, FRAME_PERIOD,
};
pub use stage::{TilePipelineDesc, TileStage};
pub use uniforms::TileUniforms;
pub use vertex::TileVertex;
