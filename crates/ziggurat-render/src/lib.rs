//! Ziggurat render crate.
//!
//! This crate owns the vertex stage of a tile-based 2D renderer: scrolled
//! tile-local UVs, animated atlas-UV resolution with row wrapping, clip-space
//! transform, and light-table lookup. The host engine owns everything around
//! it (meshes, textures, draw batching, the fragment stage, the GPU context).

pub mod lights;
pub mod logging;
pub mod render;
pub mod time;
