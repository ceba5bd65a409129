//! GPU rendering subsystem.
//!
//! The tile vertex stage consumes per-vertex tile attributes plus a per-draw
//! uniform snapshot, and produces clip-space positions and the varyings the
//! host's fragment stage shades with.
//!
//! Convention:
//! - per-draw inputs (matrices, atlas size, animation clock, light table) are
//!   an immutable snapshot for the duration of a draw call;
//! - the host owns device, queue, meshes, textures, and the fragment stage.

mod ctx;
pub mod tile;

pub use ctx::RenderCtx;
