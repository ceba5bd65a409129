use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::lights::{LightTable, LIGHT_COUNT};

/// Per-draw uniform block for the tile vertex stage.
///
/// Field order and padding mirror the WGSL `TileUniforms` declaration in
/// `shaders/tile.wgsl`. The light table is packed four entries per vec4 to
/// satisfy the 16-byte uniform array stride; entry `i` lives at
/// `lights[i / 4][i % 4]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TileUniforms {
    pub projection: [[f32; 4]; 4],
    pub modelview: [[f32; 4]; 4],
    /// Atlas texture dimensions in UV units.
    pub atlas_size: [f32; 2],
    /// Animation clock, monotonically increasing.
    pub time: f32,
    pub _pad: f32, // 16-byte alignment for the lights array
    pub lights: [[f32; 4]; LIGHT_COUNT / 4],
}

impl TileUniforms {
    /// Builds the uniform snapshot bound before a draw call.
    pub fn new(
        projection: Mat4,
        modelview: Mat4,
        atlas_size: Vec2,
        time: f32,
        lights: &LightTable,
    ) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            modelview: modelview.to_cols_array_2d(),
            atlas_size: atlas_size.to_array(),
            time,
            _pad: 0.0,
            lights: lights.packed(),
        }
    }
}

/// Returns the `wgpu` minimum binding size for the tile uniform buffer.
///
/// `TileUniforms` is non-empty, so its size is always non-zero. Centralising
/// this avoids `.unwrap()` at the pipeline-creation site.
pub(super) fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<TileUniforms>() as u64)
        .expect("TileUniforms has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn block_size_matches_wgsl_declaration() {
        // 2 * mat4x4 (128) + vec2 (8) + f32 (4) + pad (4) + array<vec4, 64> (1024)
        assert_eq!(std::mem::size_of::<TileUniforms>(), 1168);
        assert_eq!(std::mem::size_of::<TileUniforms>() % 16, 0);
    }

    #[test]
    fn field_offsets_match_wgsl_declaration() {
        assert_eq!(offset_of!(TileUniforms, projection), 0);
        assert_eq!(offset_of!(TileUniforms, modelview), 64);
        assert_eq!(offset_of!(TileUniforms, atlas_size), 128);
        assert_eq!(offset_of!(TileUniforms, time), 136);
        assert_eq!(offset_of!(TileUniforms, lights), 144);
    }

    #[test]
    fn light_entries_pack_four_per_vec4() {
        let mut table = LightTable::new();
        table.set(0, 0.25);
        table.set(5, 0.5);
        table.set(255, 0.75);

        let u = TileUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec2::ONE, 0.0, &table);
        assert_eq!(u.lights[0][0], 0.25);
        assert_eq!(u.lights[1][1], 0.5);
        assert_eq!(u.lights[63][3], 0.75);
    }

    #[test]
    fn matrices_are_column_major() {
        let translation = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 5.0));
        let u = TileUniforms::new(translation, Mat4::IDENTITY, Vec2::ONE, 0.0, &LightTable::new());
        assert_eq!(u.projection[3], [3.0, 4.0, 5.0, 1.0]);
    }
}
