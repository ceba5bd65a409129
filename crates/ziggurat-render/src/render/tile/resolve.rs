//! CPU reference resolver for the tile vertex stage.
//!
//! Mirrors `shaders/tile.wgsl` operation for operation. Hosts use it to
//! predict what the GPU stage produces for a given vertex; the test suite
//! uses it to pin down the stage's contract.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::lights::LightTable;

use super::TileVertex;

/// Animation frame period in clock units: frames advance at 35/8 frames per
/// unit of time.
pub const FRAME_PERIOD: f32 = 8.0 / 35.0;

/// Per-draw inputs shared by every vertex of a draw call.
///
/// These are an immutable snapshot for the duration of the call; the host
/// must not mutate them mid-draw.
#[derive(Debug, Copy, Clone)]
pub struct DrawParams<'a> {
    pub projection: Mat4,
    pub modelview: Mat4,
    /// Atlas texture dimensions in the same UV units as the vertex
    /// attributes. A zero width divides by zero in the wrap computation;
    /// avoiding that is the caller's responsibility.
    pub atlas_size: Vec2,
    /// Animation clock, monotonically increasing.
    pub time: f32,
    pub lights: &'a LightTable,
}

/// Resolved outputs for one vertex.
///
/// Downstream, `dist` and `tile_uv` are smoothly interpolated; `atlas_uv`,
/// `tile_size`, and `light` are flat (constant across the primitive).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedVertex {
    pub clip_position: Vec4,
    /// Homogeneous w of `clip_position`, for fog/depth effects downstream.
    pub dist: f32,
    pub tile_uv: Vec2,
    pub atlas_uv: Vec2,
    pub tile_size: Vec2,
    pub light: f32,
}

/// Selects the current animation frame.
///
/// Returns an integral value in `[0, num_frames)`, periodic in `time` with
/// period `num_frames * FRAME_PERIOD`. `frame_offset` phase-shifts tiles
/// sharing the same clock.
pub fn frame_index(time: f32, num_frames: u32, frame_offset: u32) -> f32 {
    (time / FRAME_PERIOD + frame_offset as f32)
        .rem_euclid(num_frames as f32)
        .floor()
}

/// Computes the atlas origin of an animation frame, wrapping to the next
/// atlas row when the frame run overflows the atlas width.
///
/// Frames are laid out contiguously in +U from `atlas_uv`. Each wrapped row
/// adds `(atlas_size.x - atlas_uv.x) mod tile_size.x` to U (the partial
/// column left over when the atlas width is not a multiple of the frame
/// width), keeping the overflowed U congruent to a frame boundary once the
/// sampling stage folds it back modulo the atlas width. V advances by one
/// frame height per wrapped row; rows below the first are assumed to share
/// the frame's height.
fn animated_atlas_uv(atlas_uv: Vec2, tile_size: Vec2, atlas_size: Vec2, frame: f32) -> Vec2 {
    let mut atlas_u = atlas_uv.x + frame * tile_size.x;
    let rows_down = ((atlas_u + tile_size.x) / atlas_size.x).ceil() - 1.0;
    atlas_u += (atlas_size.x - atlas_uv.x).rem_euclid(tile_size.x) * rows_down;
    Vec2::new(atlas_u, atlas_uv.y + rows_down * tile_size.y)
}

/// Resolves one vertex.
///
/// Pure: no side effects, no cross-vertex state, no ordering requirements
/// between invocations.
///
/// # Panics
/// Panics if `vertex.light_index >= lights::LIGHT_COUNT`. The GPU path does
/// not check; out-of-range indices there produce unspecified intensities.
pub fn resolve_vertex(vertex: &TileVertex, draw: &DrawParams<'_>) -> ResolvedVertex {
    let tile_uv = Vec2::from(vertex.tile_uv) + Vec2::new(draw.time * vertex.scroll_rate, 0.0);

    // Static tiles skip the frame math entirely.
    let atlas_uv = if vertex.num_frames > 1 {
        animated_atlas_uv(
            Vec2::from(vertex.atlas_uv),
            Vec2::from(vertex.tile_size),
            draw.atlas_size,
            frame_index(draw.time, vertex.num_frames, vertex.frame_offset),
        )
    } else {
        Vec2::from(vertex.atlas_uv)
    };

    let clip_position = draw.projection * draw.modelview * Vec3::from(vertex.position).extend(1.0);

    ResolvedVertex {
        clip_position,
        dist: clip_position.w,
        tile_uv,
        atlas_uv,
        tile_size: Vec2::from(vertex.tile_size),
        light: draw.lights.intensity(vertex.light_index as usize),
    }
}

/// Resolves a batch of vertices against one draw snapshot.
///
/// Elements are independent; output order matches input order.
pub fn resolve_vertices(vertices: &[TileVertex], draw: &DrawParams<'_>) -> Vec<ResolvedVertex> {
    vertices.iter().map(|v| resolve_vertex(v, draw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::LightTable;

    fn vertex() -> TileVertex {
        TileVertex {
            position: [0.0, 0.0, 0.0],
            atlas_uv: [0.0, 0.0],
            tile_uv: [0.0, 0.0],
            tile_size: [64.0, 64.0],
            scroll_rate: 0.0,
            num_frames: 1,
            frame_offset: 0,
            light_index: 0,
        }
    }

    fn draw(lights: &LightTable) -> DrawParams<'_> {
        DrawParams {
            projection: Mat4::IDENTITY,
            modelview: Mat4::IDENTITY,
            atlas_size: Vec2::new(256.0, 256.0),
            time: 0.0,
            lights,
        }
    }

    // ── frame selection ───────────────────────────────────────────────────

    #[test]
    fn frame_zero_at_time_zero() {
        assert_eq!(frame_index(0.0, 5, 0), 0.0);
    }

    #[test]
    fn frame_offset_shifts_phase() {
        assert_eq!(frame_index(0.0, 5, 3), 3.0);
        // Offsets past the frame count wrap.
        assert_eq!(frame_index(0.0, 5, 7), 2.0);
    }

    #[test]
    fn frame_stays_integral_and_in_range() {
        let num_frames = 6;
        for step in 0..200 {
            let time = step as f32 * 0.05;
            let frame = frame_index(time, num_frames, 2);
            assert!(
                frame >= 0.0 && frame < num_frames as f32,
                "time {time}: frame {frame} out of range"
            );
            assert_eq!(frame, frame.floor());
        }
    }

    #[test]
    fn frame_is_periodic_in_time() {
        let num_frames = 5;
        // One full cycle is num_frames * FRAME_PERIOD clock units.
        for step in 0..40 {
            let time = step as f32 * 0.025;
            let a = frame_index(time, num_frames, 1);
            let b = frame_index(time + num_frames as f32 * FRAME_PERIOD, num_frames, 1);
            assert_eq!(a, b, "time {time}");
        }
    }

    #[test]
    fn frames_advance_at_35_over_8_per_time_unit() {
        // Halfway into the second frame period.
        assert_eq!(frame_index(FRAME_PERIOD * 1.5, 8, 0), 1.0);
        assert_eq!(frame_index(FRAME_PERIOD * 2.5, 8, 0), 2.0);
    }

    // ── static tiles ──────────────────────────────────────────────────────

    #[test]
    fn static_tile_keeps_its_atlas_uv() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.atlas_uv = [0.25, 0.5];
        v.frame_offset = 9;
        v.scroll_rate = 2.0;

        for step in 0..10 {
            let mut d = draw(&lights);
            d.time = step as f32 * 1.7;
            let out = resolve_vertex(&v, &d);
            assert_eq!(out.atlas_uv, Vec2::new(0.25, 0.5));
        }
    }

    #[test]
    fn animated_tile_at_origin_time_matches_static() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.atlas_uv = [64.0, 0.0];
        v.num_frames = 3;
        let out = resolve_vertex(&v, &draw(&lights));
        assert_eq!(out.atlas_uv, Vec2::new(64.0, 0.0));
    }

    // ── row wrapping ──────────────────────────────────────────────────────

    #[test]
    fn frames_within_the_row_stay_on_it() {
        let uv = animated_atlas_uv(
            Vec2::new(0.0, 32.0),
            Vec2::new(64.0, 64.0),
            Vec2::new(256.0, 256.0),
            3.0,
        );
        assert_eq!(uv, Vec2::new(192.0, 32.0));
    }

    #[test]
    fn overflowing_frame_wraps_to_next_row() {
        // 256-wide atlas, 64-wide frames: frame 4 overflows the first row. U
        // lands one full atlas width to the right (the sampling stage folds
        // it back to column 0); V drops one frame height.
        let uv = animated_atlas_uv(
            Vec2::new(0.0, 32.0),
            Vec2::new(64.0, 64.0),
            Vec2::new(256.0, 256.0),
            4.0,
        );
        assert_eq!(uv, Vec2::new(256.0, 96.0));
    }

    #[test]
    fn wrap_absorbs_partial_leftover_column() {
        // 100-wide atlas, 32-wide frames: 4 units left over per row. The
        // wrapped frame gains the leftover so the folded U stays aligned to a
        // frame boundary.
        let uv = animated_atlas_uv(
            Vec2::new(0.0, 0.0),
            Vec2::new(32.0, 32.0),
            Vec2::new(100.0, 100.0),
            3.0,
        );
        assert_eq!(uv, Vec2::new(100.0, 32.0));
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[test]
    fn scroll_is_linear_in_time_and_horizontal_only() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.tile_uv = [0.5, 0.25];
        v.scroll_rate = 1.5;

        let mut d = draw(&lights);
        d.time = 2.0;
        let out = resolve_vertex(&v, &d);
        assert_eq!(out.tile_uv, Vec2::new(3.5, 0.25));

        // Unbounded growth; nothing wraps at this stage.
        d.time = 200.0;
        let out = resolve_vertex(&v, &d);
        assert_eq!(out.tile_uv, Vec2::new(300.5, 0.25));
    }

    // ── transform & depth ─────────────────────────────────────────────────

    #[test]
    fn dist_is_the_clip_space_w() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.position = [1.0, 2.0, -3.0];

        let mut d = draw(&lights);
        d.projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        d.modelview = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));

        let out = resolve_vertex(&v, &d);
        let expected = d.projection * d.modelview * Vec4::new(1.0, 2.0, -3.0, 1.0);
        assert_eq!(out.clip_position, expected);
        assert_eq!(out.dist, expected.w);
        // Right-handed projection: w is the eye-space distance along -Z.
        assert_eq!(out.dist, 5.0);
    }

    #[test]
    fn tile_size_passes_through() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.tile_size = [16.0, 128.0];
        let out = resolve_vertex(&v, &draw(&lights));
        assert_eq!(out.tile_size, Vec2::new(16.0, 128.0));
    }

    // ── lights ────────────────────────────────────────────────────────────

    #[test]
    fn light_is_looked_up_by_index() {
        let mut lights = LightTable::new();
        lights.set(7, 0.125);
        let mut v = vertex();
        v.light_index = 7;
        let out = resolve_vertex(&v, &draw(&lights));
        assert_eq!(out.light, 0.125);
    }

    #[test]
    #[should_panic]
    fn out_of_range_light_index_panics() {
        let lights = LightTable::new();
        let mut v = vertex();
        v.light_index = 256;
        let _ = resolve_vertex(&v, &draw(&lights));
    }

    // ── batch ─────────────────────────────────────────────────────────────

    #[test]
    fn batch_matches_single_resolution() {
        let lights = LightTable::new();
        let d = draw(&lights);

        let mut animated = vertex();
        animated.num_frames = 4;
        let vertices = [vertex(), animated];

        let out = resolve_vertices(&vertices, &d);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], resolve_vertex(&vertices[0], &d));
        assert_eq!(out[1], resolve_vertex(&vertices[1], &d));
    }
}
