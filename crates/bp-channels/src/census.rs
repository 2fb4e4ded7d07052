//! Census comparator: ordered pairwise comparisons between each pixel and
//! its 8-connected neighborhood.
//!
//! Comparison `k` compares the center against the neighbor at
//! [`NEIGHBOR_OFFSETS`]`[k]` and fills plane `k`. The order is row-major
//! over the neighborhood, top-left first, and is part of the public
//! contract: downstream trackers may cache per-plane state keyed on it.
//!
//! Border policy: neighbor coordinates are clamped to the image rectangle
//! (replication). Pixels on the outer ring compare against a replicated
//! edge pixel for out-of-range directions, so every pixel produces a full
//! 8-bit code and no output is ever left unwritten.

use bp_core::Image;

/// `(dx, dy)` of comparison `k`, row-major over the 8-neighborhood.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fills plane `k` with `1.0` where `center >= neighbor_k`, else `0.0`.
///
/// `src` is the (optionally pre-smoothed) f32 intensity grid. Plane
/// dimensions must already match `w x h`.
pub(crate) fn fill_census_planes(src: &[f32], w: usize, h: usize, planes: &mut [Image<f32>; 8]) {
    debug_assert_eq!(src.len(), w * h);

    for (&(dx, dy), plane) in NEIGHBOR_OFFSETS.iter().zip(planes.iter_mut()) {
        let out = plane.data_mut();
        debug_assert_eq!(out.len(), w * h);

        for y in 0..h {
            let sy = ((y as isize + dy).max(0) as usize).min(h - 1);
            let row = y * w;
            let srow = sy * w;
            for x in 0..w {
                let sx = ((x as isize + dx).max(0) as usize).min(w - 1);
                out[row + x] = if src[row + x] >= src[srow + sx] {
                    1.0
                } else {
                    0.0
                };
            }
        }
    }
}
