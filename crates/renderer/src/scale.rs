//! Zoom-adaptive density normalization.
//!
//! Raw density is divided by a scale factor before coloring. The factor
//! tracks the densest coarse bucket while the view is zoomed out and falls
//! toward the largest single sample weight as the view closes in, keeping
//! visual saturation consistent across zoom levels.

use heatmap_common::{zoom, BoundingBox, PointSet};

/// Point-set statistics driving zoom normalization.
///
/// Computed once at model construction with a single pass over the samples;
/// immutable thereafter and safe for concurrent reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStatistics {
    /// Largest single sample weight.
    pub global_max: f64,
    /// Largest summed weight in any cell of the coarse world grid - the
    /// densest spot on the map when fully zoomed out.
    pub coarse_bucket_max: f64,
}

impl ZoomStatistics {
    /// Scan `points`, tracking the max weight and bucketing weights into a
    /// `cells x cells` grid over `world` to find the zoomed-out maximum.
    ///
    /// Positions outside `world` are clamped into the border cells, so
    /// stray samples cannot index out of the grid.
    pub fn from_points(points: &PointSet, world: &BoundingBox, cells: usize) -> Self {
        let cells = cells.max(1);
        let cell_w = world.width() / cells as f64;
        let cell_h = world.height() / cells as f64;

        let mut buckets = vec![0.0f64; cells * cells];
        let mut global_max = 0.0f64;

        for p in points.iter() {
            global_max = global_max.max(p.weight);

            // f64-to-usize casts saturate, so out-of-world positions land
            // in a border cell rather than out of range.
            let col = if cell_w > 0.0 {
                (((p.x - world.min_x) / cell_w) as usize).min(cells - 1)
            } else {
                0
            };
            let row = if cell_h > 0.0 {
                (((p.y - world.min_y) / cell_h) as usize).min(cells - 1)
            } else {
                0
            };
            buckets[row * cells + col] += p.weight;
        }

        let coarse_bucket_max = buckets.iter().fold(0.0f64, |acc, &v| acc.max(v));

        Self {
            global_max,
            coarse_bucket_max,
        }
    }
}

/// Divisor applied to raw density before coloring.
///
/// With `level = log2(1/zoom_scale)` clamped to `[0, max_zoom_levels]`:
///
/// ```text
/// slope  = (coarse_bucket_max - global_max) / (max_zoom_levels - 1)
/// x      = level^p / max_zoom_levels^(p - 1)
/// factor = max((x - 1) * slope + global_max, global_max)
/// ```
///
/// The shape exponent `p` keeps the factor near `coarse_bucket_max` across
/// most of the zoomed-out range, then drops it steeply toward `global_max`
/// as the view approaches full zoom-in. The lower clamp guarantees an
/// isolated sample never normalizes above 1. The exponent and slope are
/// tuned constants, not derived quantities; only the qualitative shape
/// matters.
pub fn scale_factor(
    zoom_scale: f64,
    stats: &ZoomStatistics,
    shape_exponent: f64,
    max_zoom_levels: u32,
) -> f64 {
    let levels = max_zoom_levels as f64;
    let level = zoom::zoom_level(zoom_scale, max_zoom_levels);

    let slope = (stats.coarse_bucket_max - stats.global_max) / (levels - 1.0);
    let x = level.powf(shape_exponent) / levels.powf(shape_exponent - 1.0);
    let factor = (x - 1.0) * slope + stats.global_max;

    factor.max(stats.global_max)
}
