//! Per-tile density accumulation via kernel splatting.

use crate::kernel::Kernel;
use heatmap_common::{BoundingBox, HeatPoint};

/// Dense per-tile accumulation grid, row-major f64.
///
/// Draw-local scratch: built, filled, consumed and dropped within a single
/// draw call. Never shared between draws.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    size: usize,
    cells: Vec<f64>,
}

impl DensityGrid {
    /// All-zero grid of `size x size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at a cell.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    /// Raw row-major cells.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Largest cell value.
    pub fn max(&self) -> f64 {
        self.cells.iter().fold(0.0, |acc: f64, &v| acc.max(v))
    }

    /// Number of cells holding a value above `threshold`.
    pub fn count_above(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|&&v| v > threshold).count()
    }
}

/// Expand a viewport by the kernel footprint.
///
/// The kernel radius is in tile pixels; dividing by the zoom scale converts
/// it to plane units. Querying points from the padded region lets samples
/// just outside the visible tile still contribute their kernel bleed into
/// it - without this, density near tile edges is undercounted and adjacent
/// tiles show seams.
pub fn padded_viewport(
    viewport: &BoundingBox,
    zoom_scale: f64,
    kernel_radius: usize,
) -> BoundingBox {
    viewport.expanded(kernel_radius as f64 / zoom_scale)
}

/// Splat `points` into a `tile_size`-square grid for the given viewport.
///
/// Each point inside the padded viewport is converted to a local tile-pixel
/// coordinate and its kernel footprint is accumulated around it, scaled by
/// the point's weight. Cells outside `[0, tile_size)` are skipped, not
/// wrapped or clamped. Accumulation is commutative, so input order does not
/// matter; points with weight <= 0 are skipped outright.
pub fn aggregate<'a, I>(
    points: I,
    viewport: &BoundingBox,
    zoom_scale: f64,
    tile_size: usize,
    kernel: &Kernel,
) -> DensityGrid
where
    I: IntoIterator<Item = &'a HeatPoint>,
{
    let mut grid = DensityGrid::new(tile_size);
    aggregate_into(points, viewport, zoom_scale, tile_size, kernel, &mut grid.cells);
    grid
}

/// Splat into a caller-provided buffer of `tile_size * tile_size` zeroed
/// cells. Used by the tile renderer to reuse pooled scratch buffers.
pub fn aggregate_into<'a, I>(
    points: I,
    viewport: &BoundingBox,
    zoom_scale: f64,
    tile_size: usize,
    kernel: &Kernel,
    cells: &mut [f64],
) where
    I: IntoIterator<Item = &'a HeatPoint>,
{
    debug_assert_eq!(cells.len(), tile_size * tile_size);

    let padded = padded_viewport(viewport, zoom_scale, kernel.radius());
    let radius = kernel.radius() as isize;
    let ksize = kernel.size();
    let tile = tile_size as isize;

    for point in points {
        if point.weight <= 0.0 {
            continue;
        }
        if !padded.contains_point(point.x, point.y) {
            continue;
        }

        // Plane position to local tile-pixel coordinate.
        let px = ((point.x - viewport.min_x) * zoom_scale).floor() as isize;
        let py = ((point.y - viewport.min_y) * zoom_scale).floor() as isize;

        let base_col = px - radius;
        let base_row = py - radius;

        for kr in 0..ksize {
            let row = base_row + kr as isize;
            if row < 0 || row >= tile {
                continue;
            }
            let row_offset = row as usize * tile_size;
            for kc in 0..ksize {
                let col = base_col + kc as isize;
                if col < 0 || col >= tile {
                    continue;
                }
                let w = kernel.weight(kr, kc);
                if w > 0.0 {
                    cells[row_offset + col as usize] += w * point.weight;
                }
            }
        }
    }
}
