//! Uniform-grid spatial index over the point set.

use heatmap_common::{BoundingBox, HeatPoint, PointSet};

/// Dense uniform grid keyed on point position.
///
/// Cells hold indices into the owning point set. Built once at model
/// construction; a range query touches only the cells overlapping the query
/// box instead of scanning every sample. Results are a whole-cell superset
/// of the exact answer - the aggregator re-tests exact positions, so
/// over-returning is harmless.
#[derive(Debug, Clone)]
pub struct GridIndex {
    bounds: BoundingBox,
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    cells: Vec<Vec<u32>>,
}

impl GridIndex {
    /// Target average samples per cell. Keeps bucket walks short without
    /// blowing up memory for sparse sets.
    const TARGET_PER_CELL: usize = 4;

    /// Upper bound on cells per side.
    const MAX_SIDE: usize = 1024;

    /// Build the index for `points` over their bounding box.
    pub fn build(points: &PointSet) -> Self {
        let bounds = points.bounding_box();

        let wanted = points.len().div_ceil(Self::TARGET_PER_CELL);
        let side = ((wanted as f64).sqrt().ceil() as usize).clamp(1, Self::MAX_SIDE);
        let (cols, rows) = (side, side);

        // Degenerate extents (a single point, or collinear samples) still
        // get a positive cell size so the divisions below stay finite.
        let cell_w = if bounds.width() > 0.0 {
            bounds.width() / cols as f64
        } else {
            1.0
        };
        let cell_h = if bounds.height() > 0.0 {
            bounds.height() / rows as f64
        } else {
            1.0
        };

        let mut cells = vec![Vec::new(); cols * rows];
        for (i, p) in points.iter().enumerate() {
            let col = Self::clamped_index(p.x - bounds.min_x, cell_w, cols);
            let row = Self::clamped_index(p.y - bounds.min_y, cell_h, rows);
            cells[row * cols + col].push(i as u32);
        }

        Self {
            bounds,
            cols,
            rows,
            cell_w,
            cell_h,
            cells,
        }
    }

    fn clamped_index(offset: f64, cell_size: f64, count: usize) -> usize {
        // Float-to-int casts saturate, so points on the max edge (and any
        // numeric stragglers) land in the last cell.
        ((offset / cell_size) as usize).min(count - 1)
    }

    /// References to every point whose cell overlaps `range`.
    pub fn query<'a>(&self, points: &'a PointSet, range: &BoundingBox) -> Vec<&'a HeatPoint> {
        if range.max_x < self.bounds.min_x
            || range.min_x > self.bounds.max_x
            || range.max_y < self.bounds.min_y
            || range.min_y > self.bounds.max_y
        {
            return Vec::new();
        }

        let c0 = Self::clamped_index(range.min_x - self.bounds.min_x, self.cell_w, self.cols);
        let c1 = Self::clamped_index(range.max_x - self.bounds.min_x, self.cell_w, self.cols);
        let r0 = Self::clamped_index(range.min_y - self.bounds.min_y, self.cell_h, self.rows);
        let r1 = Self::clamped_index(range.max_y - self.bounds.min_y, self.cell_h, self.rows);

        let slice = points.as_slice();
        let mut out = Vec::new();
        for row in r0..=r1 {
            for col in c0..=c1 {
                for &i in &self.cells[row * self.cols + col] {
                    out.push(&slice[i as usize]);
                }
            }
        }
        out
    }
}
