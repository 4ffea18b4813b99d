//! Radial decay kernel for point splatting.

use heatmap_common::{HeatError, HeatResult};

/// Default kernel radius in tile pixels.
pub const DEFAULT_KERNEL_RADIUS: usize = 48;

/// Distance over which the decay weight halves, in pixels.
const DECAY_HALVING_PX: f64 = 10.0;

/// Precomputed square matrix of radial decay weights.
///
/// The matrix is `(2R) x (2R)`; entry `(row, col)` holds the contribution a
/// point at the center `(R, R)` makes to a cell at that offset:
///
/// ```text
/// w(d) = 2^(-d/10) - 2^(-R/10)    for d < R, floored at 0 otherwise
/// ```
///
/// where `d` is the Euclidean distance to the center in pixels. Subtracting
/// the tail term makes the weight reach exactly zero at the radius, so the
/// splat has compact support with no visible cutoff edge.
///
/// Built once, then shared read-only by every tile draw; a kernel depends
/// only on its radius, never on any point set.
#[derive(Debug, Clone)]
pub struct Kernel {
    radius: usize,
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build the decay matrix for `radius` pixels. Fails if `radius` is 0.
    pub fn new(radius: usize) -> HeatResult<Self> {
        if radius == 0 {
            return Err(HeatError::InvalidKernelRadius(radius));
        }

        let size = 2 * radius;
        let r = radius as f64;
        let tail = (-r / DECAY_HALVING_PX).exp2();

        let mut weights = vec![0.0; size * size];
        for row in 0..size {
            for col in 0..size {
                let dr = row as f64 - r;
                let dc = col as f64 - r;
                let d = (dr * dr + dc * dc).sqrt();
                if d < r {
                    weights[row * size + col] = ((-d / DECAY_HALVING_PX).exp2() - tail).max(0.0);
                }
            }
        }

        Ok(Self {
            radius,
            size,
            weights,
        })
    }

    /// Kernel radius in pixels.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length of the matrix (`2 * radius`).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at a matrix offset. Panics if out of range; callers iterate
    /// `0..size()`.
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    /// The zero-distance contribution, `weights[R][R]` - the largest value
    /// in the matrix.
    pub fn center_weight(&self) -> f64 {
        self.weight(self.radius, self.radius)
    }

    /// Raw row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
