//! Weighted point samples in the projected plane.

use crate::{BoundingBox, HeatError, HeatResult};
use serde::{Deserialize, Serialize};

/// A single weighted sample at a projected-plane position.
///
/// Weight is non-negative: 1.0 for a raw sample, larger for pre-aggregated
/// input. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

impl HeatPoint {
    /// Create a weighted sample.
    pub fn new(x: f64, y: f64, weight: f64) -> Self {
        Self { x, y, weight }
    }

    /// Create a unit-weight sample.
    pub fn unit(x: f64, y: f64) -> Self {
        Self { x, y, weight: 1.0 }
    }
}

/// Immutable, non-empty collection of heat points.
///
/// Adding or removing samples means building a new `PointSet` and a new
/// model derived from it; nothing mutates in place, so a `PointSet` can be
/// read concurrently without synchronization.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<HeatPoint>,
}

impl PointSet {
    /// Build a point set. Fails on empty input.
    pub fn new(points: Vec<HeatPoint>) -> HeatResult<Self> {
        if points.is_empty() {
            return Err(HeatError::EmptyPointSet);
        }
        Ok(Self { points })
    }

    /// Number of samples (always at least 1).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A `PointSet` is never empty; this exists to satisfy the usual
    /// `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, HeatPoint> {
        self.points.iter()
    }

    /// The samples as a slice.
    pub fn as_slice(&self) -> &[HeatPoint] {
        &self.points
    }

    /// Axis-aligned bounding box of every sample position, computed with a
    /// single linear pass.
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.points[0];
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        bbox
    }

    /// Largest single sample weight.
    pub fn max_weight(&self) -> f64 {
        self.points.iter().fold(0.0, |acc, p| acc.max(p.weight))
    }
}
