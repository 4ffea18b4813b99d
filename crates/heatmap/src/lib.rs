//! Density heat-map overlay model for tiled maps.
//!
//! A [`HeatMap`] owns a weighted point set and everything derived from it:
//! the bounding region for initial framing, the zoom statistics driving
//! normalization, a spatial index for per-tile point queries, and the tile
//! renderer itself. Everything is computed at construction and immutable
//! afterward, so tile draws are independent, lock-free, and can run
//! concurrently - one draw per requested tile.
//!
//! The model works purely in projected-plane coordinates. Geographic input
//! crosses the [`projection::Projection`] seam exactly once, at
//! construction.

mod index;

pub use index::GridIndex;

pub use heatmap_common::{BoundingBox, HeatError, HeatPoint, HeatResult, PointSet};
pub use projection::{GeoCoord, PlanePoint, Projection, WebMercator};
pub use renderer::{AlphaMode, Color, HeatRect, Ramp, RenderOptions, ZoomStatistics};

use heatmap_common::zoom;
use rayon::prelude::*;
use renderer::TileRenderer;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Options for building a [`HeatMap`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatMapOptions {
    /// Rendering options forwarded to the tile renderer.
    pub render: RenderOptions,
    /// Extra margin added symmetrically around the sample bounding box so
    /// edge samples are not clipped by viewport framing. Plane units; a
    /// fixed policy constant, not derived from the data.
    pub region_padding: f64,
    /// Cells per side of the coarse statistics grid.
    pub coarse_grid_cells: usize,
    /// World extent the coarse statistics grid covers.
    pub world_bounds: BoundingBox,
}

impl Default for HeatMapOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            region_padding: 0.0,
            coarse_grid_cells: heatmap_common::COARSE_GRID_CELLS,
            world_bounds: WebMercator::default().world_bounds(),
        }
    }
}

/// Immutable heat-map model over a set of weighted samples.
pub struct HeatMap {
    points: PointSet,
    region: BoundingBox,
    stats: ZoomStatistics,
    index: GridIndex,
    renderer: TileRenderer,
}

impl HeatMap {
    /// Build a model with default options. Fails on an empty sample list.
    pub fn new(points: Vec<HeatPoint>) -> HeatResult<Self> {
        Self::with_options(points, HeatMapOptions::default())
    }

    /// Build a model with explicit options.
    pub fn with_options(points: Vec<HeatPoint>, options: HeatMapOptions) -> HeatResult<Self> {
        let renderer = TileRenderer::new(options.render)?;
        let points = PointSet::new(points)?;

        let region = points.bounding_box().expanded(options.region_padding);
        let stats = ZoomStatistics::from_points(
            &points,
            &options.world_bounds,
            options.coarse_grid_cells,
        );
        let index = GridIndex::build(&points);

        info!(
            samples = points.len(),
            global_max = stats.global_max,
            coarse_bucket_max = stats.coarse_bucket_max,
            "built heat map model"
        );

        Ok(Self {
            points,
            region,
            stats,
            index,
            renderer,
        })
    }

    /// Project geographic samples onto the plane and build a model from
    /// the result.
    pub fn from_geographic<P>(samples: &[(GeoCoord, f64)], projection: &P) -> HeatResult<Self>
    where
        P: Projection,
    {
        Self::from_geographic_with_options(samples, projection, HeatMapOptions::default())
    }

    /// Geographic constructor with explicit options.
    pub fn from_geographic_with_options<P>(
        samples: &[(GeoCoord, f64)],
        projection: &P,
        options: HeatMapOptions,
    ) -> HeatResult<Self>
    where
        P: Projection,
    {
        let points = samples
            .iter()
            .map(|&(coord, weight)| {
                let p = projection.project(coord);
                HeatPoint::new(p.x, p.y, weight)
            })
            .collect();
        Self::with_options(points, options)
    }

    /// Bounding region for initial view framing: the sample bounding box
    /// plus the configured padding.
    pub fn bounding_region(&self) -> BoundingBox {
        self.region
    }

    /// Center of the bounding region.
    pub fn center(&self) -> PlanePoint {
        let (x, y) = self.region.center();
        PlanePoint::new(x, y)
    }

    /// The derived zoom statistics.
    pub fn statistics(&self) -> &ZoomStatistics {
        &self.stats
    }

    /// The owned samples.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A model always holds at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Render one tile as filled rectangles in plane coordinates.
    ///
    /// A viewport with no samples in range yields an empty list, not an
    /// error.
    pub fn render_tile(
        &self,
        viewport: &BoundingBox,
        zoom_scale: f64,
    ) -> HeatResult<Vec<HeatRect>> {
        zoom::validate_zoom_scale(zoom_scale)?;
        let padded = self.renderer.padded_viewport(viewport, zoom_scale);
        let candidates = self.index.query(&self.points, &padded);
        self.renderer
            .render_rects(candidates, viewport, zoom_scale, &self.stats)
    }

    /// Render one tile into an RGBA pixel buffer.
    pub fn render_tile_pixels(
        &self,
        viewport: &BoundingBox,
        zoom_scale: f64,
    ) -> HeatResult<Vec<u8>> {
        zoom::validate_zoom_scale(zoom_scale)?;
        let padded = self.renderer.padded_viewport(viewport, zoom_scale);
        let candidates = self.index.query(&self.points, &padded);
        self.renderer
            .render_pixels(candidates, viewport, zoom_scale, &self.stats)
    }

    /// Render one tile and encode it as a PNG.
    pub fn render_tile_png(&self, viewport: &BoundingBox, zoom_scale: f64) -> HeatResult<Vec<u8>> {
        zoom::validate_zoom_scale(zoom_scale)?;
        let padded = self.renderer.padded_viewport(viewport, zoom_scale);
        let candidates = self.index.query(&self.points, &padded);
        self.renderer
            .render_png(candidates, viewport, zoom_scale, &self.stats)
    }

    /// Render a batch of independent tiles in parallel, one task per tile.
    ///
    /// Draws share only immutable state, so this is a plain data-parallel
    /// map; results come back in request order.
    pub fn render_tiles(&self, requests: &[(BoundingBox, f64)]) -> Vec<HeatResult<Vec<HeatRect>>> {
        requests
            .par_iter()
            .map(|(viewport, zoom_scale)| self.render_tile(viewport, *zoom_scale))
            .collect()
    }
}
