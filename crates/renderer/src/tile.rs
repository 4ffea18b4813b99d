//! Tile rendering orchestration.
//!
//! A [`TileRenderer`] owns the kernel and tuning options and turns a
//! viewport-plus-zoom request into drawable output: either a list of filled
//! rectangles for vector hosts, or an RGBA pixel buffer (optionally PNG
//! encoded) for raster hosts. Every draw is stateless and self-contained,
//! so one renderer instance serves concurrent draws from multiple threads.

use crate::buffer_pool::{take_pixel_buffer, with_density_buffer};
use crate::density;
use crate::kernel::{Kernel, DEFAULT_KERNEL_RADIUS};
use crate::png::create_png;
use crate::ramp::{AlphaMode, Color, Ramp};
use crate::scale::{scale_factor, ZoomStatistics};
use heatmap_common::{zoom, BoundingBox, HeatError, HeatPoint, HeatResult, MAX_ZOOM_LEVELS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default tile grid dimension in pixels.
pub const DEFAULT_TILE_SIZE: usize = 256;

/// Tunable rendering options.
///
/// All knobs the pipeline exposes; everything has a sensible default and is
/// validated once at [`TileRenderer::new`], never silently clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Side length of the density grid / output tile in pixels.
    pub tile_size: usize,
    /// Kernel radius in pixels.
    pub kernel_radius: usize,
    /// Raw densities at or below this value are not drawn at all. Distinct
    /// from the ramp's lowest color: a skipped cell emits nothing.
    pub threshold: f64,
    /// Shape exponent of the zoom normalization curve.
    pub shape_exponent: f64,
    /// Zoom steps between fully zoomed in and fully zoomed out.
    pub max_zoom_levels: u32,
    /// Alpha policy for drawn cells.
    pub alpha: AlphaMode,
    /// Color ramp.
    pub ramp: Ramp,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            kernel_radius: DEFAULT_KERNEL_RADIUS,
            threshold: 0.0,
            shape_exponent: 4.0,
            max_zoom_levels: MAX_ZOOM_LEVELS,
            alpha: AlphaMode::default(),
            ramp: Ramp::default(),
        }
    }
}

/// A filled rectangle for the host to draw.
///
/// Coordinates are in the projected plane: one density cell maps to a
/// square of side `1/zoom_scale` plane units, so the grid resolution stays
/// fixed while screen coverage scales with zoom. `color` is opaque; `alpha`
/// carries the separate alpha policy result in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Color,
    pub alpha: f64,
}

/// Stateless per-request tile renderer.
#[derive(Debug, Clone)]
pub struct TileRenderer {
    kernel: Kernel,
    options: RenderOptions,
}

impl TileRenderer {
    /// Validate `options` and build the kernel. Fails on a zero tile size
    /// or kernel radius, a non-finite or negative threshold, an
    /// out-of-range alpha, a degenerate zoom level count, or a bad shape
    /// exponent.
    pub fn new(options: RenderOptions) -> HeatResult<Self> {
        if options.tile_size == 0 {
            return Err(HeatError::InvalidTileSize(options.tile_size));
        }
        if !options.threshold.is_finite() || options.threshold < 0.0 {
            return Err(HeatError::InvalidThreshold(options.threshold));
        }
        if options.max_zoom_levels < 2 {
            return Err(HeatError::InvalidZoomLevels(options.max_zoom_levels));
        }
        if !options.shape_exponent.is_finite() || options.shape_exponent < 1.0 {
            return Err(HeatError::InvalidShapeExponent(options.shape_exponent));
        }
        options.alpha.validate()?;

        let kernel = Kernel::new(options.kernel_radius)?;
        Ok(Self { kernel, options })
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The viewport expanded by the kernel footprint; the region callers
    /// should query points from for this draw.
    pub fn padded_viewport(&self, viewport: &BoundingBox, zoom_scale: f64) -> BoundingBox {
        density::padded_viewport(viewport, zoom_scale, self.kernel.radius())
    }

    /// Render one tile to filled rectangles in plane coordinates.
    ///
    /// `points` should come from the padded viewport (see
    /// [`padded_viewport`](Self::padded_viewport)); a superset is fine, the
    /// aggregator re-filters. No points in range, or every cell at or below
    /// the threshold, yields an empty list - not an error.
    pub fn render_rects<'a, I>(
        &self,
        points: I,
        viewport: &BoundingBox,
        zoom_scale: f64,
        stats: &ZoomStatistics,
    ) -> HeatResult<Vec<HeatRect>>
    where
        I: IntoIterator<Item = &'a HeatPoint>,
    {
        zoom::validate_zoom_scale(zoom_scale)?;

        let tile_size = self.options.tile_size;
        let factor = scale_factor(
            zoom_scale,
            stats,
            self.options.shape_exponent,
            self.options.max_zoom_levels,
        );
        let cell_side = 1.0 / zoom_scale;

        let rects = with_density_buffer(tile_size, |cells| {
            density::aggregate_into(points, viewport, zoom_scale, tile_size, &self.kernel, cells);

            let mut rects = Vec::new();
            for row in 0..tile_size {
                for col in 0..tile_size {
                    let value = cells[row * tile_size + col];
                    if value <= self.options.threshold {
                        continue;
                    }
                    let normalized = value / factor;
                    rects.push(HeatRect {
                        x: viewport.min_x + col as f64 * cell_side,
                        y: viewport.min_y + row as f64 * cell_side,
                        size: cell_side,
                        color: self.options.ramp.color_for(normalized),
                        alpha: self.options.alpha.alpha_for(normalized),
                    });
                }
            }
            rects
        });

        debug!(
            drawn = rects.len(),
            zoom_scale, factor, "rendered tile rects"
        );
        Ok(rects)
    }

    /// Render one tile into an RGBA pixel buffer of
    /// `tile_size * tile_size * 4` bytes. Skipped cells stay fully
    /// transparent.
    pub fn render_pixels<'a, I>(
        &self,
        points: I,
        viewport: &BoundingBox,
        zoom_scale: f64,
        stats: &ZoomStatistics,
    ) -> HeatResult<Vec<u8>>
    where
        I: IntoIterator<Item = &'a HeatPoint>,
    {
        zoom::validate_zoom_scale(zoom_scale)?;

        let tile_size = self.options.tile_size;
        let factor = scale_factor(
            zoom_scale,
            stats,
            self.options.shape_exponent,
            self.options.max_zoom_levels,
        );

        let pixels = with_density_buffer(tile_size, |cells| {
            density::aggregate_into(points, viewport, zoom_scale, tile_size, &self.kernel, cells);

            take_pixel_buffer(tile_size, tile_size, |pixels| {
                for (idx, &value) in cells.iter().enumerate() {
                    if value <= self.options.threshold {
                        continue;
                    }
                    let normalized = value / factor;
                    let color = self.options.ramp.color_for(normalized);
                    let alpha = self.options.alpha.alpha_for(normalized);

                    let offset = idx * 4;
                    pixels[offset] = color.r;
                    pixels[offset + 1] = color.g;
                    pixels[offset + 2] = color.b;
                    pixels[offset + 3] = (alpha * 255.0).round() as u8;
                }
            })
        });

        debug!(zoom_scale, factor, "rendered tile pixels");
        Ok(pixels)
    }

    /// Render one tile and encode it as a PNG.
    pub fn render_png<'a, I>(
        &self,
        points: I,
        viewport: &BoundingBox,
        zoom_scale: f64,
        stats: &ZoomStatistics,
    ) -> HeatResult<Vec<u8>>
    where
        I: IntoIterator<Item = &'a HeatPoint>,
    {
        let pixels = self.render_pixels(points, viewport, zoom_scale, stats)?;
        create_png(&pixels, self.options.tile_size, self.options.tile_size)
    }
}
