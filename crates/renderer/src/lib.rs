//! Density heat-map rendering for tiled maps.
//!
//! The pipeline per tile draw:
//! - bucket in-range weighted points onto a fixed-size grid and splat each
//!   through a radial decay kernel ([`density`]),
//! - normalize raw density by a zoom-adaptive factor ([`scale`]),
//! - map normalized density to color ([`ramp`]),
//! - emit filled rectangles or RGBA pixels ([`tile`]).
//!
//! Every input to a draw is immutable (kernel, statistics, point set), each
//! draw owns its scratch grid, and all stages are pure, so concurrent tile
//! draws need no synchronization.

pub mod buffer_pool;
pub mod density;
pub mod kernel;
pub mod png;
pub mod ramp;
pub mod scale;
pub mod tile;

pub use density::{aggregate, padded_viewport, DensityGrid};
pub use kernel::{Kernel, DEFAULT_KERNEL_RADIUS};
pub use ramp::{AlphaMode, Color, Ramp, RampStop};
pub use scale::{scale_factor, ZoomStatistics};
pub use tile::{HeatRect, RenderOptions, TileRenderer, DEFAULT_TILE_SIZE};
