//! Error types for heat-map construction and rendering.

use thiserror::Error;

/// Result type alias using HeatError.
pub type HeatResult<T> = Result<T, HeatError>;

/// Primary error type for heat-map operations.
///
/// Everything here is a precondition violation surfaced to the caller;
/// nothing is retried or recovered internally since every operation in the
/// pipeline is pure and deterministic.
#[derive(Debug, Error)]
pub enum HeatError {
    // === Construction errors ===
    #[error("Point set is empty; a heat map needs at least one sample")]
    EmptyPointSet,

    #[error("Invalid kernel radius: {0} (must be at least 1 pixel)")]
    InvalidKernelRadius(usize),

    #[error("Invalid tile size: {0} (must be at least 1 pixel)")]
    InvalidTileSize(usize),

    // === Configuration errors ===
    #[error("Invalid zoom scale: {0} (must be finite and positive)")]
    InvalidZoomScale(f64),

    #[error("Invalid alpha value: {0} (must be in [0, 1])")]
    InvalidAlpha(f64),

    #[error("Invalid density threshold: {0} (must be finite and non-negative)")]
    InvalidThreshold(f64),

    #[error("Invalid zoom level count: {0} (must be at least 2)")]
    InvalidZoomLevels(u32),

    #[error("Invalid shape exponent: {0} (must be finite and at least 1)")]
    InvalidShapeExponent(f64),

    #[error("Invalid color ramp: {0}")]
    InvalidRamp(String),

    // === Rendering errors ===
    #[error("Encoding failed: {0}")]
    EncodingError(String),
}
