//! Density-to-color mapping.

use heatmap_common::{HeatError, HeatResult};
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// One ramp entry: adjusted densities at or above `threshold` take `color`,
/// until the next entry's threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RampStop {
    pub threshold: f64,
    pub color: [u8; 3],
}

/// Alpha policy for drawn cells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AlphaMode {
    /// Constant alpha for every drawn cell.
    Fixed { value: f64 },
    /// Alpha follows normalized density, capped: `min(cap, density)`.
    DensityScaled { cap: f64 },
}

impl Default for AlphaMode {
    fn default() -> Self {
        AlphaMode::DensityScaled { cap: 0.8 }
    }
}

impl AlphaMode {
    /// Check the configured value/cap is in `[0, 1]`.
    pub fn validate(&self) -> HeatResult<()> {
        let v = match *self {
            AlphaMode::Fixed { value } => value,
            AlphaMode::DensityScaled { cap } => cap,
        };
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(HeatError::InvalidAlpha(v));
        }
        Ok(())
    }

    /// Alpha for a normalized density value.
    pub fn alpha_for(&self, normalized: f64) -> f64 {
        match *self {
            AlphaMode::Fixed { value } => value,
            AlphaMode::DensityScaled { cap } => normalized.max(0.0).min(cap),
        }
    }
}

/// Ordered color ramp with a square-root response.
///
/// `color_for` first takes the square root of the normalized density -
/// compressing the low end so faint density stays visible - then picks the
/// last stop whose threshold the adjusted value reaches. The stops move
/// from a pale gray-blue at the bottom through greens, yellows and oranges
/// to a red-violet at the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RampConfig")]
pub struct Ramp {
    stops: Vec<RampStop>,
}

/// Serialized form of a [`Ramp`]; validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RampConfig {
    stops: Vec<RampStop>,
}

impl TryFrom<RampConfig> for Ramp {
    type Error = HeatError;

    fn try_from(config: RampConfig) -> HeatResult<Self> {
        Ramp::new(config.stops)
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self {
            stops: vec![
                RampStop { threshold: 0.00, color: [178, 202, 219] },
                RampStop { threshold: 0.10, color: [147, 196, 222] },
                RampStop { threshold: 0.18, color: [117, 190, 218] },
                RampStop { threshold: 0.25, color: [91, 192, 196] },
                RampStop { threshold: 0.31, color: [102, 203, 156] },
                RampStop { threshold: 0.37, color: [146, 211, 115] },
                RampStop { threshold: 0.42, color: [196, 218, 95] },
                RampStop { threshold: 0.47, color: [235, 219, 85] },
                RampStop { threshold: 0.52, color: [245, 190, 73] },
                RampStop { threshold: 0.58, color: [244, 146, 61] },
                RampStop { threshold: 0.64, color: [234, 95, 52] },
                RampStop { threshold: 0.70, color: [210, 50, 48] },
                RampStop { threshold: 0.77, color: [146, 22, 88] },
            ],
        }
    }
}

impl Ramp {
    /// Build a ramp from stops. Fails unless the stops are non-empty,
    /// finite, and strictly ascending, with the first at 0.
    pub fn new(stops: Vec<RampStop>) -> HeatResult<Self> {
        if stops.is_empty() {
            return Err(HeatError::InvalidRamp("no stops".to_string()));
        }
        if stops[0].threshold != 0.0 {
            return Err(HeatError::InvalidRamp(format!(
                "first stop must be at threshold 0, got {}",
                stops[0].threshold
            )));
        }
        for pair in stops.windows(2) {
            if !pair[1].threshold.is_finite() || pair[1].threshold <= pair[0].threshold {
                return Err(HeatError::InvalidRamp(format!(
                    "thresholds must ascend strictly, got {} after {}",
                    pair[1].threshold, pair[0].threshold
                )));
            }
        }
        Ok(Self { stops })
    }

    /// Load a ramp from its JSON form: `{"stops": [{"threshold": ..,
    /// "color": [r, g, b]}, ..]}`.
    pub fn from_json(json: &str) -> HeatResult<Self> {
        let config: RampConfig =
            serde_json::from_str(json).map_err(|e| HeatError::InvalidRamp(e.to_string()))?;
        Ramp::new(config.stops)
    }

    /// Map a normalized density to an opaque color; alpha is a separate
    /// policy ([`AlphaMode`]).
    pub fn color_for(&self, normalized: f64) -> Color {
        let adjusted = normalized.max(0.0).sqrt();

        let mut rgb = self.stops[0].color;
        for stop in &self.stops {
            if adjusted >= stop.threshold {
                rgb = stop.color;
            } else {
                break;
            }
        }
        Color::opaque(rgb[0], rgb[1], rgb[2])
    }

    /// Index of the stop `color_for` would pick, mostly useful in tests.
    pub fn stop_index_for(&self, normalized: f64) -> usize {
        let adjusted = normalized.max(0.0).sqrt();
        let mut index = 0;
        for (i, stop) in self.stops.iter().enumerate() {
            if adjusted >= stop.threshold {
                index = i;
            } else {
                break;
            }
        }
        index
    }

    /// The ordered stops.
    pub fn stops(&self) -> &[RampStop] {
        &self.stops
    }
}
