//! Multi-stop color gradient.
//!
//! Stops are spaced evenly over `[0, 1]`: with `n + 1` stops there are `n`
//! segments of width `1 / n`, and a value `t` is colored by linear
//! interpolation inside the segment it falls in. `t = 0` yields the first
//! stop and `t = 1` the last one, exactly.

use crate::basics::clamp_unit;
use crate::color::Rgb8;
use crate::error::{PatternError, Result};

/// Minimum number of stops for interpolation.
pub const MIN_STOPS: usize = 2;

// ============================================================================
// ColorGradient
// ============================================================================

/// An ordered, validated list of evenly spaced color stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGradient {
    stops: Vec<Rgb8>,
}

impl ColorGradient {
    /// Build a gradient, failing if fewer than two stops are given.
    pub fn new(stops: Vec<Rgb8>) -> Result<Self> {
        if stops.len() < MIN_STOPS {
            return Err(PatternError::TooFewStops { count: stops.len() });
        }
        Ok(Self { stops })
    }

    /// Build a gradient from `#rrggbb` strings.
    pub fn from_hex<S: AsRef<str>>(stops: &[S]) -> Result<Self> {
        Self::new(crate::color::parse_hex_list(stops)?)
    }

    pub fn stops(&self) -> &[Rgb8] {
        &self.stops
    }

    /// Number of interpolation segments (`stops - 1`).
    pub fn segments(&self) -> usize {
        self.stops.len() - 1
    }

    /// Color at position `t`.
    ///
    /// `t` is clamped to `[0, 1]` first; NaN is treated as 0.
    pub fn color_at(&self, t: f64) -> Rgb8 {
        interpolate(&self.stops, t)
    }
}

/// Color at position `t` along `stops`, validating the stop count.
pub fn gradient(stops: &[Rgb8], t: f64) -> Result<Rgb8> {
    if stops.len() < MIN_STOPS {
        return Err(PatternError::TooFewStops { count: stops.len() });
    }
    Ok(interpolate(stops, t))
}

/// `stops` must hold at least two colors.
#[inline]
fn interpolate(stops: &[Rgb8], t: f64) -> Rgb8 {
    let t = clamp_unit(t);
    let n = stops.len() - 1;
    let scaled = t * n as f64;
    // t = 1 would index one past the last segment
    let i = (scaled.floor() as usize).min(n - 1);
    let f = scaled - i as f64;
    stops[i].gradient(&stops[i + 1], f)
}

// ============================================================================
// Tests
// ============================================================================
