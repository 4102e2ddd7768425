//! Render parameter snapshot.
//!
//! A [`RenderParameters`] value is built (or deserialized) by the caller,
//! validated once, and then read-only for the whole render. Partial JSON
//! snapshots fill the missing fields from [`RenderParameters::default`].

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Rgb8;
use crate::error::{PatternError, Result};
use crate::gradient::ColorGradient;
use crate::pattern::PatternKind;

// ============================================================================
// Parameter ranges
// ============================================================================

/// Inclusive slider range for a scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    #[inline]
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

pub const INTENSITY_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.01);
pub const RANDOMNESS_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.01);
pub const DISTORTION_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.01);

/// Palette of a fresh session.
pub const DEFAULT_STOPS: [Rgb8; 3] = [Rgb8::RED, Rgb8::GREEN, Rgb8::BLUE];

/// Color appended by [`RenderParameters::push_default_stop`].
pub const NEW_STOP_COLOR: Rgb8 = Rgb8::WHITE;

// ============================================================================
// RenderParameters
// ============================================================================

/// Everything a render needs besides the target raster and a seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderParameters {
    pub pattern: PatternKind,
    pub intensity: f64,
    pub randomness: f64,
    pub distortion: f64,
    pub color_stops: Vec<Rgb8>,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            pattern: PatternKind::MandelbrotSet,
            intensity: 1.0,
            randomness: 0.0,
            distortion: 0.0,
            color_stops: DEFAULT_STOPS.to_vec(),
        }
    }
}

impl RenderParameters {
    pub fn new(pattern: PatternKind, color_stops: Vec<Rgb8>) -> Self {
        Self {
            pattern,
            color_stops,
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_distortion(mut self, distortion: f64) -> Self {
        self.distortion = distortion;
        self
    }

    pub fn with_stops(mut self, stops: Vec<Rgb8>) -> Self {
        self.color_stops = stops;
        self
    }

    /// Append a stop at the end of the palette.
    pub fn push_stop(&mut self, color: Rgb8) {
        self.color_stops.push(color);
    }

    /// Append the default new-stop color (white).
    pub fn push_default_stop(&mut self) {
        self.push_stop(NEW_STOP_COLOR);
    }

    /// Replace the stop at `index`.
    pub fn set_stop(&mut self, index: usize, color: Rgb8) -> Result<()> {
        let len = self.color_stops.len();
        let slot = self
            .color_stops
            .get_mut(index)
            .ok_or(PatternError::StopIndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Check the snapshot and build its gradient.
    ///
    /// Fails on fewer than two stops or a non-finite scalar. Values outside
    /// the slider ranges are accepted; see [`clamped`](Self::clamped).
    pub fn validate(&self) -> Result<ColorGradient> {
        for (name, value) in [
            ("intensity", self.intensity),
            ("randomness", self.randomness),
            ("distortion", self.distortion),
        ] {
            if !value.is_finite() {
                return Err(PatternError::NonFiniteParameter { name, value });
            }
        }
        ColorGradient::new(self.color_stops.clone())
    }

    /// Copy with every scalar snapped into its slider range.
    ///
    /// Non-finite values are left alone for [`validate`](Self::validate) to
    /// reject.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        out.intensity = clamp_param("intensity", self.intensity, INTENSITY_RANGE);
        out.randomness = clamp_param("randomness", self.randomness, RANDOMNESS_RANGE);
        out.distortion = clamp_param("distortion", self.distortion, DISTORTION_RANGE);
        out
    }
}

fn clamp_param(name: &str, value: f64, range: ParamRange) -> f64 {
    if !value.is_finite() || range.contains(value) {
        return value;
    }
    let clamped = range.clamp(value);
    warn!(
        "{} {} outside [{}, {}], clamped to {}",
        name, value, range.min, range.max, clamped
    );
    clamped
}

// ============================================================================
// Tests
// ============================================================================
