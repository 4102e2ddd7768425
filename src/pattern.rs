//! Pattern functions and the closed set of pattern kinds.
//!
//! Every pattern maps a point `(x, y)` of the `[-2, 2]²` domain and a scalar
//! intensity to one value, typically in `[0, 1]`. The functions are pure and
//! stateless; the compositor clamps their output before color mapping.
//!
//! [`evaluate`] is total: for any input, including non-positive intensities
//! and `atan2(0, 0)`, it returns a finite value. Anything that would come out
//! as NaN or infinite is replaced by 0.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basics::finite_or_zero;
use crate::error::PatternError;
use crate::math::{
    angular_distance, calc_distance, calc_sq_radius, escape_time, GOLDEN_ANGLE,
    MAX_ESCAPE_ITERATIONS,
};

// ============================================================================
// PatternKind
// ============================================================================

/// Selector for one of the twelve pattern functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatternKind {
    #[default]
    #[serde(rename = "mandelbrot")]
    MandelbrotSet,
    #[serde(rename = "julia")]
    JuliaSet,
    #[serde(rename = "sineWaves")]
    SineWaves,
    #[serde(rename = "ripples")]
    Ripples,
    #[serde(rename = "spiral")]
    Spiral,
    #[serde(rename = "hyperbolic")]
    Hyperbolic,
    #[serde(rename = "polarRose")]
    PolarRose,
    #[serde(rename = "checkerboard")]
    Checkerboard,
    #[serde(rename = "voronoi")]
    Voronoi,
    /// Shares the sine-waves formula; not gradient noise.
    #[serde(rename = "perlinNoise")]
    PerlinNoiseApprox,
    #[serde(rename = "sierpinskiTriangle")]
    SierpinskiTriangle,
    #[serde(rename = "phyllotaxis")]
    Phyllotaxis,
}

impl PatternKind {
    /// All variants, in menu order.
    pub const ALL: [PatternKind; 12] = [
        PatternKind::MandelbrotSet,
        PatternKind::JuliaSet,
        PatternKind::SineWaves,
        PatternKind::Ripples,
        PatternKind::Spiral,
        PatternKind::Hyperbolic,
        PatternKind::PolarRose,
        PatternKind::Checkerboard,
        PatternKind::Voronoi,
        PatternKind::PerlinNoiseApprox,
        PatternKind::SierpinskiTriangle,
        PatternKind::Phyllotaxis,
    ];

    /// Stable identifier used in config files, CLI arguments, and the web demo.
    pub fn id(self) -> &'static str {
        match self {
            PatternKind::MandelbrotSet => "mandelbrot",
            PatternKind::JuliaSet => "julia",
            PatternKind::SineWaves => "sineWaves",
            PatternKind::Ripples => "ripples",
            PatternKind::Spiral => "spiral",
            PatternKind::Hyperbolic => "hyperbolic",
            PatternKind::PolarRose => "polarRose",
            PatternKind::Checkerboard => "checkerboard",
            PatternKind::Voronoi => "voronoi",
            PatternKind::PerlinNoiseApprox => "perlinNoise",
            PatternKind::SierpinskiTriangle => "sierpinskiTriangle",
            PatternKind::Phyllotaxis => "phyllotaxis",
        }
    }

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            PatternKind::MandelbrotSet => "Mandelbrot Set",
            PatternKind::JuliaSet => "Julia Set",
            PatternKind::SineWaves => "Sine Waves",
            PatternKind::Ripples => "Ripples",
            PatternKind::Spiral => "Spiral",
            PatternKind::Hyperbolic => "Hyperbolic",
            PatternKind::PolarRose => "Polar Rose",
            PatternKind::Checkerboard => "Checkerboard",
            PatternKind::Voronoi => "Voronoi",
            PatternKind::PerlinNoiseApprox => "Perlin Noise",
            PatternKind::SierpinskiTriangle => "Sierpinski Triangle",
            PatternKind::Phyllotaxis => "Phyllotaxis",
        }
    }

    /// Evaluate this pattern at `(x, y)`. See [`evaluate`].
    #[inline]
    pub fn evaluate(self, x: f64, y: f64, intensity: f64) -> f64 {
        evaluate(self, x, y, intensity)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PatternKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, PatternError> {
        PatternKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s)
            .ok_or_else(|| PatternError::UnknownPattern(s.to_string()))
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Evaluate pattern `kind` at the domain point `(x, y)`.
///
/// Never returns NaN or an infinity.
pub fn evaluate(kind: PatternKind, x: f64, y: f64, intensity: f64) -> f64 {
    let v = match kind {
        PatternKind::MandelbrotSet => mandelbrot(x, y, intensity),
        PatternKind::JuliaSet => julia(x, y, intensity),
        PatternKind::SineWaves | PatternKind::PerlinNoiseApprox => sine_waves(x, y, intensity),
        PatternKind::Ripples => ripples(x, y, intensity),
        PatternKind::Spiral => spiral(x, y, intensity),
        PatternKind::Hyperbolic => hyperbolic(x, y, intensity),
        PatternKind::PolarRose => polar_rose(x, y, intensity),
        PatternKind::Checkerboard => checkerboard(x, y, intensity),
        PatternKind::Voronoi => voronoi(x, y, intensity),
        PatternKind::SierpinskiTriangle => sierpinski(x, y, intensity),
        PatternKind::Phyllotaxis => phyllotaxis(x, y, intensity),
    };
    finite_or_zero(v)
}

// ============================================================================
// Escape-time fractals
// ============================================================================

#[inline]
fn mandelbrot(x: f64, y: f64, intensity: f64) -> f64 {
    let n = escape_time((0.0, 0.0), (intensity * x, intensity * y), MAX_ESCAPE_ITERATIONS);
    n as f64 / MAX_ESCAPE_ITERATIONS as f64
}

/// Julia constant: the real part moves with intensity, the imaginary part is fixed.
const JULIA_C_RE: f64 = -0.7;
const JULIA_C_RE_PER_INTENSITY: f64 = 0.1;
const JULIA_C_IM: f64 = 0.27015;

#[inline]
fn julia(x: f64, y: f64, intensity: f64) -> f64 {
    let c = (JULIA_C_RE + JULIA_C_RE_PER_INTENSITY * intensity, JULIA_C_IM);
    let n = escape_time((x, y), c, MAX_ESCAPE_ITERATIONS);
    n as f64 / MAX_ESCAPE_ITERATIONS as f64
}

// ============================================================================
// Trigonometric fields
// ============================================================================

#[inline]
fn sine_waves(x: f64, y: f64, intensity: f64) -> f64 {
    ((x * intensity).sin() + (y * intensity).sin()) / 2.0
}

#[inline]
fn ripples(x: f64, y: f64, intensity: f64) -> f64 {
    (calc_sq_radius(x, y) * intensity).sin()
}

#[inline]
fn spiral(x: f64, y: f64, intensity: f64) -> f64 {
    (calc_sq_radius(x, y).sqrt() * intensity).sin()
}

#[inline]
fn hyperbolic(x: f64, y: f64, intensity: f64) -> f64 {
    (x * intensity).tanh() * (y * intensity).tanh()
}

#[inline]
fn polar_rose(x: f64, y: f64, intensity: f64) -> f64 {
    let theta = y.atan2(x);
    let r = calc_sq_radius(x, y).sqrt();
    (intensity * theta).sin() * r.sin()
}

// ============================================================================
// Tilings and distance fields
// ============================================================================

#[inline]
fn checkerboard(x: f64, y: f64, intensity: f64) -> f64 {
    let cells = (x * intensity).floor() + (y * intensity).floor();
    // rem_euclid keeps odd negative sums at 1; `+ 0.0` turns -0.0 into 0.0.
    cells.rem_euclid(2.0) + 0.0
}

const VORONOI_SEEDS: usize = 10;

#[inline]
fn voronoi_seed(i: usize) -> (f64, f64) {
    let i = i as f64;
    ((i * 567.4).sin() * 2.0, (i * 678.2).cos() * 2.0)
}

fn voronoi(x: f64, y: f64, intensity: f64) -> f64 {
    let min_dist = (0..VORONOI_SEEDS)
        .map(|i| {
            let (px, py) = voronoi_seed(i);
            calc_distance(x, y, px, py)
        })
        .fold(f64::INFINITY, f64::min);
    min_dist * intensity
}

// ============================================================================
// Folding and phyllotaxis
// ============================================================================

fn sierpinski(x: f64, y: f64, intensity: f64) -> f64 {
    let scale = intensity * 10.0;
    if scale.is_nan() || scale <= 0.0 {
        return 0.0;
    }
    // Saturating cast; the loop also ends once every mantissa bit is folded out.
    let limit = scale.floor() as u32;
    let mut x = (x + 2.0) / 4.0;
    let mut y = (y + 2.0) / 4.0;
    let mut steps = 0u32;
    while steps < limit && x > 0.0 && y > 0.0 && x + y < 1.0 {
        if x > 0.5 {
            x = 2.0 * x - 1.0;
        } else if y > 0.5 {
            y = 2.0 * y - 1.0;
        } else {
            x *= 2.0;
            y *= 2.0;
        }
        steps += 1;
    }
    steps as f64 / scale
}

fn phyllotaxis(x: f64, y: f64, intensity: f64) -> f64 {
    let r = calc_sq_radius(x, y).sqrt();
    let theta = y.atan2(x);
    let n = (r * intensity * 10.0).floor();
    let phi = n * GOLDEN_ANGLE;
    angular_distance(theta, phi) / core::f64::consts::PI
}

// ============================================================================
// Tests
// ============================================================================
