//! Geometric and iteration math shared by the pattern functions.

use core::f64::consts::PI;

// ============================================================================
// Constants
// ============================================================================

/// Iteration cap for the escape-time fractals.
pub const MAX_ESCAPE_ITERATIONS: u32 = 100;

/// Squared escape radius: an orbit has escaped once `|z|^2 >= 4`.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// The golden angle used by the phyllotaxis pattern, in radians.
pub const GOLDEN_ANGLE: f64 = 137.5 / 180.0 * PI;

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Squared distance from the origin.
#[inline]
pub fn calc_sq_radius(x: f64, y: f64) -> f64 {
    x * x + y * y
}

/// Wrapped angular distance `min(|a - b|, 2π - |a - b|)`.
///
/// Not reduced modulo 2π first: for `|a - b| > 2π` the second term goes
/// negative and is returned as is.
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(2.0 * PI - d)
}

// ============================================================================
// Escape-time iteration
// ============================================================================

/// Iterate `z -> z^2 + c` from `z0` and count the steps taken before the
/// orbit escapes, up to `max_iter`.
///
/// The escape test runs before each step, so a starting point already
/// outside the radius returns 0 and an orbit that never escapes returns
/// `max_iter`.
#[inline]
pub fn escape_time(z0: (f64, f64), c: (f64, f64), max_iter: u32) -> u32 {
    let (mut zx, mut zy) = z0;
    let (cr, ci) = c;
    let mut i = 0;
    while i < max_iter && zx * zx + zy * zy < ESCAPE_RADIUS_SQ {
        let tmp = zx * zx - zy * zy + cr;
        zy = 2.0 * zx * zy + ci;
        zx = tmp;
        i += 1;
    }
    i
}

// ============================================================================
// Tests
// ============================================================================
