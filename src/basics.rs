//! Foundation constants and numeric helpers shared by every stage.
//!
//! The pattern domain, the default canvas size, and the rounding and
//! sanitizing primitives the evaluator, gradient, and compositor depend on.

// ============================================================================
// Domain and canvas constants
// ============================================================================

/// Lower bound of the square evaluation domain on both axes.
pub const DOMAIN_MIN: f64 = -2.0;

/// Upper bound of the square evaluation domain on both axes.
pub const DOMAIN_MAX: f64 = 2.0;

/// Side length of the evaluation domain (`DOMAIN_MAX - DOMAIN_MIN`).
pub const DOMAIN_SPAN: f64 = DOMAIN_MAX - DOMAIN_MIN;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1500;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 500;

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a non-negative double to the nearest unsigned integer, ties away
/// from zero.
///
/// Negative inputs saturate to 0 and NaN maps to 0 (`as` casts saturate).
#[inline]
pub fn uround(v: f64) -> u32 {
    v.round() as u32
}

/// Round a double to an 8-bit channel value, saturating at 0 and 255.
#[inline]
pub fn round_channel(v: f64) -> u8 {
    uround(v).min(u8::MAX as u32) as u8
}

/// Replace a non-finite value by 0.
///
/// Used as the last step of every scalar computation so that NaN or
/// infinities never reach the color mapper.
#[inline]
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    finite_or_zero(v).clamp(0.0, 1.0)
}

/// Map a pixel index on an axis of `extent` pixels into the evaluation domain.
///
/// Pixel 0 maps to `DOMAIN_MIN`; the last pixel stops one step short of
/// `DOMAIN_MAX`. A zero extent yields `DOMAIN_MIN`.
#[inline]
pub fn normalize_axis(index: u32, extent: u32) -> f64 {
    if extent == 0 {
        return DOMAIN_MIN;
    }
    (index as f64 / extent as f64) * DOMAIN_SPAN + DOMAIN_MIN
}

// ============================================================================
// Tests
// ============================================================================
