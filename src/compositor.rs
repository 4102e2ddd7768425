//! Image compositor: evaluates a pattern for every pixel of a raster.
//!
//! Per pixel `(px, py)` of a `width × height` raster:
//!
//! 1. **Normalize**: `nx = px / width * 4 - 2`, `ny = py / height * 4 - 2`
//! 2. **Distort**: add `(U - 0.5) * distortion` to each axis
//! 3. **Evaluate**: run the selected pattern at the distorted point
//! 4. **Blend**: `v * (1 - randomness) + U' * randomness`
//! 5. **Clamp**: to `[0, 1]`
//! 6. **Color-map**: through the parameter gradient
//!
//! Random draws are skipped when the corresponding parameter is 0, so a
//! render with both at 0 never touches the random source and is fully
//! deterministic.
//!
//! Seeded renders give every row its own `StdRng` derived from the seed and
//! the row index. The sequential and the row-parallel paths therefore write
//! byte-identical rasters for the same seed.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::basics::{clamp_unit, normalize_axis};
use crate::error::Result;
use crate::gradient::ColorGradient;
use crate::params::RenderParameters;
use crate::pattern::PatternKind;
use crate::raster::{Raster, BPP};

// ============================================================================
// PixelShader
// ============================================================================

/// Validated, render-ready view of a parameter snapshot for one raster size.
pub struct PixelShader {
    pattern: PatternKind,
    intensity: f64,
    randomness: f64,
    distortion: f64,
    gradient: ColorGradient,
    width: u32,
    height: u32,
}

impl PixelShader {
    /// Validate `params` and bind them to a raster size.
    pub fn new(params: &RenderParameters, width: u32, height: u32) -> Result<Self> {
        let gradient = params.validate()?;
        Ok(Self {
            pattern: params.pattern,
            intensity: params.intensity,
            randomness: params.randomness,
            distortion: params.distortion,
            gradient,
            width,
            height,
        })
    }

    /// Gradient position for pixel `(px, py)`, in `[0, 1]`.
    pub fn sample<R: Rng + ?Sized>(&self, px: u32, py: u32, rng: &mut R) -> f64 {
        let mut x = normalize_axis(px, self.width);
        let mut y = normalize_axis(py, self.height);

        if self.distortion != 0.0 {
            x += (rng.gen::<f64>() - 0.5) * self.distortion;
            y += (rng.gen::<f64>() - 0.5) * self.distortion;
        }

        let mut v = self.pattern.evaluate(x, y, self.intensity);

        if self.randomness != 0.0 {
            v = v * (1.0 - self.randomness) + rng.gen::<f64>() * self.randomness;
        }

        clamp_unit(v)
    }

    /// Write row `py` into `row` (`width * 4` bytes).
    pub fn shade_row<R: Rng + ?Sized>(&self, py: u32, row: &mut [u8], rng: &mut R) {
        for (px, out) in row.chunks_exact_mut(BPP).enumerate() {
            let t = self.sample(px as u32, py, rng);
            out.copy_from_slice(&self.gradient.color_at(t).to_rgba());
        }
    }
}

// ============================================================================
// Render entry points
// ============================================================================

/// Derive the seed of row `y` from the render seed.
#[inline]
fn row_seed(seed: u64, y: u32) -> u64 {
    seed ^ (y as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render into `raster`, drawing all random samples from one stream.
///
/// Pixels are visited row by row, left to right. Fails before writing any
/// pixel if the parameters do not validate.
pub fn render_with<R: Rng + ?Sized>(
    raster: &mut Raster,
    params: &RenderParameters,
    rng: &mut R,
) -> Result<()> {
    let shader = PixelShader::new(params, raster.width(), raster.height())?;
    debug!(
        "render {} {}x{} (single stream)",
        params.pattern,
        raster.width(),
        raster.height()
    );
    for y in 0..raster.height() {
        shader.shade_row(y, raster.row_slice_mut(y), rng);
    }
    Ok(())
}

/// Render into `raster` on the current thread with per-row seeded streams.
pub fn render_seeded(raster: &mut Raster, params: &RenderParameters, seed: u64) -> Result<()> {
    let shader = PixelShader::new(params, raster.width(), raster.height())?;
    debug!(
        "render {} {}x{} seed={} (sequential)",
        params.pattern,
        raster.width(),
        raster.height(),
        seed
    );
    for y in 0..raster.height() {
        let mut rng = StdRng::seed_from_u64(row_seed(seed, y));
        shader.shade_row(y, raster.row_slice_mut(y), &mut rng);
    }
    Ok(())
}

/// Render into `raster` with rows spread over the rayon thread pool.
///
/// Output is identical to [`render_seeded`] with the same seed.
#[cfg(feature = "parallel")]
pub fn render_parallel(raster: &mut Raster, params: &RenderParameters, seed: u64) -> Result<()> {
    use rayon::prelude::*;

    let shader = PixelShader::new(params, raster.width(), raster.height())?;
    debug!(
        "render {} {}x{} seed={} (parallel)",
        params.pattern,
        raster.width(),
        raster.height(),
        seed
    );
    let stride = raster.stride();
    if stride == 0 {
        return Ok(());
    }
    raster
        .as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = StdRng::seed_from_u64(row_seed(seed, y as u32));
            shader.shade_row(y as u32, row, &mut rng);
        });
    Ok(())
}

/// Allocate a `width × height` raster and render into it.
///
/// Uses the row-parallel path when the `parallel` feature is enabled.
pub fn render(width: u32, height: u32, params: &RenderParameters, seed: u64) -> Result<Raster> {
    let mut raster = Raster::new(width, height);
    #[cfg(feature = "parallel")]
    render_parallel(&mut raster, params, seed)?;
    #[cfg(not(feature = "parallel"))]
    render_seeded(&mut raster, params, seed)?;
    Ok(raster)
}

// ============================================================================
// Tests
// ============================================================================
