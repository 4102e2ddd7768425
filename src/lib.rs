//! # pattern-gen
//!
//! Per-pixel mathematical pattern renderer. Every pixel of a raster is mapped
//! into the `[-2, 2]²` domain, run through one of twelve pattern functions,
//! optionally jittered and blended with noise, and colored through a
//! multi-stop gradient.
//!
//! Patterns:
//!
//! - Escape-time fractals: Mandelbrot set, Julia set
//! - Trigonometric fields: sine waves, ripples, spiral, hyperbolic, polar rose,
//!   and a sine-based noise approximation
//! - Tilings and distance fields: checkerboard, Voronoi, Sierpinski folding,
//!   phyllotaxis
//!
//! ## Architecture
//!
//! Rendering is a one-way pipeline with no cross-pixel state:
//!
//! 1. **Normalize**: pixel index to domain coordinate ([`basics`])
//! 2. **Distort**: optional coordinate jitter ([`compositor`])
//! 3. **Evaluate**: pattern function ([`pattern`])
//! 4. **Blend and clamp**: optional uniform noise, clamp to `[0, 1]`
//! 5. **Color-map**: piecewise-linear gradient ([`gradient`])
//! 6. **Write**: RGBA8 raster ([`raster`]), exportable as PNG ([`export`])
//!
//! ```
//! use pattern_gen::{compositor, PatternKind, RenderParameters, Rgb8};
//!
//! let params = RenderParameters::new(PatternKind::Checkerboard, vec![Rgb8::BLACK, Rgb8::WHITE]);
//! let raster = compositor::render(4, 1, &params, 0).unwrap();
//! assert_eq!(raster.pixel(1, 0), Rgb8::WHITE);
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod error;
pub mod math;

// Pattern evaluation and color mapping
pub mod gradient;
pub mod pattern;

// Rendering
pub mod compositor;
pub mod params;
pub mod raster;

// Output handoff
pub mod export;

pub use color::Rgb8;
pub use error::{PatternError, Result};
pub use gradient::ColorGradient;
pub use params::RenderParameters;
pub use pattern::{evaluate, PatternKind};
pub use raster::Raster;
