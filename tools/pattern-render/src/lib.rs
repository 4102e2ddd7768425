// Copyright 2025. Command-line front end for pattern-gen.
//
// Provides render argument parsing, raster file I/O (PNG and raw RGBA), and
// diff image generation for comparing renders.

use std::fs::File;
use std::io::{Read as IoRead, Write as IoWrite};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use pattern_gen::color::parse_hex_list;
use pattern_gen::export;
use pattern_gen::{PatternKind, Raster, RenderParameters};

// ============================================================================
// Render arguments
// ============================================================================

/// Everything the `render` command needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub params: RenderParameters,
    pub width: u32,
    pub height: u32,
    /// Explicit seed; `None` lets the caller pick one.
    pub seed: Option<u64>,
    pub output: PathBuf,
    /// Force the single-threaded path.
    pub sequential: bool,
}

/// Load a JSON parameter snapshot. Missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<RenderParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn parse_f64(flag: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("Invalid value for {}: {:?}", flag, value))
}

/// Parse `render` arguments:
/// `<pattern> <width> <height> [--config f.json] [--intensity v]
/// [--randomness v] [--distortion v] [--colors #a,#b,..] [--seed n]
/// [--sequential] [-o out.png]`.
///
/// Values are applied in order: config file, then the pattern argument,
/// then the individual flags.
pub fn parse_render_args(args: &[String]) -> Result<RenderArgs> {
    if args.len() < 3 {
        bail!("Usage: pattern-render render <pattern> <width> <height> [options] -o <output>");
    }

    let pattern: PatternKind = args[0].parse()?;
    let width: u32 = args[1]
        .parse()
        .with_context(|| format!("Invalid width {:?}", args[1]))?;
    let height: u32 = args[2]
        .parse()
        .with_context(|| format!("Invalid height {:?}", args[2]))?;

    let rest = &args[3..];
    let value_of = |i: usize| -> Result<&String> {
        rest.get(i + 1)
            .ok_or_else(|| anyhow!("Missing value after {}", rest[i]))
    };

    // The config file seeds the parameters wherever it appears on the line.
    let mut params = match rest.iter().position(|a| a == "--config") {
        Some(i) => load_params(Path::new(value_of(i)?))?,
        None => RenderParameters::default(),
    };
    params.pattern = pattern;

    let mut seed = None;
    let mut output = None;
    let mut sequential = false;

    let mut i = 0;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "--config" => {}
            "--intensity" => params.intensity = parse_f64(flag, value_of(i)?)?,
            "--randomness" => params.randomness = parse_f64(flag, value_of(i)?)?,
            "--distortion" => params.distortion = parse_f64(flag, value_of(i)?)?,
            "--colors" => {
                let items: Vec<&str> = value_of(i)?.split(',').map(str::trim).collect();
                params.color_stops = parse_hex_list(&items)?;
            }
            "--seed" => {
                let v = value_of(i)?;
                seed = Some(
                    v.parse::<u64>()
                        .with_context(|| format!("Invalid seed {:?}", v))?,
                );
            }
            "-o" => output = Some(PathBuf::from(value_of(i)?)),
            "--sequential" => {
                sequential = true;
                i += 1;
                continue;
            }
            other => bail!("Unknown option: {}", other),
        }
        i += 2;
    }

    let output = output
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}x{}.png", pattern.id(), width, height)));

    Ok(RenderArgs {
        params,
        width,
        height,
        seed,
        output,
        sequential,
    })
}

// ============================================================================
// Diff images
// ============================================================================

/// Generate a visual diff image highlighting pixel differences.
///
/// - Identical pixels are shown as dark gray.
/// - Different pixels are shown in red, with brightness proportional to the
///   magnitude of the difference (amplified 10x for visibility).
pub fn generate_diff_image(a: &Raster, b: &Raster) -> Result<Raster> {
    if a.width() != b.width() || a.height() != b.height() {
        bail!(
            "Size mismatch: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        );
    }

    let mut diff = Raster::new(a.width(), a.height());
    for ((pa, pb), out) in a
        .as_bytes()
        .chunks_exact(4)
        .zip(b.as_bytes().chunks_exact(4))
        .zip(diff.as_bytes_mut().chunks_exact_mut(4))
    {
        let max_diff = (0..3).map(|c| pa[c].abs_diff(pb[c])).max().unwrap_or(0);
        if max_diff == 0 {
            out.copy_from_slice(&[40, 40, 40, 255]);
        } else {
            let v = (max_diff as u16 * 10).min(255) as u8;
            out.copy_from_slice(&[v, 0, 0, 255]);
        }
    }
    Ok(diff)
}

/// Generate a side-by-side comparison image: [A | Diff | B]
pub fn generate_sidebyside(a: &Raster, b: &Raster) -> Result<Raster> {
    let diff = generate_diff_image(a, b)?;
    let mut out = Raster::new(a.width() * 3, a.height());
    let stride = a.stride();

    for y in 0..a.height() {
        let row = out.row_slice_mut(y);
        row[..stride].copy_from_slice(a.row_slice(y));
        row[stride..stride * 2].copy_from_slice(diff.row_slice(y));
        row[stride * 2..].copy_from_slice(b.row_slice(y));
    }
    Ok(out)
}

// ============================================================================
// Raw RGBA I/O (for precise byte-for-byte comparison)
// ============================================================================

/// Save a raster as raw RGBA with a simple header: [width:u32][height:u32][rgba_data].
pub fn save_raw(path: &Path, raster: &Raster) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    f.write_all(&raster.width().to_le_bytes())?;
    f.write_all(&raster.height().to_le_bytes())?;
    f.write_all(raster.as_bytes())?;
    Ok(())
}

/// Load a raw RGBA file.
pub fn load_raw(path: &Path) -> Result<Raster> {
    let mut data = Vec::new();
    File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .read_to_end(&mut data)?;

    if data.len() < 8 {
        bail!("Raw file too small: {}", path.display());
    }

    let width = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let height = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    Ok(Raster::from_rgba(width, height, data.split_off(8))?)
}

/// Load an image file, detecting format by extension.
pub fn load_image(path: &Path) -> Result<Raster> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => Ok(export::load_png(path)?),
        Some("raw") | Some("rgba") => load_raw(path),
        _ => bail!("Unsupported image format: {:?}", path),
    }
}

/// Save an image file, detecting format by extension.
pub fn save_image(path: &Path, raster: &Raster) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => Ok(export::save_png(raster, path)?),
        Some("raw") | Some("rgba") => save_raw(path, raster),
        _ => bail!("Unsupported image format: {:?}", path),
    }
}

// ============================================================================
// Tests
// ============================================================================
