//! PNG export of finished rasters.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use log::debug;

use crate::error::{PatternError, Result};
use crate::raster::Raster;

/// File name offered for downloads.
pub const DEFAULT_EXPORT_NAME: &str = "pattern.png";

/// Encode a raster to PNG bytes (8-bit RGBA, lossless).
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    let encoder = PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        raster.as_bytes(),
        raster.width(),
        raster.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(png_bytes)
}

/// Encode a raster to PNG and write it to `path`.
pub fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    let bytes = encode_png(raster)?;
    std::fs::write(path, &bytes).map_err(|source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "wrote {}x{} PNG ({} bytes) to {}",
        raster.width(),
        raster.height(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Decode PNG bytes back into a raster (converted to RGBA8).
pub fn decode_png(bytes: &[u8]) -> Result<Raster> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
    let (width, height) = img.dimensions();
    Raster::from_rgba(width, height, img.into_raw())
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path) -> Result<Raster> {
    let bytes = std::fs::read(path).map_err(|source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes)
}

// ============================================================================
// Tests
// ============================================================================
