//! Output raster: row-major RGBA8 pixel storage.
//!
//! The raster stores 4 bytes per pixel (R, G, B, A) top-down with a stride of
//! `width * 4`, so the byte view can be handed directly to a display surface
//! (canvas `ImageData`, a window blit) or a PNG encoder. The compositor always
//! writes alpha 255.

use core::fmt;

use crate::color::Rgb8;
use crate::error::{PatternError, Result};

/// Bytes per pixel.
pub const BPP: usize = 4;

// ============================================================================
// Raster
// ============================================================================

/// A `width × height` grid of pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    data: Vec<u8>,
}

impl Raster {
    /// Create a raster with every byte zeroed (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * BPP],
        }
    }

    /// Wrap existing RGBA bytes, which must hold exactly `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BPP;
        if data.len() != expected {
            return Err(PatternError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// RGBA byte view for display or encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds ({}x{})",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * BPP
    }

    /// RGBA bytes of the pixel at `(x, y)`.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Color of the pixel at `(x, y)`, ignoring alpha.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        let [r, g, b, _] = self.rgba(x, y);
        Rgb8::new(r, g, b)
    }

    /// Overwrite the pixel at `(x, y)` with an opaque color.
    pub fn set_pixel(&mut self, x: u32, y: u32, c: Rgb8) {
        let i = self.offset(x, y);
        self.data[i..i + BPP].copy_from_slice(&c.to_rgba());
    }

    /// Immutable slice for row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutable slice for row `y`.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Fill every pixel with an opaque color.
    pub fn clear(&mut self, c: Rgb8) {
        let px = c.to_rgba();
        for chunk in self.data.chunks_exact_mut(BPP) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Compare two rasters pixel by pixel.
    ///
    /// Fails if the dimensions differ.
    pub fn compare(&self, other: &Raster) -> Result<CompareResult> {
        if self.width != other.width || self.height != other.height {
            return Err(PatternError::SizeMismatch {
                a_width: self.width,
                a_height: self.height,
                b_width: other.width,
                b_height: other.height,
            });
        }

        let mut different_pixels = 0u64;
        let mut max_channel_diff = 0u8;
        let mut first_diff = None;

        for (i, (pa, pb)) in self
            .data
            .chunks_exact(BPP)
            .zip(other.data.chunks_exact(BPP))
            .enumerate()
        {
            let diff = pa
                .iter()
                .zip(pb)
                .map(|(&a, &b)| a.abs_diff(b))
                .max()
                .unwrap_or(0);
            if diff == 0 {
                continue;
            }
            different_pixels += 1;
            max_channel_diff = max_channel_diff.max(diff);
            if first_diff.is_none() {
                let w = self.width as usize;
                first_diff = Some(DiffInfo {
                    x: (i % w) as u32,
                    y: (i / w) as u32,
                    pixel_a: [pa[0], pa[1], pa[2], pa[3]],
                    pixel_b: [pb[0], pb[1], pb[2], pb[3]],
                });
            }
        }

        Ok(CompareResult {
            identical: different_pixels == 0,
            total_pixels: self.width as u64 * self.height as u64,
            different_pixels,
            max_channel_diff,
            first_diff,
        })
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

// ============================================================================
// Comparison result
// ============================================================================

/// Information about a single pixel difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    pub x: u32,
    pub y: u32,
    pub pixel_a: [u8; 4],
    pub pixel_b: [u8; 4],
}

/// Result of comparing two rasters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareResult {
    /// True if every pixel in both rasters is identical.
    pub identical: bool,
    pub total_pixels: u64,
    /// Pixels that differ by at least 1 in any channel.
    pub different_pixels: u64,
    /// Largest absolute difference of any single channel.
    pub max_channel_diff: u8,
    /// First differing pixel, scanning left-to-right, top-to-bottom.
    pub first_diff: Option<DiffInfo>,
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identical {
            write!(f, "IDENTICAL: {} pixels match perfectly", self.total_pixels)
        } else {
            write!(
                f,
                "DIFFERENT: {}/{} pixels differ ({:.2}%), max_diff={}",
                self.different_pixels,
                self.total_pixels,
                self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
                self.max_channel_diff,
            )?;
            if let Some(ref d) = self.first_diff {
                write!(
                    f,
                    "\n  First diff at ({}, {}): A={:?} B={:?}",
                    d.x, d.y, d.pixel_a, d.pixel_b
                )?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_new() {
        let r = Raster::new(10, 4);
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 4);
        assert_eq!(r.stride(), 40);
        assert_eq!(r.as_bytes().len(), 160);
        assert!(r.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_raster_empty() {
        assert!(Raster::new(0, 10).is_empty());
        assert!(Raster::new(10, 0).is_empty());
        assert!(!Raster::new(1, 1).is_empty());
    }

    #[test]
    fn test_raster_set_get_pixel() {
        let mut r = Raster::new(3, 2);
        r.set_pixel(2, 1, Rgb8::new(9, 8, 7));
        assert_eq!(r.pixel(2, 1), Rgb8::new(9, 8, 7));
        assert_eq!(r.rgba(2, 1), [9, 8, 7, 255]);
        assert_eq!(r.rgba(0, 0), [0, 0, 0, 0]);
        // Row-major layout: (2, 1) lives at byte (1 * 3 + 2) * 4
        assert_eq!(&r.as_bytes()[20..24], &[9, 8, 7, 255]);
    }

    #[test]
    #[should_panic]
    fn test_raster_pixel_out_of_bounds() {
        Raster::new(2, 2).pixel(2, 0);
    }

    #[test]
    fn test_raster_rows() {
        let mut r = Raster::new(2, 3);
        r.row_slice_mut(1)[0] = 42;
        assert_eq!(r.row_slice(1)[0], 42);
        assert_eq!(r.row_slice(0)[0], 0);
        assert_eq!(r.row_slice(2).len(), 8);
    }

    #[test]
    fn test_raster_clear() {
        let mut r = Raster::new(5, 4);
        r.clear(Rgb8::new(1, 2, 3));
        for px in r.as_bytes().chunks_exact(BPP) {
            assert_eq!(px, &[1, 2, 3, 255]);
        }
    }

    #[test]
    fn test_raster_from_rgba() {
        assert!(Raster::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Raster::from_rgba(2, 2, vec![0; 15]),
            Err(PatternError::BufferLength {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_raster_compare_identical() {
        let mut a = Raster::new(4, 4);
        a.clear(Rgb8::RED);
        let b = a.clone();
        let res = a.compare(&b).unwrap();
        assert!(res.identical);
        assert_eq!(res.total_pixels, 16);
        assert_eq!(res.different_pixels, 0);
        assert!(res.first_diff.is_none());
        assert!(res.to_string().starts_with("IDENTICAL"));
    }

    #[test]
    fn test_raster_compare_different() {
        let a = Raster::new(4, 4);
        let mut b = a.clone();
        b.set_pixel(1, 2, Rgb8::new(10, 0, 0));
        b.set_pixel(3, 3, Rgb8::new(0, 0, 1));
        let res = a.compare(&b).unwrap();
        assert!(!res.identical);
        assert_eq!(res.different_pixels, 2);
        assert_eq!(res.max_channel_diff, 255); // alpha 0 -> 255
        let d = res.first_diff.unwrap();
        assert_eq!((d.x, d.y), (1, 2));
        assert_eq!(d.pixel_b, [10, 0, 0, 255]);
    }

    #[test]
    fn test_raster_compare_size_mismatch() {
        let r = Raster::new(2, 2).compare(&Raster::new(2, 3));
        assert!(matches!(r, Err(PatternError::SizeMismatch { .. })));
    }
}
