//! Color type and `#rrggbb` exchange format.
//!
//! Colors are held as 8-bit RGB triples for arithmetic and cross the
//! boundary (config files, CLI flags, the browser color picker) as six hex
//! digits prefixed with `#`. Parsing accepts either case; formatting always
//! emits lowercase, so `parse(format(c)) == c` for every triple.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::basics::round_channel;
use crate::error::{PatternError, Result};

// ============================================================================
// Rgb8
// ============================================================================

/// Opaque RGB color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (hex digits in either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = |reason| PatternError::InvalidColor {
            input: s.to_string(),
            reason,
        };
        let digits = s.strip_prefix('#').ok_or_else(|| invalid("missing leading '#'"))?;
        if digits.len() != 6 {
            return Err(invalid("expected exactly 6 hex digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex digit"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid("non-hex digit"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Interpolate each channel from `self` toward `c` by `k` (0.0 to 1.0),
    /// rounding to nearest.
    pub fn gradient(&self, c: &Rgb8, k: f64) -> Rgb8 {
        let lerp = |a: u8, b: u8| round_channel(a as f64 + k * (b as f64 - a as f64));
        Rgb8 {
            r: lerp(self.r, c.r),
            g: lerp(self.g, c.g),
            b: lerp(self.b, c.b),
        }
    }

    /// RGBA bytes with a fully opaque alpha channel.
    #[inline]
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a list of `#rrggbb` strings, failing on the first malformed entry.
pub fn parse_hex_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<Rgb8>> {
    items.iter().map(|s| Rgb8::from_hex(s.as_ref())).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_from_hex() {
        assert_eq!(Rgb8::from_hex("#ff0000").unwrap(), Rgb8::RED);
        assert_eq!(Rgb8::from_hex("#00FF00").unwrap(), Rgb8::GREEN);
        assert_eq!(Rgb8::from_hex("#0a0B0c").unwrap(), Rgb8::new(10, 11, 12));
    }

    #[test]
    fn test_rgb8_to_hex() {
        assert_eq!(Rgb8::new(255, 0, 171).to_hex(), "#ff00ab");
        assert_eq!(Rgb8::BLACK.to_hex(), "#000000");
        assert_eq!(Rgb8::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_rgb8_hex_round_trip_every_channel_value() {
        for v in 0..=255u8 {
            let c = Rgb8::new(v, 255 - v, v.wrapping_mul(37));
            assert_eq!(Rgb8::from_hex(&c.to_hex()).unwrap(), c);
        }
    }

    #[test]
    fn test_rgb8_from_hex_rejects_malformed() {
        for bad in ["ff0000", "#ff000", "#ff00000", "#gg0000", "#+f0000", "", "#", "#ff00é"] {
            match Rgb8::from_hex(bad) {
                Err(PatternError::InvalidColor { input, .. }) => assert_eq!(input, bad),
                other => panic!("expected InvalidColor for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_rgb8_from_str() {
        let c: Rgb8 = "#123456".parse().unwrap();
        assert_eq!(c, Rgb8::new(0x12, 0x34, 0x56));
        assert!("123456".parse::<Rgb8>().is_err());
    }

    #[test]
    fn test_rgb8_gradient() {
        let a = Rgb8::BLACK;
        let b = Rgb8::WHITE;
        assert_eq!(a.gradient(&b, 0.0), a);
        assert_eq!(a.gradient(&b, 1.0), b);
        // 127.5 rounds half up
        assert_eq!(a.gradient(&b, 0.5), Rgb8::new(128, 128, 128));
        // Descending channel
        assert_eq!(b.gradient(&a, 0.5), Rgb8::new(128, 128, 128));
    }

    #[test]
    fn test_rgb8_to_rgba() {
        assert_eq!(Rgb8::new(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
    }

    #[test]
    fn test_rgb8_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb8::new(0xab, 0xcd, 0xef)).unwrap();
        assert_eq!(json, "\"#abcdef\"");
        let back: Rgb8 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb8::new(0xab, 0xcd, 0xef));
        assert!(serde_json::from_str::<Rgb8>("\"#abc\"").is_err());
    }

    #[test]
    fn test_parse_hex_list() {
        let stops = parse_hex_list(&["#ff0000", "#00ff00"]).unwrap();
        assert_eq!(stops, vec![Rgb8::RED, Rgb8::GREEN]);
        assert!(parse_hex_list(&["#ff0000", "nope"]).is_err());
    }
}
