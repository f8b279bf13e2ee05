//! Colours, the tile palette and outline shading.

use thiserror::Error;

use crate::types::Tile;

/// Default shading amount for block outlines, in percent.
pub const DEFAULT_DARKEN_PERCENT: u8 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected a 6-digit hex colour, got {0:?}")]
    Malformed(String),
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional, digits are case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::Malformed(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Reduce every channel by `amount` percent of its own value (rounded down).
    ///
    /// `amount` is clamped to 100.
    pub fn darker(self, amount: u8) -> Self {
        let amount = amount.min(100) as u16;
        let shade = |c: u8| {
            let c = c as u16;
            (c - c * amount / 100) as u8
        };
        Self::new(shade(self.r), shade(self.g), shade(self.b))
    }

    /// Linear blend towards `over` by `alpha` (0 = keep self, 255 = `over`).
    pub fn blend(self, over: Rgb, alpha: u8) -> Self {
        let a = alpha as u16;
        let mix = |under: u8, over: u8| {
            ((under as u16 * (255 - a) + over as u16 * a + 127) / 255) as u8
        };
        Self::new(mix(self.r, over.r), mix(self.g, over.g), mix(self.b, over.b))
    }
}

/// RGB with an 8-bit alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            a,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self { rgb, a: u8::MAX }
    }
}

/// Darken a hex colour string, returning a hex colour string.
///
/// # Examples
///
/// ```
/// use tetris_console_term::darker;
///
/// assert_eq!(darker("#4169e1", 40).unwrap(), "#273f87");
/// assert!(darker("royalblue", 40).is_err());
/// ```
pub fn darker(hex: &str, amount: u8) -> Result<String, ColorError> {
    Ok(Rgb::from_hex(hex)?.darker(amount).to_hex())
}

/// Fill colours for tile ids `1..=7`.
pub const TILE_COLORS: [Rgb; 7] = [
    Rgb::new(0x41, 0x69, 0xe1),
    Rgb::new(0x00, 0x00, 0xcd),
    Rgb::new(0xff, 0x45, 0x00),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0x32, 0xcd, 0x32),
    Rgb::new(0x94, 0x00, 0xd3),
    Rgb::new(0xff, 0x00, 0x00),
];

/// Fill colour of a tile. Empty (`0`) and unknown ids have none.
pub fn tile_color(tile: Tile) -> Option<Rgb> {
    match tile {
        0 => None,
        t => TILE_COLORS.get(t as usize - 1).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#4169e1").unwrap(), Rgb::new(0x41, 0x69, 0xe1));
        assert_eq!(Rgb::from_hex("FFFF00").unwrap(), Rgb::new(255, 255, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        for s in ["", "#", "#fff", "#12345", "#1234567", "#gg0000", "#12 456"] {
            assert!(Rgb::from_hex(s).is_err(), "{s:?}");
        }
    }

    #[test]
    fn darker_reduces_each_channel_by_floor_percent() {
        let base = Rgb::from_hex("#4169e1").unwrap();
        let d = base.darker(40);
        let expect = |c: u16| (c - c * 40 / 100) as u8;
        assert_eq!(d.r, expect(0x41));
        assert_eq!(d.g, expect(0x69));
        assert_eq!(d.b, expect(0xe1));
        assert_eq!(d, Rgb::new(0x27, 0x3f, 0x87));
        assert!(d.r < base.r && d.g < base.g && d.b < base.b);
    }

    #[test]
    fn darker_output_is_zero_padded_and_reparseable() {
        let out = darker("#0a0b0c", 40).unwrap();
        assert_eq!(out, "#060708");
        assert_eq!(out.len(), 7);
        assert!(Rgb::from_hex(&out).is_ok());
    }

    #[test]
    fn darker_extremes() {
        assert_eq!(darker("#ffffff", 0).unwrap(), "#ffffff");
        assert_eq!(darker("#ffffff", 100).unwrap(), "#000000");
        assert_eq!(darker("#ffffff", 250).unwrap(), "#000000");
        assert_eq!(darker("#000000", 40).unwrap(), "#000000");
    }

    #[test]
    fn tile_palette_lookup() {
        assert_eq!(tile_color(0), None);
        assert_eq!(tile_color(1), Some(Rgb::new(0x41, 0x69, 0xe1)));
        assert_eq!(tile_color(7), Some(Rgb::new(0xff, 0, 0)));
        assert_eq!(tile_color(8), None);
    }

    #[test]
    fn blend_endpoints() {
        let a = Rgb::new(200, 100, 50);
        assert_eq!(a.blend(Rgb::BLACK, 0), a);
        assert_eq!(a.blend(Rgb::BLACK, 255), Rgb::BLACK);
        assert_eq!(Rgb::new(200, 200, 200).blend(Rgb::BLACK, 191), Rgb::new(50, 50, 50));
    }
}
