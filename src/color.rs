//! RGBA color values shared across the compositors.

use tiny_skia::Color;

/// Straight-alpha RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba {
  pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
  pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
  pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);

  /// Creates an opaque color.
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  pub fn to_color(self) -> Color {
    Color::from_rgba8(self.r, self.g, self.b, self.a)
  }

  /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
  pub fn parse_hex(raw: &str) -> std::result::Result<Self, String> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(format!("invalid color {raw:?}: non-hex digit"));
    }
    let channel = |from: usize| u8::from_str_radix(&hex[from..from + 2], 16).map_err(|e| e.to_string());
    match hex.len() {
      3 => {
        let nibble = |from: usize| {
          u8::from_str_radix(&hex[from..from + 1], 16)
            .map(|v| v * 17)
            .map_err(|e| e.to_string())
        };
        Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
      }
      6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
      8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
      _ => Err(format!("invalid color {raw:?}: expected 3, 6 or 8 hex digits")),
    }
  }
}
