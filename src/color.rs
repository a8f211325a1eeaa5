//! SolidColor: the paintable form of a swatch's color string.
//!
//! Swatches are configured with CSS-style strings and the palette reports
//! them back verbatim. Only the Floem view needs actual channel values, so
//! parsing lives here and never touches the selection path.

/// RGBA color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl SolidColor {
    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }
    /// Alpha component (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Default for SolidColor {
    fn default() -> Self {
        Self {
            r: 0.5,
            g: 0.5,
            b: 0.5,
            a: 1.0,
        }
    }
}

impl SolidColor {
    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Parse a swatch color: `#` followed by 3, 4, 6, or 8 hex digits.
    ///
    /// The `#` is optional. Surrounding whitespace is ignored.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&stripped[i..i + 1], 16).map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&stripped[i..i + 2], 16);
        let (r, g, b, a) = match stripped.len() {
            3 => (short(0).ok()?, short(1).ok()?, short(2).ok()?, 255),
            4 => (short(0).ok()?, short(1).ok()?, short(2).ok()?, short(3).ok()?),
            6 => (long(0).ok()?, long(2).ok()?, long(4).ok()?, 255),
            8 => (long(0).ok()?, long(2).ok()?, long(4).ok()?, long(6).ok()?),
            _ => return None,
        };
        Some(Self {
            a: a as f64 / 255.0,
            ..Self::from_rgb(r, g, b)
        })
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when fully opaque, 8 chars (RRGGBBAA) otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        if (self.a - 1.0).abs() < 0.001 {
            format!("{:02X}{:02X}{:02X}", r, g, b)
        } else {
            let a = (self.a * 255.0).round() as u8;
            format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}
