//! # Colors and Contrast
//!
//! Hex color parsing and the WCAG 2.x contrast ratio. Colors are emitted in
//! one canonical spelling (`#rrggbb`, lowercase) so that `#FFF` and
//! `#ffffff` normalize, and fingerprint, identically.

use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, surrounding whitespace
    /// ignored). Returns `None` for anything else.
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize, width: usize| -> Option<u8> {
            let digits = hex.get(i..i + width)?;
            let v = u8::from_str_radix(digits, 16).ok()?;
            Some(if width == 1 { v * 17 } else { v })
        };
        match hex.len() {
            3 => Some(Rgb {
                r: channel(0, 1)?,
                g: channel(1, 1)?,
                b: channel(2, 1)?,
            }),
            6 => Some(Rgb {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
            }),
            _ => None,
        }
    }

    /// Canonical `#rrggbb` spelling.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(c: u8) -> f64 {
            let s = f64::from(c) / 255.0;
            if s <= 0.039_28 {
                s / 12.92
            } else {
                ((s + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Highest minimum contrast that black or white text meets on every
/// background. The worst background is the one where both ratios are equal,
/// at `sqrt(21)`, about 4.583.
pub const GUARANTEED_CONTRAST: f64 = 4.58;

/// Black or white, whichever contrasts more with `background`. The result
/// is always at least [`GUARANTEED_CONTRAST`] against it.
pub fn extreme_text_on(background: Rgb) -> Rgb {
    if contrast_ratio(Rgb::BLACK, background) >= contrast_ratio(Rgb::WHITE, background) {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`. Symmetric.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}
