use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGB colour as stored by the host (`#RRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const DARK_TEXT: Color = Color::rgb(0x25, 0x24, 0x23);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| Error::Color(s.to_string()))?;
        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::rgb(
                r1 * 16 + r0,
                g1 * 16 + g0,
                b1 * 16 + b0,
            )),
            _ => Err(Error::Color(s.to_string())),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn lighten(&self, factor: f64) -> Self {
        let up = |c: u8| (c as f64 + (255.0 - c as f64) * factor).round() as u8;
        Self::rgb(up(self.r), up(self.g), up(self.b))
    }

    pub fn darken(&self, factor: f64) -> Self {
        let down = |c: u8| (c as f64 * (1.0 - factor)).round() as u8;
        Self::rgb(down(self.r), down(self.g), down(self.b))
    }

    /// Same hue and lightness at full saturation.
    pub fn saturate_full(&self) -> Self {
        let (h, s, l) = self.to_hsl();
        if s == 0.0 {
            return *self;
        }
        Self::from_hsl(h, 1.0, l)
    }

    /// Washed-out variant used for unselected tiles.
    pub fn greyed(&self) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s * 0.15, l + (0.8 - l) * 0.5)
    }

    /// Relative luminance in 0..=1 (sRGB, WCAG weighting).
    pub fn luminance(&self) -> f64 {
        let lin = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * lin(self.r) + 0.7152 * lin(self.g) + 0.0722 * lin(self.b)
    }

    /// Readable text colour on top of `self`.
    pub fn contrast_text(&self) -> Self {
        if self.luminance() > 0.4 { DARK_TEXT } else { WHITE }
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_byte(r), to_byte(g), to_byte(b))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff").unwrap(), WHITE);
        assert_eq!(Color::parse("41a4ff").unwrap(), Color::rgb(0x41, 0xA4, 0xFF));
        assert_eq!(Color::parse("#41A4FF").unwrap().to_hex(), "#41A4FF");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("blue").is_err());
    }

    #[test]
    fn lighten_and_darken_move_towards_white_and_black() {
        let c = Color::rgb(100, 100, 100);
        assert_eq!(c.lighten(1.0), WHITE);
        assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
        assert_eq!(c.lighten(0.0), c);
    }

    #[test]
    fn greys_have_no_saturation_to_restore() {
        let grey = Color::rgb(128, 128, 128);
        assert_eq!(grey.saturate_full(), grey);
        let greyed = Color::rgb(0x41, 0xA4, 0xFF).greyed();
        let spread = greyed.r.max(greyed.g).max(greyed.b) - greyed.r.min(greyed.g).min(greyed.b);
        assert!(spread < 40, "{greyed} still saturated");
    }

    #[test]
    fn saturate_full_keeps_hue() {
        let c = Color::rgb(0x80, 0x60, 0x60).saturate_full();
        assert!(c.r > c.g && c.g == c.b);
    }

    #[test]
    fn contrast_text_picks_readable_colour() {
        assert_eq!(WHITE.contrast_text(), DARK_TEXT);
        assert_eq!(Color::rgb(0x10, 0x20, 0x60).contrast_text(), WHITE);
    }
}
