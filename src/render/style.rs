// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Defines the RGBA color stored in every pixel and the 24-bit escape writers
//! used by the glyph encoders.

use crossterm::{
    style::{Color as CColor, SetBackgroundColor, SetForegroundColor},
    Command,
};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Add};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const BROWN: Color = Color::rgb(139, 69, 19);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 0xRRGGBBAA
    pub const fn from_u32(v: u32) -> Self {
        Self::rgba((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Cheap perceived brightness `(2R + 5G + B) / 8`, used for the pixel-on test.
    pub fn fast_luma(self) -> u32 {
        (2 * self.r as u32 + 5 * self.g as u32 + self.b as u32) >> 3
    }

    /// BT.601 luminance in 0..=255.
    pub fn luminance(self) -> u32 {
        (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000
    }

    /// Plain channel sum, the ordering key for "brightest pixel".
    pub fn brightness(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Source-over composite of `self` onto `bg`. The result is opaque.
    pub fn blend(self, bg: Color) -> Color {
        let a = self.a as u32;
        let ia = 255 - a;
        let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * ia) / 255) as u8;
        Color::rgb(mix(self.r, bg.r), mix(self.g, bg.g), mix(self.b, bg.b))
    }

    /// Linear interpolation, `t` is clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    /// `ESC[38;2;R;G;Bm`
    pub fn write_fg<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        SetForegroundColor(self.into()).write_ansi(out)
    }

    /// `ESC[48;2;R;G;Bm`
    pub fn write_bg<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        SetBackgroundColor(self.into()).write_ansi(out)
    }
}

/// Channel-wise saturating add.
impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::rgba(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
            self.a.saturating_add(rhs.a),
        )
    }
}

impl From<Color> for CColor {
    fn from(c: Color) -> Self {
        CColor::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}
