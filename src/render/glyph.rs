// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Packs pixels into terminal character cells.
//!
//! ```text
//!   Braille 2x4   Block 1x2   Quarter 2x2   Ascii 1x1
//!   0 3           top         TL TR         lum -> " .:-=+*#%@"
//!   1 4           bottom      BL BR
//!   2 5
//!   6 7
//! ```
//!
//! A pixel counts as "on" when it is mostly opaque and brighter than a low
//! luminance threshold, so nearly every non-dark color becomes foreground.
//! Colors are emitted as 24-bit escapes and only when they differ from the
//! previous cell on the same row. Each row ends with a reset and a newline.

use crate::render::{style::Color, target::RenderTarget};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const ON_MIN_ALPHA: u8 = 32;
pub const ON_LUMA_THRESHOLD: u32 = 25;

pub const BRAILLE_BASE: u32 = 0x2800;

/// braille dot bit, indexed by [dy][dx]
pub const BRAILLE_DOT_BIT: [[u8; 2]; 4] = [[0, 3], [1, 4], [2, 5], [6, 7]];

pub const BLOCK_GLYPH: char = '▀';

/// indexed by the `Quadrant` mask
pub const QUARTER_GLYPHS: [char; 16] = [
    ' ', '▖', '▗', '▄', '▘', '▌', '▚', '▙', '▝', '▞', '▐', '▟', '▀', '▛', '▜', '█',
];

/// lightest to darkest
pub const ASCII_RAMP: &[u8; 10] = b" .:-=+*#%@";

pub const RESET: &str = "\x1b[0m";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Quadrant: u8 {
        const BL = 0b0001;
        const BR = 0b0010;
        const TL = 0b0100;
        const TR = 0b1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Braille,
    Block,
    Quarter,
    Ascii,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Braille,
        RenderMode::Block,
        RenderMode::Quarter,
        RenderMode::Ascii,
    ];

    /// Pixels covered by one character cell, (w, h).
    pub const fn cell_size(self) -> (u32, u32) {
        match self {
            RenderMode::Braille => (2, 4),
            RenderMode::Block => (1, 2),
            RenderMode::Quarter => (2, 2),
            RenderMode::Ascii => (1, 1),
        }
    }

    /// Character grid needed for a pixel size, rounding partial cells up.
    pub const fn term_size(self, width: u32, height: u32) -> (u32, u32) {
        let (cw, ch) = self.cell_size();
        (width.div_ceil(cw), height.div_ceil(ch))
    }

    /// Pixel size that exactly fills a character grid.
    pub const fn pixel_size(self, cols: u32, rows: u32) -> (u32, u32) {
        let (cw, ch) = self.cell_size();
        (cols * cw, rows * ch)
    }

    pub const fn name(self) -> &'static str {
        match self {
            RenderMode::Braille => "braille",
            RenderMode::Block => "block",
            RenderMode::Quarter => "quarter",
            RenderMode::Ascii => "ascii",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown render mode '{}', expected braille|block|quarter|ascii", s))
    }
}

pub fn is_pixel_on(c: Color) -> bool {
    c.a >= ON_MIN_ALPHA && c.fast_luma() > ON_LUMA_THRESHOLD
}

/// One encoded character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub ch: char,
    pub fg: Color,
    /// `None` leaves the terminal background alone.
    pub bg: Option<Color>,
}

/// Brightest "on" pixel is the foreground, brightest "off" pixel the background.
/// No averaging.
pub fn braille_cell(target: &dyn RenderTarget, tx: u32, ty: u32) -> GlyphCell {
    let (px, py) = (tx as i32 * 2, ty as i32 * 4);
    let mut pattern = 0u32;
    let (mut fg, mut fg_bright) = (Color::BLACK, 0);
    let (mut bg, mut bg_bright) = (Color::BLACK, 0);

    for (dy, row) in BRAILLE_DOT_BIT.iter().enumerate() {
        for (dx, bit) in row.iter().enumerate() {
            let c = target.get_pixel(px + dx as i32, py + dy as i32);
            let bright = c.brightness();
            if is_pixel_on(c) {
                pattern |= 1 << bit;
                if bright > fg_bright {
                    fg_bright = bright;
                    fg = c;
                }
            } else if bright > bg_bright {
                bg_bright = bright;
                bg = c;
            }
        }
    }
    if fg_bright == 0 {
        fg = Color::WHITE;
    }
    GlyphCell {
        ch: char::from_u32(BRAILLE_BASE + pattern).unwrap_or(' '),
        fg,
        bg: Some(bg),
    }
}

pub fn block_cell(target: &dyn RenderTarget, tx: u32, ty: u32) -> GlyphCell {
    let (x, y) = (tx as i32, ty as i32 * 2);
    GlyphCell {
        ch: BLOCK_GLYPH,
        fg: target.get_pixel(x, y),
        bg: Some(target.get_pixel(x, y + 1)),
    }
}

/// Mean color of the lit quadrants, white when none is lit.
pub fn quarter_cell(target: &dyn RenderTarget, tx: u32, ty: u32) -> GlyphCell {
    let (px, py) = (tx as i32 * 2, ty as i32 * 2);
    let mut mask = Quadrant::empty();
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for (flag, dx, dy) in [
        (Quadrant::TL, 0, 0),
        (Quadrant::TR, 1, 0),
        (Quadrant::BL, 0, 1),
        (Quadrant::BR, 1, 1),
    ] {
        let c = target.get_pixel(px + dx, py + dy);
        if is_pixel_on(c) {
            mask |= flag;
            r += c.r as u32;
            g += c.g as u32;
            b += c.b as u32;
            n += 1;
        }
    }
    let fg = if n == 0 {
        Color::WHITE
    } else {
        Color::rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
    };
    GlyphCell {
        ch: QUARTER_GLYPHS[mask.bits() as usize],
        fg,
        bg: None,
    }
}

/// BT.601 luminance picks a character from the density ramp.
pub fn ascii_cell(target: &dyn RenderTarget, tx: u32, ty: u32) -> GlyphCell {
    let c = target.get_pixel(tx as i32, ty as i32);
    let idx = (c.luminance() * (ASCII_RAMP.len() as u32 - 1) / 255) as usize;
    GlyphCell {
        ch: ASCII_RAMP[idx.min(ASCII_RAMP.len() - 1)] as char,
        fg: c,
        bg: None,
    }
}

pub fn encode_cell(mode: RenderMode, target: &dyn RenderTarget, tx: u32, ty: u32) -> GlyphCell {
    match mode {
        RenderMode::Braille => braille_cell(target, tx, ty),
        RenderMode::Block => block_cell(target, tx, ty),
        RenderMode::Quarter => quarter_cell(target, tx, ty),
        RenderMode::Ascii => ascii_cell(target, tx, ty),
    }
}

/// Encode the whole target as `rows` lines of text with color escapes.
pub fn encode<W: fmt::Write>(
    mode: RenderMode,
    target: &dyn RenderTarget,
    out: &mut W,
) -> fmt::Result {
    let size = target.size();
    let (cols, rows) = mode.term_size(size.x, size.y);
    for ty in 0..rows {
        let mut last: Option<(Color, Option<Color>)> = None;
        for tx in 0..cols {
            let cell = encode_cell(mode, target, tx, ty);
            if last != Some((cell.fg, cell.bg)) {
                cell.fg.write_fg(out)?;
                if let Some(bg) = cell.bg {
                    bg.write_bg(out)?;
                }
                last = Some((cell.fg, cell.bg));
            }
            out.write_char(cell.ch)?;
        }
        out.write_str(RESET)?;
        out.write_char('\n')?;
    }
    Ok(())
}
