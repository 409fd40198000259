// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! TermRaster is a pixel-addressable drawing surface for text terminals.
//!
//! Callers draw into a [`Canvas`](render::canvas::Canvas) with pixel primitives (lines,
//! circles, ellipses, Bezier curves, splines, polygons), or queue [`Drawable`]s with a
//! z-index in a [`RenderQueue`] which replays them in stable z-order. The canvas then
//! packs its pixels into terminal glyph cells and writes the frame to the terminal:
//!
//! ```text
//!   Braille  2x4 pixels per cell  ⠀⠁⠂ ... ⣿
//!   Block    1x2 pixels per cell  ▀ (fg = top, bg = bottom)
//!   Quarter  2x2 pixels per cell  ▖▗▘▝▌▐▀▄█
//!   ASCII    1x1 pixel per cell   " .:-=+*#%@"
//! ```
//!
//! A [`View`] acts as a 2D camera (center, size, rotation, viewport) and the canvas maps
//! between screen pixels and world coordinates through it.
//!
//! The terminal itself is a process-wide resource: the first `display` enters the
//! alternate screen and installs signal, exit and panic hooks that always restore it.
//! See the [`event`] module.
//!
//! # Example
//!
//! ```no_run
//! use term_raster::{Canvas, Color, RenderMode, RenderTarget};
//!
//! fn main() -> term_raster::Result<()> {
//!     let mut canvas = Canvas::new(160, 96, RenderMode::Braille);
//!     canvas.fill_circle(80, 48, 20, Color::CYAN);
//!     canvas.draw_line(0, 0, 159, 95, Color::RED);
//!     canvas.display()?;
//!     Ok(())
//! }
//! ```

/// default frame rate used by the demo and the config defaults
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// error type shared by all setup paths
pub mod error;

/// file logger bootstrap
pub mod log;

/// config file and the process-wide config cell
pub mod init;

/// vectors, rects and angle helpers
pub mod util;

/// bezier curves and catmull-rom splines
pub mod algorithm;

/// terminal size, resize flag, cleanup registry and signal handlers
pub mod event;

/// Render module.
/// style: RGBA color.
/// transform / view: affine matrices and the camera.
/// target: pixel buffer and drawing primitives.
/// sprite: drawable capability, transformable placement, z-ordered queue.
/// shape: ready-made drawables.
/// glyph: pixel to character packing.
/// canvas: terminal-backed render target.
/// adapter: terminal output (crossterm).
pub mod render;

pub use error::{RasterError, Result};
pub use init::{get_raster_config, init_raster_config, RasterConfig};
pub use render::{
    adapter::{cross::CrosstermAdapter, Adapter},
    canvas::{Canvas, TerminalGuard},
    glyph::RenderMode,
    shape::{CircleShape, ConvexShape, Line, RectangleShape, Shape},
    sprite::{Drawable, Layer, RenderQueue, Transformable},
    style::Color,
    target::{PixelBuffer, RenderTarget},
    transform::Transform,
    view::View,
};
pub use util::{FloatRect, IntRect, Rect, Vector2, Vector2f, Vector2i, Vector2u};
