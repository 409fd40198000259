// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! Pixels are drawn into a render target, then packed into terminal glyphs.
//!
//! ## Submodules
//! - `style`: RGBA color and 24-bit escape writers
//! - `transform`: 3x3 affine matrix
//! - `view`: 2D camera
//! - `target`: RenderTarget trait with all drawing primitives, PixelBuffer
//! - `sprite`: Drawable, Transformable and the z-ordered RenderQueue
//! - `shape`: circle, rectangle, convex polygon and line drawables
//! - `glyph`: render modes and cell encoders
//! - `canvas`: terminal-backed render target
//! - `adapter`: terminal output (crossterm)

pub mod adapter;
pub mod canvas;
pub mod glyph;
pub mod shape;
pub mod sprite;
pub mod style;
pub mod target;
pub mod transform;
pub mod view;

pub use adapter::{cross::CrosstermAdapter, Adapter};
pub use canvas::Canvas;
pub use glyph::RenderMode;
pub use sprite::{Drawable, Layer, RenderQueue, Transformable};
pub use style::Color;
pub use target::{PixelBuffer, RenderTarget};
pub use transform::Transform;
pub use view::View;
