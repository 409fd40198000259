// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Curve sampling used by the drawing primitives.
//! Each function returns the sampled points; connecting them is up to the caller.

pub mod bezier;
pub mod spline;

pub use bezier::{bezier_point, cubic_bezier, quadratic_bezier, sample_bezier};
pub use spline::catmull_rom;
