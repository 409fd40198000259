// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Adapter is the output boundary: it owns the terminal stream and knows the
//! escape sequences that set it up, show a frame and put it back.
//! The canvas only produces encoded frame text.

use crate::error::Result;

pub mod cross;

pub trait Adapter {
    /// Enter the alternate screen and hide the cursor.
    fn init(&mut self) -> Result<()>;

    /// Write one encoded frame at the top-left corner inside a
    /// synchronized-update bracket, then flush.
    fn present(&mut self, frame: &str) -> Result<()>;

    /// Undo `init`. Calling it without `init` is harmless.
    fn reset(&mut self) -> Result<()>;
}
