// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Canvas is the terminal-backed render target.
//!
//! It owns a pixel buffer plus a render mode, which fixes how many pixels
//! one character cell covers and therefore the character grid size.
//! `render` packs the pixels into text, `display` writes that text to the
//! terminal. The first `display` also takes over the terminal: alternate
//! screen, hidden cursor, plus signal, exit and panic hooks that restore it.
//!
//! The canvas never resizes itself. Poll [`Canvas::was_resized`] once per frame
//! and build a new canvas when it returns true.

use crate::{
    error::Result,
    event,
    init::get_raster_config,
    render::{
        adapter::{cross::CrosstermAdapter, Adapter},
        glyph::{self, RenderMode},
        sprite::RenderQueue,
        style::Color,
        target::RenderTarget,
        view::View,
    },
    util::{FloatRect, Vector2f, Vector2i, Vector2u},
};
use log::{debug, info};
use std::cell::OnceCell;

pub struct Canvas {
    width: u32,
    height: u32,
    mode: RenderMode,
    grid_width: u32,
    grid_height: u32,
    pixels: Vec<Color>,
    // None means the default view is current
    view: Option<View>,
    default_view: OnceCell<View>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, mode: RenderMode) -> Self {
        let (grid_width, grid_height) = mode.term_size(width, height);
        debug!(
            "canvas {}x{} px, mode {}, grid {}x{}",
            width, height, mode, grid_width, grid_height
        );
        Self {
            width,
            height,
            mode,
            grid_width,
            grid_height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
            view: None,
            default_view: OnceCell::new(),
        }
    }

    /// Canvas exactly covering `cols x rows` character cells.
    pub fn from_terminal_size(cols: u32, rows: u32, mode: RenderMode) -> Self {
        let (w, h) = mode.pixel_size(cols, rows);
        Self::new(w, h, mode)
    }

    /// Canvas covering the current terminal, keeping the configured number of
    /// rows free at the bottom so the last line never scrolls.
    pub fn create_fullscreen(mode: RenderMode) -> Result<Self> {
        Self::create_fullscreen_reserving(mode, get_raster_config().reserve_rows)
    }

    /// Also installs the signal handlers, so resize tracking starts before
    /// the first `display`.
    pub fn create_fullscreen_reserving(mode: RenderMode, reserve_rows: u16) -> Result<Self> {
        event::install_handlers()?;
        let (cols, rows) = event::query_term_size()?;
        let rows = rows.saturating_sub(reserve_rows).max(1);
        info!("fullscreen canvas on {}x{} terminal", cols, rows);
        Ok(Self::from_terminal_size(cols as u32, rows as u32, mode))
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Changes how pixels pack into cells, the pixel buffer is kept.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
        (self.grid_width, self.grid_height) = mode.term_size(self.width, self.height);
    }

    /// Character grid (columns, rows) this canvas renders to.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.grid_width, self.grid_height)
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    /// Terminal columns as last seen by the resize handler.
    pub fn term_width() -> u16 {
        event::term_width()
    }

    /// Terminal rows as last seen by the resize handler.
    pub fn term_height() -> u16 {
        event::term_height()
    }

    /// True exactly once after each terminal resize.
    pub fn was_resized() -> bool {
        let resized = event::was_resized();
        if resized {
            let (cols, rows) = event::term_size();
            info!("terminal resized to {}x{}", cols, rows);
        }
        resized
    }

    // ----- views -----

    /// Shows the whole canvas: centred at (w/2, h/2), size (w, h).
    pub fn default_view(&self) -> &View {
        self.default_view.get_or_init(|| {
            View::from_rect(FloatRect::new(
                0.0,
                0.0,
                self.width as f32,
                self.height as f32,
            ))
        })
    }

    pub fn view(&self) -> &View {
        match &self.view {
            Some(v) => v,
            None => self.default_view(),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = Some(view);
    }

    pub fn reset_view(&mut self) {
        self.view = None;
    }

    fn viewport_pixels(&self, view: &View) -> FloatRect {
        let vp = view.viewport();
        let (w, h) = (self.width as f32, self.height as f32);
        FloatRect::new(vp.left * w, vp.top * h, vp.width * w, vp.height * h)
    }

    /// Screen pixel to world coordinates through the current view.
    pub fn map_pixel_to_coords(&self, pixel: Vector2i) -> Vector2f {
        self.map_pixel_to_coords_with(pixel, self.view())
    }

    pub fn map_pixel_to_coords_with(&self, pixel: Vector2i, view: &View) -> Vector2f {
        let vp = self.viewport_pixels(view);
        let ndc = Vector2f::new(
            -1.0 + 2.0 * (pixel.x as f32 - vp.left) / vp.width,
            1.0 - 2.0 * (pixel.y as f32 - vp.top) / vp.height,
        );
        view.inverse_transform().transform_point(ndc)
    }

    /// World coordinates to the nearest screen pixel through the current view.
    pub fn map_coords_to_pixel(&self, point: Vector2f) -> Vector2i {
        self.map_coords_to_pixel_with(point, self.view())
    }

    pub fn map_coords_to_pixel_with(&self, point: Vector2f, view: &View) -> Vector2i {
        let vp = self.viewport_pixels(view);
        let ndc = view.transform().transform_point(point);
        Vector2i::new(
            ((ndc.x + 1.0) / 2.0 * vp.width + vp.left).round() as i32,
            ((1.0 - ndc.y) / 2.0 * vp.height + vp.top).round() as i32,
        )
    }

    // ----- output -----

    /// Encode the pixels as terminal text, one line per character row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.grid_width as usize * self.grid_height as usize * 8);
        // writing into a String cannot fail
        let _ = glyph::encode(self.mode, self, &mut out);
        out
    }

    /// Write one frame through `adapter`, without touching terminal setup.
    pub fn present_to<A: Adapter>(&self, adapter: &mut A) -> Result<()> {
        adapter.present(&self.render())
    }

    /// Show the canvas on stdout, taking over the terminal on first use.
    pub fn display(&self) -> Result<()> {
        let mut adapter = CrosstermAdapter::stdout();
        Self::ensure_display(&mut adapter)?;
        self.present_to(&mut adapter)
    }

    /// Optionally clear, replay the queue in z-order and empty it.
    pub fn compose(&mut self, queue: &mut RenderQueue<'_>, clear_color: Option<Color>) {
        if let Some(c) = clear_color {
            self.clear(c);
        }
        queue.render(self);
        queue.clear();
    }

    /// `compose` then `display`.
    pub fn display_queue(
        &mut self,
        queue: &mut RenderQueue<'_>,
        clear_color: Option<Color>,
    ) -> Result<()> {
        self.compose(queue, clear_color);
        self.display()
    }

    fn ensure_display<A: Adapter>(adapter: &mut A) -> Result<()> {
        if event::is_display_active() {
            return Ok(());
        }
        event::install_handlers()?;
        adapter.init()?;
        event::mark_display_active();
        info!("display initialized");
        Ok(())
    }

    /// Take over the terminal now. Dropping the guard restores it.
    pub fn init_display() -> Result<TerminalGuard> {
        Self::ensure_display(&mut CrosstermAdapter::stdout())?;
        Ok(TerminalGuard { _private: () })
    }

    /// Run cleanup callbacks and give the terminal back.
    pub fn cleanup_display() {
        event::restore_terminal();
    }
}

impl RenderTarget for Canvas {
    fn size(&self) -> Vector2u {
        Vector2u::new(self.width, self.height)
    }

    fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

/// Restores the terminal when dropped.
#[must_use = "the terminal is restored as soon as the guard is dropped"]
pub struct TerminalGuard {
    _private: (),
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        event::restore_terminal();
    }
}
