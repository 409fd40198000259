// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! layer.rs implements a RenderQueue that holds borrowed Drawables for one frame.
//! render draws them in the order indicated by their z-index,
//! bigger z-index is rendered later (upper level).
//! Items with the same z-index keep their insertion order.

use crate::render::{sprite::Drawable, target::RenderTarget};

/// Named z-levels for the common scene layout. Gaps leave room for custom values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum Layer {
    Background = 0,
    BackgroundDecor = 10,
    GroundEffects = 20,
    Entities = 50,
    Player = 60,
    ForegroundDecor = 70,
    Projectiles = 80,
    Effects = 90,
    UI = 100,
    Overlay = 110,
    Debug = 200,
}

impl Layer {
    pub const fn z(self) -> i32 {
        self as i32
    }
}

impl From<Layer> for i32 {
    fn from(layer: Layer) -> i32 {
        layer.z()
    }
}

/// Drawables queued for the current frame.
///
/// The queue only borrows its items, so it cannot outlive them.
#[derive(Default)]
pub struct RenderQueue<'a> {
    items: Vec<(&'a dyn Drawable, i32)>,
}

impl<'a> RenderQueue<'a> {
    pub fn new() -> Self {
        Self { items: vec![] }
    }

    pub fn add(&mut self, drawable: &'a dyn Drawable, z_index: i32) {
        self.items.push((drawable, z_index));
    }

    pub fn add_layer(&mut self, drawable: &'a dyn Drawable, layer: Layer) {
        self.add(drawable, layer.z());
    }

    /// Stable sort by z-index then draw everything in order.
    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        self.items.sort_by_key(|item| item.1);
        for (drawable, _) in &self.items {
            drawable.draw(target);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
