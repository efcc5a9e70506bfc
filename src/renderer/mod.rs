//! Rendering
//!
//! The engine hands out snapshots; renderers draw them however they like.

pub mod text;

pub use crate::sim::Snapshot;
pub use text::TextRenderer;

/// Receives one snapshot per committed tick. Nothing is returned to the game.
pub trait Renderer {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Renderer that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _snapshot: &Snapshot) {}
}
