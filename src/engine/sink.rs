use crate::camera::effects::EffectiveCamera;
use crate::camera::grid::GridTransform;
use crate::field::synth::TileShading;
use crate::field::tile::Tile;

/// Everything a renderer needs for one frame. Borrowed from the engine for the call only.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    /// Engine tick counter.
    pub tick: u64,
    /// Tiles with freshly synthesized heights.
    pub tiles: &'a [Tile],
    /// Per-tile colors, parallel to `tiles`.
    pub shading: &'a [TileShading],
    /// Camera with render-time effects applied.
    pub camera: EffectiveCamera,
    /// Grid group placement.
    pub grid: GridTransform,
    /// Point size.
    pub particle_size: f64,
}

/// Push-style consumer of rendered frames.
pub trait RenderSink {
    /// Draw `frame`. Must not fail the tick.
    fn render_frame(&mut self, frame: &RenderFrame<'_>);
}

/// Sink that drops every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render_frame(&mut self, _frame: &RenderFrame<'_>) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render_frame(&mut self, frame: &RenderFrame<'_>) {
        (**self).render_frame(frame);
    }
}
