//! Rendering Adapter: renderer-agnostic interface over a window of columns.
//!
//! # Invariants
//! - Renderers read a `ColumnWindow` and never mutate the world.
//! - Render output derives from the window and the view only.

mod renderer;

pub use renderer::{
    ACTOR_COLOR, ACTOR_GLYPH, AsciiRenderer, Frame, PixelRenderer, RenderView, Renderer,
};
