use glam::Vec2;
use tileworld_common::{BlockId, catalog};
use tileworld_kernel::ColumnWindow;

/// Glyph drawn for the actor by `AsciiRenderer`.
pub const ACTOR_GLYPH: char = '@';
/// Colour drawn for the actor by `PixelRenderer`.
pub const ACTOR_COLOR: [u8; 3] = [255, 255, 0];

/// Which cells to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Column in the middle of the view.
    pub center: i32,
    /// Columns drawn either side of `center`.
    pub radius: u32,
    /// Lowest row drawn.
    pub bottom: i32,
    /// Highest row drawn.
    pub top: i32,
    /// Actor position (bottom-left corner), if one should be drawn.
    pub actor: Option<Vec2>,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            center: 0,
            radius: 20,
            bottom: 0,
            top: 24,
            actor: None,
        }
    }
}

impl RenderView {
    pub fn around(center: i32, radius: u32, bottom: i32, top: i32) -> Self {
        Self {
            center,
            radius,
            bottom,
            top,
            actor: None,
        }
    }

    pub fn with_actor(mut self, position: Vec2) -> Self {
        self.actor = Some(position);
        self
    }

    pub fn columns(&self) -> std::ops::RangeInclusive<i32> {
        let radius = i32::try_from(self.radius).unwrap_or(i32::MAX);
        self.center.saturating_sub(radius)..=self.center.saturating_add(radius)
    }

    /// Rows top to bottom, the order they are drawn in.
    pub fn rows(&self) -> impl Iterator<Item = i32> {
        (self.bottom..=self.top).rev()
    }

    pub fn width(&self) -> usize {
        self.radius as usize * 2 + 1
    }

    pub fn height(&self) -> usize {
        usize::try_from(self.top - self.bottom + 1).unwrap_or(0)
    }

    /// The cell the actor's centre falls in.
    pub fn actor_cell(&self) -> Option<(i32, i32)> {
        self.actor.map(|p| {
            let centre = p + Vec2::splat(0.5);
            (centre.x.floor() as i32, centre.y.floor() as i32)
        })
    }

    fn cell(&self, window: &ColumnWindow<'_>, column: i32, row: i32) -> Cell {
        if self.actor_cell() == Some((column, row)) {
            Cell::Actor
        } else {
            Cell::Block(window.block(column, row))
        }
    }
}

enum Cell {
    Actor,
    Block(BlockId),
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a materialized window and a view, then produces
/// output. It never mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame. Columns outside `window` draw as air.
    fn render(&self, window: &ColumnWindow<'_>, view: &RenderView) -> Self::Output;
}

/// Text renderer: one catalog glyph per cell, one line per row, top row first.
#[derive(Debug, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, window: &ColumnWindow<'_>, view: &RenderView) -> String {
        let mut out = String::with_capacity((view.width() + 1) * view.height());
        for row in view.rows() {
            for column in view.columns() {
                out.push(match view.cell(window, column, row) {
                    Cell::Actor => ACTOR_GLYPH,
                    Cell::Block(block) => catalog::glyph(block),
                });
            }
            out.push('\n');
        }
        out
    }
}

/// A rendered RGB frame, row-major with the top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 3]>,
}

impl Frame {
    /// Colour at `(x, y)`, with `y = 0` the top row.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// RGB renderer: one pixel per cell.
#[derive(Debug, Clone)]
pub struct PixelRenderer {
    /// Colour for air cells.
    pub sky: [u8; 3],
}

impl Default for PixelRenderer {
    fn default() -> Self {
        Self {
            sky: catalog::color(BlockId::AIR),
        }
    }
}

impl PixelRenderer {
    pub fn new(sky: [u8; 3]) -> Self {
        Self { sky }
    }
}

impl Renderer for PixelRenderer {
    type Output = Frame;

    fn render(&self, window: &ColumnWindow<'_>, view: &RenderView) -> Frame {
        let mut pixels = Vec::with_capacity(view.width() * view.height());
        for row in view.rows() {
            for column in view.columns() {
                pixels.push(match view.cell(window, column, row) {
                    Cell::Actor => ACTOR_COLOR,
                    Cell::Block(block) if block.is_air() => self.sky,
                    Cell::Block(block) => catalog::color(block),
                });
            }
        }
        tracing::trace!(
            width = view.width(),
            height = view.height(),
            "frame rendered"
        );
        Frame {
            width: view.width(),
            height: view.height(),
            pixels,
        }
    }
}
