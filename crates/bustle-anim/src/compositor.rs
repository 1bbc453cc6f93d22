//! Compositing: which panel owns each cell, and what that cell shows.
//!
//! Every frame starts by deriving [`Bounds`] for each visible panel. Then,
//! cell by cell in row-major order, the panels are scanned in pool order and
//! the first one whose bounds contain the cell wins. Lower indices are
//! therefore always on top; there is no z-reordering.
//!
//! The winning panel's bounds classify the cell:
//!
//! ```text
//!   x1        x2
//!   ┌──────────┐  y1     edge cells → border glyph (see `glyph`)
//!   │▗▄▖ ▝▀▘▄▄ │
//!   │▐▌▝▘  ▗▖▀ │         interior   → 2×2 text sample at
//!   └──────────┘  y2                  u = 2(x - x1 - 1)
//!                                     v = 2(y - y1 - 1) + scroll
//! ```
//!
//! Cells no panel covers stay blank. The cost is one linear scan of the
//! pool per cell, which is nothing at twenty panels.

use bustle_term::cell::Glyph;
use bustle_term::screen::Screen;

use crate::glyph::{self, BorderEdges, GlyphStyle};
use crate::panel::Panel;
use crate::text::TextStore;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive cell extents of a panel, borders included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x1: i32,
    pub x2: i32,
    pub y1: i32,
    pub y2: i32,
}

impl Bounds {
    /// Extents of a panel this frame, or `None` if it is not drawn.
    #[must_use]
    pub fn of(panel: &Panel) -> Option<Self> {
        if !panel.is_visible() {
            return None;
        }
        let half_w = i32::from(panel.width() / 2);
        let half_h = i32::from(panel.height() / 2);
        Some(Self {
            x1: panel.x() - half_w,
            x2: panel.x() + half_w,
            y1: panel.y() - half_h,
            y2: panel.y() + half_h,
        })
    }

    /// Whether `(x, y)` lies inside, edges included.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// The edges `(x, y)` lies on. Empty for interior cells.
    #[must_use]
    pub fn edges(&self, x: i32, y: i32) -> BorderEdges {
        let mut edges = BorderEdges::empty();
        edges.set(BorderEdges::LEFT, x == self.x1);
        edges.set(BorderEdges::RIGHT, x == self.x2);
        edges.set(BorderEdges::TOP, y == self.y1);
        edges.set(BorderEdges::BOTTOM, y == self.y2);
        edges
    }
}

// ---------------------------------------------------------------------------
// Layer
// ---------------------------------------------------------------------------

/// What the compositor needs from one panel: where it is and how far its
/// text has scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub bounds: Bounds,
    pub scroll: usize,
}

impl Layer {
    /// The layer for a panel, or `None` if it is not drawn.
    #[must_use]
    pub fn of(panel: &Panel) -> Option<Self> {
        Bounds::of(panel).map(|bounds| Self {
            bounds,
            scroll: panel.scroll(),
        })
    }

    /// The glyph this layer shows at `(x, y)`. Assumes the cell is inside.
    #[must_use]
    pub fn sample(&self, text: &TextStore, style: GlyphStyle, x: i32, y: i32) -> Glyph {
        let edges = self.bounds.edges(x, y);
        if !edges.is_empty() {
            return glyph::border_glyph(edges);
        }

        // scroll < line_count <= LINE_CAPACITY, far inside i32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let scroll = self.scroll as i32;
        let u = (x - self.bounds.x1 - 1) * 2;
        let v = (y - self.bounds.y1 - 1) * 2 + scroll;
        style.text_glyph(text, u, v)
    }
}

// ---------------------------------------------------------------------------
// Compositing
// ---------------------------------------------------------------------------

/// Paint `layers` onto `screen`, lowest index on top.
///
/// `None` entries are skipped but keep their slot in the priority order.
pub fn composite(layers: &[Option<Layer>], text: &TextStore, style: GlyphStyle, screen: &mut Screen) {
    let size = screen.size();
    for y in 0..size.rows {
        for x in 0..size.cols {
            let (xi, yi) = (i32::from(x), i32::from(y));
            let winner = layers
                .iter()
                .flatten()
                .find(|layer| layer.bounds.contains(xi, yi));

            let glyph = winner.map_or(Glyph::SPACE, |layer| layer.sample(text, style, xi, yi));
            screen.set(x, y, glyph);
        }
    }
}

/// Per-frame compositor. Reuses its layer list between frames.
#[derive(Debug, Default)]
pub struct Compositor {
    layers: Vec<Option<Layer>>,
}

impl Compositor {
    /// An empty compositor.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Derive this frame's layers from `panels` and paint them.
    pub fn rasterize(&mut self, panels: &[Panel], text: &TextStore, style: GlyphStyle, screen: &mut Screen) {
        self.layers.clear();
        self.layers.extend(panels.iter().map(Layer::of));
        composite(&self.layers, text, style, screen);
    }

    /// Layers derived by the last [`rasterize`](Self::rasterize).
    #[must_use]
    pub fn layers(&self) -> &[Option<Layer>] {
        &self.layers
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
