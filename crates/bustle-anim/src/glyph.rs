//! Glyph tables: what a cell looks like once we know why it is covered.
//!
//! Two pure, total mappings from a 4-bit code to an output [`Glyph`]:
//!
//! - **Borders.** A [`BorderEdges`] set says which edges of a panel's
//!   bounds a cell lies on. Corners and edges map to single-line
//!   box-drawing characters:
//!
//!   ```text
//!   LEFT|TOP     TOP     RIGHT|TOP          ┌ ─ ┐
//!   LEFT                 RIGHT         →    │   │
//!   LEFT|BOTTOM  BOTTOM  RIGHT|BOTTOM       └ ─ ┘
//!   ```
//!
//!   When opposing edges coincide (a zero-width or zero-height panel) there
//!   is no box-drawing character for the shape, and the cell shows `+`.
//!
//! - **Text.** Interior cells show the source text at half resolution. A
//!   2×2 block of source characters becomes a [`Quadrants`] ink pattern,
//!   and the pattern picks a glyph from the active [`GlyphStyle`] table.

use std::fmt;
use std::str::FromStr;

use bustle_term::cell::Glyph;

use crate::text::TextStore;

// ---------------------------------------------------------------------------
// Border edges
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Which edges of a panel's bounds a cell lies on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BorderEdges: u8 {
        /// Cell column equals the left bound.
        const LEFT   = 1 << 0;
        /// Cell column equals the right bound.
        const RIGHT  = 1 << 1;
        /// Cell row equals the top bound.
        const TOP    = 1 << 2;
        /// Cell row equals the bottom bound.
        const BOTTOM = 1 << 3;
    }
}

/// Border glyphs indexed by edge bits.
#[rustfmt::skip]
const BORDER_TABLE: [char; 16] = [
    ' ', '│', '│', '+',   // -, L, R, LR
    '─', '┌', '┐', '+',   // T, LT, RT, LRT
    '─', '└', '┘', '+',   // B, LB, RB, LRB
    '+', '+', '+', '+',   // TB, LTB, RTB, LRTB
];

/// The glyph for a border cell.
///
/// Defined for all 16 edge combinations. The empty set maps to a space.
#[must_use]
pub fn border_glyph(edges: BorderEdges) -> Glyph {
    Glyph::new(BORDER_TABLE[usize::from(edges.bits() & 0xf)])
}

// ---------------------------------------------------------------------------
// Ink quadrants
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Which cells of a 2×2 source block hold ink (a non-space byte).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Quadrants: u8 {
        /// `(u, v + 1)`
        const BOTTOM_LEFT  = 1 << 0;
        /// `(u + 1, v + 1)`
        const BOTTOM_RIGHT = 1 << 1;
        /// `(u, v)`
        const TOP_LEFT     = 1 << 2;
        /// `(u + 1, v)`
        const TOP_RIGHT    = 1 << 3;
    }
}

impl Quadrants {
    /// Sample the 2×2 block whose top-left source cell is `(u, v)`.
    #[must_use]
    pub fn sample(text: &TextStore, u: i32, v: i32) -> Self {
        let mut q = Self::empty();
        q.set(Self::TOP_LEFT, text.is_ink(u, v));
        q.set(Self::TOP_RIGHT, text.is_ink(u + 1, v));
        q.set(Self::BOTTOM_LEFT, text.is_ink(u, v + 1));
        q.set(Self::BOTTOM_RIGHT, text.is_ink(u + 1, v + 1));
        q
    }
}

// ---------------------------------------------------------------------------
// GlyphStyle
// ---------------------------------------------------------------------------

/// Which table renders ink patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphStyle {
    /// Unicode quadrant blocks: each glyph is the pattern itself.
    #[default]
    Quadrant,
    /// Plain ASCII punctuation picked to suggest the pattern's weight.
    Ascii,
}

/// Quadrant blocks indexed by [`Quadrants`] bits.
#[rustfmt::skip]
const QUADRANT_TABLE: [char; 16] = [
    ' ', '▖', '▗', '▄',   // -, BL, BR, BL+BR
    '▘', '▌', '▚', '▙',   // TL, TL+BL, TL+BR, TL+BL+BR
    '▝', '▞', '▐', '▟',   // TR, TR+BL, TR+BR, TR+BL+BR
    '▀', '▛', '▜', '█',   // TL+TR, ..+BL, ..+BR, all
];

/// ASCII intensity map indexed by [`Quadrants`] bits.
///
/// ```text
/// ^^rr>>
/// '';;ii
///   ,,__
/// ```
const ASCII_TABLE: [char; 16] = [
    ' ', ',', ',', '_', '\'', ';', ';', 'i', '\'', ';', ';', 'i', '^', 'r', 'r', '>',
];

impl GlyphStyle {
    /// All styles, in CLI listing order.
    pub const ALL: [Self; 2] = [Self::Quadrant, Self::Ascii];

    /// CLI name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quadrant => "quadrant",
            Self::Ascii => "ascii",
        }
    }

    /// The glyph for an ink pattern. Defined for all 16 patterns.
    #[must_use]
    pub fn pattern_glyph(self, pattern: Quadrants) -> Glyph {
        let table = match self {
            Self::Quadrant => &QUADRANT_TABLE,
            Self::Ascii => &ASCII_TABLE,
        };
        Glyph::new(table[usize::from(pattern.bits() & 0xf)])
    }

    /// Sample the text at `(u, v)` and map the resulting pattern.
    #[must_use]
    pub fn text_glyph(self, text: &TextStore, u: i32, v: i32) -> Glyph {
        self.pattern_glyph(Quadrants::sample(text, u, v))
    }
}

impl fmt::Display for GlyphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a glyph style name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown glyph style `{0}` (expected `quadrant` or `ascii`)")]
pub struct ParseGlyphStyleError(String);

impl FromStr for GlyphStyle {
    type Err = ParseGlyphStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseGlyphStyleError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all_edges() -> impl Iterator<Item = BorderEdges> {
        (0u8..16).map(BorderEdges::from_bits_truncate)
    }

    fn all_patterns() -> impl Iterator<Item = Quadrants> {
        (0u8..16).map(Quadrants::from_bits_truncate)
    }

    // -- Borders --

    #[test]
    fn border_corners_and_edges() {
        use BorderEdges as E;
        assert_eq!(border_glyph(E::LEFT | E::TOP).ch(), '┌');
        assert_eq!(border_glyph(E::RIGHT | E::TOP).ch(), '┐');
        assert_eq!(border_glyph(E::LEFT | E::BOTTOM).ch(), '└');
        assert_eq!(border_glyph(E::RIGHT | E::BOTTOM).ch(), '┘');
        assert_eq!(border_glyph(E::TOP).ch(), '─');
        assert_eq!(border_glyph(E::BOTTOM).ch(), '─');
        assert_eq!(border_glyph(E::LEFT).ch(), '│');
        assert_eq!(border_glyph(E::RIGHT).ch(), '│');
    }

    #[test]
    fn code_five_is_top_left_corner() {
        let edges = BorderEdges::from_bits_truncate(0b0101);
        assert_eq!(border_glyph(edges).ch(), '┌');
    }

    #[test]
    fn empty_edges_is_space() {
        assert_eq!(border_glyph(BorderEdges::empty()), Glyph::SPACE);
    }

    #[test]
    fn coinciding_edges_fall_back_to_plus() {
        for edges in all_edges() {
            let degenerate = edges.contains(BorderEdges::LEFT | BorderEdges::RIGHT)
                || edges.contains(BorderEdges::TOP | BorderEdges::BOTTOM);
            if degenerate {
                assert_eq!(border_glyph(edges).ch(), '+', "{edges:?}");
            } else {
                assert_ne!(border_glyph(edges).ch(), '+', "{edges:?}");
            }
        }
    }

    #[test]
    fn border_table_is_total_and_single_width() {
        for edges in all_edges() {
            let g = border_glyph(edges);
            assert_eq!(g.width(), 1, "{edges:?}");
        }
    }

    // -- Patterns --

    #[test]
    fn pattern_tables_are_total_and_single_width() {
        for style in GlyphStyle::ALL {
            for pattern in all_patterns() {
                assert_eq!(style.pattern_glyph(pattern).width(), 1, "{style} {pattern:?}");
            }
        }
    }

    #[test]
    fn quadrant_glyphs_are_distinct() {
        let mut seen: Vec<char> = all_patterns()
            .map(|p| GlyphStyle::Quadrant.pattern_glyph(p).ch())
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn quadrant_shapes() {
        use Quadrants as Q;
        let g = |q| GlyphStyle::Quadrant.pattern_glyph(q).ch();
        assert_eq!(g(Q::empty()), ' ');
        assert_eq!(g(Q::all()), '█');
        assert_eq!(g(Q::TOP_LEFT | Q::TOP_RIGHT), '▀');
        assert_eq!(g(Q::BOTTOM_LEFT | Q::BOTTOM_RIGHT), '▄');
        assert_eq!(g(Q::TOP_LEFT | Q::BOTTOM_LEFT), '▌');
        assert_eq!(g(Q::TOP_RIGHT | Q::BOTTOM_RIGHT), '▐');
        assert_eq!(g(Q::TOP_LEFT), '▘');
        assert_eq!(g(Q::TOP_LEFT | Q::BOTTOM_RIGHT), '▚');
        assert_eq!(g(Q::TOP_RIGHT | Q::BOTTOM_LEFT), '▞');
    }

    #[test]
    fn ascii_table_matches_intensity_map() {
        let rendered: String = all_patterns()
            .map(|p| GlyphStyle::Ascii.pattern_glyph(p).ch())
            .collect();
        assert_eq!(rendered, " ,,_';;i';;i^rr>");
    }

    // -- Sampling --

    #[test]
    fn sample_reads_two_by_two_block() {
        let text = TextStore::from_bytes(b"ab c\n d  \n").unwrap();
        assert_eq!(Quadrants::sample(&text, 0, 0), Quadrants::TOP_LEFT | Quadrants::TOP_RIGHT | Quadrants::BOTTOM_RIGHT);
        assert_eq!(Quadrants::sample(&text, 2, 0), Quadrants::TOP_RIGHT);
        assert_eq!(GlyphStyle::Quadrant.text_glyph(&text, 0, 0).ch(), '▜');
    }

    #[test]
    fn sample_past_line_end_is_blank() {
        let text = TextStore::from_bytes(b"xx\nxx\n").unwrap();
        assert_eq!(Quadrants::sample(&text, 2, 0), Quadrants::empty());
        assert_eq!(Quadrants::sample(&text, -2, 0), Quadrants::empty());
        assert_eq!(Quadrants::sample(&text, 1, 0), Quadrants::TOP_LEFT | Quadrants::BOTTOM_LEFT);
    }

    // -- Parsing --

    #[test]
    fn style_round_trips_through_name() {
        for style in GlyphStyle::ALL {
            assert_eq!(style.name().parse::<GlyphStyle>(), Ok(style));
        }
        assert_eq!("ASCII".parse::<GlyphStyle>(), Ok(GlyphStyle::Ascii));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = "braille".parse::<GlyphStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown glyph style `braille` (expected `quadrant` or `ascii`)");
    }

    #[test]
    fn default_style_is_quadrant() {
        assert_eq!(GlyphStyle::default(), GlyphStyle::Quadrant);
    }
}
