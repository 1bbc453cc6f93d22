// SPDX-License-Identifier: MIT
//
// Screen: the row-separated glyph sequence a frame is painted into.
//
// Layout:
//
//   A flat `Vec<Glyph>` in row-major order. Each row holds `cols` content
//   glyphs and is followed by one `ROW_SEPARATOR`, except the last row.
//   The total length is therefore `(cols + 1) * rows - 1`, and the
//   separator for row `k` (1-based, `k < rows`) lives at `k * (cols + 1) - 1`.
//
//   Keeping the separators inside the buffer means emitting a frame is a
//   straight front-to-back encode with no per-row bookkeeping. Separators
//   are written once at construction; `clear()` and `set()` never touch
//   them.
//
// Memory:
//
//   200×50 terminal = 10,049 glyphs × 4 bytes ≈ 40 KB. Allocated once per
//   run; every frame reuses it.

use std::fmt;

use crate::cell::Glyph;
use crate::output::OutputBuffer;
use crate::terminal::Size;

/// A full-screen frame of glyphs with embedded row separators.
///
/// # Examples
///
/// ```
/// use bustle_term::cell::Glyph;
/// use bustle_term::screen::Screen;
/// use bustle_term::terminal::Size;
///
/// let mut screen = Screen::new(Size { cols: 3, rows: 2 });
/// assert_eq!(screen.len(), 7);
///
/// screen.set(1, 1, Glyph::new('x'));
/// assert_eq!(screen.to_string(), "   \n x ");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    size: Size,
    glyphs: Vec<Glyph>,
}

impl Screen {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a blank screen: spaces everywhere, separators between rows.
    ///
    /// A zero-width or zero-height size yields an empty buffer.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let stride = usize::from(size.cols) + 1;
        let rows = usize::from(size.rows);
        if size.cols == 0 || rows == 0 {
            return Self { size, glyphs: Vec::new() };
        }

        let mut glyphs = vec![Glyph::SPACE; stride * rows - 1];
        for k in 1..rows {
            glyphs[k * stride - 1] = Glyph::ROW_SEPARATOR;
        }

        Self { size, glyphs }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Screen dimensions in content cells.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Total number of glyphs, separators included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the screen holds no glyphs at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The raw glyph sequence, separators included.
    #[inline]
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Flat index of content cell `(x, y)`, or `None` if outside the grid.
    #[inline]
    const fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.size.cols && y < self.size.rows {
            Some(y as usize * (self.size.cols as usize + 1) + x as usize)
        } else {
            None
        }
    }

    /// The glyph at content cell `(x, y)`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Write a glyph at content cell `(x, y)`.
    ///
    /// Returns `false` (and writes nothing) if the cell is outside the grid.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) -> bool {
        debug_assert!(glyph.width() == 1, "content glyph must be one column: {glyph:?}");
        match self.index(x, y) {
            Some(i) => {
                self.glyphs[i] = glyph;
                true
            }
            None => false,
        }
    }

    /// Reset every content cell to a space. Separators are left alone.
    pub fn clear(&mut self) {
        let stride = usize::from(self.size.cols) + 1;
        for (i, g) in self.glyphs.iter_mut().enumerate() {
            if (i + 1) % stride != 0 {
                *g = Glyph::SPACE;
            }
        }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Append the UTF-8 encoding of the whole screen to `out`.
    pub fn encode_into(&self, out: &mut OutputBuffer) {
        for glyph in &self.glyphs {
            out.write_glyph(*glyph);
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.glyphs {
            write!(f, "{glyph}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Screen({}x{})", self.size.cols, self.size.rows)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const fn size(cols: u16, rows: u16) -> Size {
        Size { cols, rows }
    }

    // ── Sizing ──────────────────────────────────────────────────────────────

    #[test]
    fn length_is_stride_times_rows_minus_one() {
        for (cols, rows) in [(1, 1), (10, 4), (80, 24), (3, 7)] {
            let screen = Screen::new(size(cols, rows));
            let expected = (usize::from(cols) + 1) * usize::from(rows) - 1;
            assert_eq!(screen.len(), expected, "{cols}x{rows}");
        }
    }

    #[test]
    fn separators_at_row_boundaries_only() {
        let cols = 10;
        let rows = 4;
        let screen = Screen::new(size(cols, rows));
        let stride = usize::from(cols) + 1;

        for (i, g) in screen.glyphs().iter().enumerate() {
            let is_boundary = (1..usize::from(rows)).any(|k| i == k * stride - 1);
            if is_boundary {
                assert_eq!(*g, Glyph::ROW_SEPARATOR, "index {i}");
            } else {
                assert_eq!(*g, Glyph::SPACE, "index {i}");
            }
        }
    }

    #[test]
    fn blank_ten_by_four() {
        let screen = Screen::new(size(10, 4));
        assert_eq!(screen.len(), 43);
        let row = " ".repeat(10);
        assert_eq!(screen.to_string(), [row.as_str(); 4].join("\n"));
    }

    #[test]
    fn single_row_has_no_separator() {
        let screen = Screen::new(size(5, 1));
        assert_eq!(screen.len(), 5);
        assert!(!screen.glyphs().contains(&Glyph::ROW_SEPARATOR));
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(Screen::new(size(0, 5)).is_empty());
        assert!(Screen::new(size(5, 0)).is_empty());
        assert!(Screen::new(size(0, 0)).is_empty());
    }

    #[test]
    fn zero_width_tall_screen_is_usable() {
        let mut screen = Screen::new(size(0, 24));
        assert_eq!(screen.len(), 0);
        assert!(!screen.set(0, 0, Glyph::new('x')));
        screen.clear();
        assert_eq!(screen.get(0, 0), None);
        assert_eq!(screen.to_string(), "");
    }

    // ── Access ──────────────────────────────────────────────────────────────

    #[test]
    fn set_and_get() {
        let mut screen = Screen::new(size(4, 3));
        assert!(screen.set(3, 2, Glyph::new('z')));
        assert_eq!(screen.get(3, 2), Some(Glyph::new('z')));
        assert_eq!(screen.glyphs()[2 * 5 + 3], Glyph::new('z'));
    }

    #[test]
    fn set_out_of_bounds_is_ignored() {
        let mut screen = Screen::new(size(4, 3));
        let before = screen.clone();
        assert!(!screen.set(4, 0, Glyph::new('z')));
        assert!(!screen.set(0, 3, Glyph::new('z')));
        assert_eq!(screen, before);
    }

    #[test]
    fn get_out_of_bounds() {
        let screen = Screen::new(size(4, 3));
        assert_eq!(screen.get(4, 0), None);
        assert_eq!(screen.get(0, 3), None);
    }

    #[test]
    fn last_column_does_not_hit_separator() {
        let mut screen = Screen::new(size(3, 2));
        screen.set(2, 0, Glyph::new('a'));
        assert_eq!(screen.to_string(), "  a\n   ");
    }

    #[test]
    fn clear_keeps_separators() {
        let mut screen = Screen::new(size(3, 3));
        for y in 0..3 {
            for x in 0..3 {
                screen.set(x, y, Glyph::new('#'));
            }
        }
        screen.clear();
        assert_eq!(screen, Screen::new(size(3, 3)));
    }

    // ── Output ──────────────────────────────────────────────────────────────

    #[test]
    fn encode_into_writes_utf8() {
        let mut screen = Screen::new(size(2, 2));
        screen.set(0, 0, Glyph::new('┌'));
        screen.set(1, 1, Glyph::new('┘'));

        let mut out = OutputBuffer::new();
        screen.encode_into(&mut out);
        assert_eq!(out.as_bytes(), "┌ \n ┘".as_bytes());
    }

    #[test]
    fn debug_shows_dimensions() {
        let screen = Screen::new(size(80, 24));
        assert_eq!(format!("{screen:?}"), "Screen(80x24)");
    }
}
