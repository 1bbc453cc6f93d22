// SPDX-License-Identifier: MIT
//
// Glyph: the atomic unit of a bustle frame.
//
// Every content position on screen holds exactly one Glyph: a single
// Unicode scalar value that occupies one terminal column. The screen
// buffer also stores its row separators as glyphs so a frame can be
// encoded front to back without any layout logic.
//
// There is no color and no attribute state. A glyph is just a `char`,
// encoded as 1–4 UTF-8 bytes on its way out.

use std::fmt;

use unicode_width::UnicodeWidthChar;

/// A single output character.
///
/// ```
/// use bustle_term::cell::Glyph;
///
/// let g = Glyph::new('┌');
/// assert_eq!(g.ch(), '┌');
/// assert_eq!(g.utf8_len(), 3);
/// assert_eq!(g.width(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph(char);

impl Glyph {
    /// An empty cell.
    pub const SPACE: Self = Self(' ');

    /// Separates one row of content cells from the next.
    pub const ROW_SEPARATOR: Self = Self('\n');

    /// Wrap a character.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self(ch)
    }

    /// The wrapped character.
    #[inline]
    #[must_use]
    pub const fn ch(self) -> char {
        self.0
    }

    /// Number of bytes in the UTF-8 encoding.
    #[inline]
    #[must_use]
    pub const fn utf8_len(self) -> usize {
        self.0.len_utf8()
    }

    /// Display width in terminal columns. Control characters report 0.
    #[inline]
    #[must_use]
    pub fn width(self) -> usize {
        self.0.width().unwrap_or(0)
    }

    /// Append the UTF-8 encoding to `out`.
    #[inline]
    pub fn encode_into(self, out: &mut Vec<u8>) {
        let mut enc = [0u8; 4];
        out.extend_from_slice(self.0.encode_utf8(&mut enc).as_bytes());
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::SPACE
    }
}

impl From<char> for Glyph {
    fn from(ch: char) -> Self {
        Self(ch)
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glyph({:?})", self.0)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_space() {
        assert_eq!(Glyph::default(), Glyph::SPACE);
        assert_eq!(Glyph::SPACE.ch(), ' ');
    }

    #[test]
    fn ascii_encodes_to_one_byte() {
        let mut out = Vec::new();
        Glyph::new('+').encode_into(&mut out);
        assert_eq!(out, b"+");
    }

    #[test]
    fn box_drawing_encodes_to_three_bytes() {
        let mut out = Vec::new();
        Glyph::new('┌').encode_into(&mut out);
        assert_eq!(out, [0xe2, 0x94, 0x8c]);
    }

    #[test]
    fn encode_appends() {
        let mut out = b"ab".to_vec();
        Glyph::new('─').encode_into(&mut out);
        assert_eq!(out, "ab─".as_bytes());
    }

    #[test]
    fn row_separator_is_one_byte() {
        assert_eq!(Glyph::ROW_SEPARATOR.utf8_len(), 1);
        assert_eq!(Glyph::ROW_SEPARATOR.ch(), '\n');
    }

    #[test]
    fn block_elements_are_single_width() {
        for ch in ['▘', '▝', '▖', '▗', '▀', '▄', '▌', '▐', '█', '▚', '▞'] {
            assert_eq!(Glyph::new(ch).width(), 1, "{ch:?}");
        }
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(Glyph::new('x').to_string(), "x");
        assert_eq!(format!("{:?}", Glyph::new('x')), "Glyph('x')");
    }

    #[test]
    fn from_char() {
        let g: Glyph = 'q'.into();
        assert_eq!(g.ch(), 'q');
    }
}
