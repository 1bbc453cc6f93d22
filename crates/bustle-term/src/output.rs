// SPDX-License-Identifier: MIT
//
// Output buffering: one frame, one write.
//
// Every frame is the cursor-home sequence followed by the entire encoded
// screen. Both go into an in-memory byte buffer first, then leave the
// process in a single `write_all`. The terminal never sees half a frame,
// and `write_all` keeps retrying short writes until every byte is out.
//
// The buffer keeps its allocation between frames. After the first frame
// it is already the right size, so steady-state frames allocate nothing.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::Glyph;
use crate::screen::Screen;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates one frame for a single `write_all`.
///
/// Default capacity is 16 KB. A full 80×24 frame of three-byte glyphs
/// still fits without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append one glyph as UTF-8.
    #[inline]
    pub fn write_glyph(&mut self, glyph: Glyph) {
        glyph.encode_into(&mut self.buf);
    }

    /// Replace the contents with a complete frame: cursor home, then the
    /// whole screen.
    pub fn compose_frame(&mut self, screen: &Screen) {
        self.buf.clear();
        self.buf.extend_from_slice(ansi::CURSOR_HOME);
        screen.encode_into(self);
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
