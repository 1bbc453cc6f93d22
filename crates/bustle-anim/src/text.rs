//! The text store: the source file every panel scrolls through.
//!
//! Loaded once at startup and read-only afterwards. The raw bytes are kept
//! as-is (no UTF-8 decoding: a byte is ink if it is anything but an ASCII
//! space) together with a table of `(start, len)` line spans.
//!
//! # Line table
//!
//! Every `'\n'` terminates one line. Bytes after the final newline do not
//! form a line, so a file must contain at least one newline to be usable.
//! Spans are contiguous and non-overlapping: each line starts one byte past
//! the previous line's newline.
//!
//! # Capacity
//!
//! | Bound            | Value | On overflow                        |
//! |------------------|-------|------------------------------------|
//! | bytes            | 8192  | truncated, warning logged          |
//! | lines            | 1024  | rejected with `TooManyLines`       |

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Maximum number of bytes kept from the source file.
pub const TEXT_CAPACITY: usize = 8 * 1024;

/// Maximum number of lines in the line table.
pub const LINE_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a text store could not be built.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// More newline-terminated lines than the line table holds.
    #[error("source has more than {limit} lines")]
    TooManyLines { limit: usize },

    /// Not a single newline-terminated line to display.
    #[error("source has no complete lines")]
    NoLines,
}

// ---------------------------------------------------------------------------
// TextStore
// ---------------------------------------------------------------------------

/// One line's byte span, newline excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Offset of the first byte.
    pub start: usize,
    /// Number of bytes before the newline.
    pub len: usize,
}

/// Immutable source text with row/column addressed ink lookups.
#[derive(Debug, Clone)]
pub struct TextStore {
    bytes: Vec<u8>,
    lines: Vec<LineSpan>,
    dropped: u64,
}

impl TextStore {
    /// Build a store from in-memory bytes.
    ///
    /// Input past [`TEXT_CAPACITY`] is dropped; see [`dropped`](Self::dropped).
    ///
    /// # Errors
    ///
    /// [`TextError::TooManyLines`] past [`LINE_CAPACITY`] lines,
    /// [`TextError::NoLines`] if there is no newline at all.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextError> {
        let kept = bytes.len().min(TEXT_CAPACITY);
        let mut store = Self::index(bytes[..kept].to_vec())?;
        store.dropped = (bytes.len() - kept) as u64;
        Ok(store)
    }

    /// Load a store from a file.
    ///
    /// At most [`TEXT_CAPACITY`] bytes are read. A longer file is truncated
    /// and a warning names how much was left behind.
    ///
    /// # Errors
    ///
    /// [`TextError::Io`] if the file cannot be opened or read, plus
    /// everything [`from_bytes`](Self::from_bytes) rejects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let path = path.as_ref();
        let io_err = |source| TextError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let reported = file.metadata().map_err(io_err)?.len();
        let (bytes, dropped) = read_capped(file, reported).map_err(io_err)?;

        let mut store = Self::index(bytes)?;
        store.dropped = dropped;

        if store.dropped > 0 {
            tracing::warn!(
                path = %path.display(),
                kept = store.bytes.len(),
                dropped = store.dropped,
                "source file exceeds {TEXT_CAPACITY} bytes, showing only the beginning"
            );
        }
        tracing::info!(
            path = %path.display(),
            bytes = store.bytes.len(),
            lines = store.lines.len(),
            "source loaded"
        );

        Ok(store)
    }

    /// Build the line table over `bytes`.
    fn index(bytes: Vec<u8>) -> Result<Self, TextError> {
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                if lines.len() == LINE_CAPACITY {
                    return Err(TextError::TooManyLines {
                        limit: LINE_CAPACITY,
                    });
                }
                lines.push(LineSpan {
                    start,
                    len: i - start,
                });
                start = i + 1;
            }
        }

        if lines.is_empty() {
            return Err(TextError::NoLines);
        }

        Ok(Self {
            bytes,
            lines,
            dropped: 0,
        })
    }

    // ---------------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------------

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The kept bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line table.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    /// The bytes of line `row`, or `None` past the end.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&[u8]> {
        self.lines
            .get(row)
            .map(|span| &self.bytes[span.start..span.start + span.len])
    }

    /// Bytes of input dropped by truncation. Zero for inputs that fit.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Whether the input was truncated.
    #[inline]
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.dropped > 0
    }

    // ---------------------------------------------------------------------------
    // Sampling
    // ---------------------------------------------------------------------------

    /// Whether the character at column `u` of row `v` is ink (not a space).
    ///
    /// Rows wrap: any `v` behaves like `v mod line_count`, negative rows
    /// included. Columns do not: a negative `u`, or one at or past the
    /// line's length, is never ink.
    #[must_use]
    pub fn is_ink(&self, u: i32, v: i32) -> bool {
        // line_count <= LINE_CAPACITY, far inside i32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let count = self.lines.len() as i32;
        #[allow(clippy::cast_sign_loss)]
        let row = v.rem_euclid(count) as usize;

        let Ok(col) = usize::try_from(u) else {
            return false;
        };

        let span = self.lines[row];
        col < span.len && self.bytes[span.start + col] != b' '
    }
}

/// Read at most [`TEXT_CAPACITY`] bytes and count what was left behind.
///
/// One byte past the capacity is read to detect overflow, so pipes and
/// FIFOs (which report a length of zero) are caught too. The dropped count
/// comes from `reported` when that covers the overflow, otherwise from
/// draining the rest of the stream.
fn read_capped(reader: impl Read, reported: u64) -> io::Result<(Vec<u8>, u64)> {
    let capacity = TEXT_CAPACITY as u64;
    let mut limited = reader.take(capacity + 1);
    let mut bytes = Vec::with_capacity(TEXT_CAPACITY + 1);
    limited.read_to_end(&mut bytes)?;

    if bytes.len() <= TEXT_CAPACITY {
        return Ok((bytes, 0));
    }
    bytes.truncate(TEXT_CAPACITY);

    let dropped = if reported > capacity {
        reported - capacity
    } else {
        1 + io::copy(&mut limited.into_inner(), &mut io::sink())?
    };
    Ok((bytes, dropped))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
