// SPDX-License-Identifier: MIT
//
// Terminal control: size query, alternate screen, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for ioctl (TIOCGWINSZ)
// and a raw fd write in the panic hook. These are the standard
// POSIX interfaces and have no safe alternative. Each unsafe block is
// minimal.
#![allow(unsafe_code)]
//
// The size is queried once, at startup. A bustle run never re-queries it:
// the frame geometry is fixed for the life of the process.
//
// Unlike an editor, bustle reads no input, so there is no raw mode here.
// The terminal keeps its normal output processing, which is what turns
// each row separator into a carriage return plus line feed. The guard
// only hides the cursor and borrows the alternate screen, and gives both
// back on drop or panic.

use std::io::{self, Write};
use std::sync::Once;

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Used when the size cannot be queried (piped output, tests).
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Complete restore sequence for emergency use: reset SGR, show cursor,
/// exit alternate screen. Alternate screen exit is last so the restored
/// shell content appears with no animation artifacts.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

/// Panic hook guard: ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
///
/// Bypasses Rust's `io::stdout()` lock: a panic mid-frame may be holding it.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// Call [`enter`](Self::enter) to take over the screen (alternate screen,
/// hidden cursor). The terminal is restored when the handle is dropped,
/// even on panic.
///
/// # Example
///
/// ```no_run
/// use bustle_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... emit frames ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    /// Size sampled at construction. Never refreshed.
    size: Size,

    /// Whether the alternate screen is currently active.
    active: bool,
}

impl Terminal {
    /// Create a terminal handle and sample the size once.
    ///
    /// Does **not** touch the screen: call [`enter`](Self::enter) for that.
    /// Falls back to 80×24 if the size cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let size = get_size().unwrap_or_else(|| {
            tracing::debug!("terminal size unavailable, using {}x{}", Size::FALLBACK.cols, Size::FALLBACK.rows);
            Size::FALLBACK
        });

        Self { size, active: false }
    }

    /// The size sampled at startup.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether the alternate screen is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Switch to the alternate screen, hide the cursor, clear.
    ///
    /// Idempotent: calling `enter()` while already active is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::cursor_hide(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        lock.flush()?;

        self.active = true;
        Ok(())
    }

    /// Leave the alternate screen and show the cursor again.
    ///
    /// Idempotent: calling `leave()` while inactive is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::reset(&mut lock)?;
        ansi::cursor_show(&mut lock)?;
        ansi::exit_alt_screen(&mut lock)?;
        lock.flush()?;

        self.active = false;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
