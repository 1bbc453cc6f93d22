// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Interrupt handling: the only way a bustle run ends.
//
// SIGINT and SIGTERM set a process-wide `AtomicBool`. The frame loop
// checks it once per tick and returns, which lets the terminal guard
// drop and hand the screen back. Writing to an atomic is one of the few
// operations permitted inside a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGINT/SIGTERM handler. Checked each frame.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install handlers for SIGINT and SIGTERM.
///
/// Safe to call more than once; later calls just reinstall the same handler.
#[cfg(unix)]
pub fn install_interrupt_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = interrupt_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn interrupt_handler(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
pub fn install_interrupt_handler() {
    // No-op: Ctrl-C terminates the process directly.
}

/// Whether an interrupt has been received.
#[inline]
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}
