// SPDX-License-Identifier: MIT
//
// bustle-term: Terminal plumbing for bustle.
//
// The animation core decides what every cell shows. This crate owns
// everything between that decision and the terminal: the glyph cell type,
// the row-separated screen buffer, ANSI sequences, single-write frame
// output, the once-at-startup size query, the alternate-screen guard, and
// the fixed-rate frame loop that drives an `Animation`.
//
// No TUI framework sits underneath. Each frame is a cursor-home sequence
// followed by the whole screen, written with one `write_all`. The terminal
// does the rest.

pub mod ansi;
pub mod cell;
pub mod frame_loop;
pub mod output;
pub mod screen;
pub mod signal;
pub mod terminal;
