// SPDX-License-Identifier: MIT
//
// Frame loop: the fixed-rate heartbeat of a bustle run.
//
// One iteration, one frame:
//
//   1. tick:  the animation advances its state by exactly one step
//   2. paint: the screen is cleared and the animation paints it
//   3. emit:  cursor home + whole screen, composed in memory, one write
//   4. pace:  sleep 1/fps
//
// The sleep is a fixed interval. It does not subtract the time spent on
// steps 1–3, and there is no frame skipping or catch-up: a slow frame
// simply delays the next one.
//
// The loop has no stop condition of its own. It returns when the
// interrupt flag is raised (SIGINT/SIGTERM), or after `max_frames`
// frames when a limit is configured.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::output::OutputBuffer;
use crate::screen::Screen;
use crate::signal;
use crate::terminal::Size;

// ─── Animation Trait ─────────────────────────────────────────────────────────

/// Something the frame loop can drive.
///
/// The loop calls [`tick`](Animation::tick) then [`paint`](Animation::paint)
/// once per frame, always in that order.
pub trait Animation {
    /// Advance the animation by one frame.
    fn tick(&mut self);

    /// Paint the current state. The screen arrives cleared to spaces.
    fn paint(&mut self, screen: &mut Screen);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Frame loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Target frames per second. Must be nonzero. Default: 30.
    pub fps: u32,

    /// Stop after this many frames. `None` runs until interrupted.
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            max_frames: None,
        }
    }
}

impl LoopConfig {
    /// The fixed sleep between frames: one second divided by `fps`.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

// ─── FrameLoop ───────────────────────────────────────────────────────────────

/// Owns the screen and output buffer and drives an [`Animation`].
///
/// # Example
///
/// ```no_run
/// use bustle_term::frame_loop::{Animation, FrameLoop, LoopConfig};
/// use bustle_term::screen::Screen;
/// use bustle_term::terminal::Size;
///
/// struct Blank;
///
/// impl Animation for Blank {
///     fn tick(&mut self) {}
///     fn paint(&mut self, _screen: &mut Screen) {}
/// }
///
/// let mut frames = FrameLoop::new(Size { cols: 80, rows: 24 }, LoopConfig::default());
/// frames.run(&mut Blank, &mut std::io::stdout())?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FrameLoop {
    config: LoopConfig,
    screen: Screen,
    out: OutputBuffer,
    frames: u64,
}

impl FrameLoop {
    /// Create a loop for a screen of the given size.
    #[must_use]
    pub fn new(size: Size, config: LoopConfig) -> Self {
        Self {
            config,
            screen: Screen::new(size),
            out: OutputBuffer::new(),
            frames: 0,
        }
    }

    /// Frames emitted so far.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recently painted screen.
    #[inline]
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Produce and emit exactly one frame, without pacing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn step(&mut self, anim: &mut impl Animation, w: &mut impl Write) -> io::Result<()> {
        anim.tick();

        self.screen.clear();
        anim.paint(&mut self.screen);

        self.out.compose_frame(&self.screen);
        self.out.flush_to(w)?;

        self.frames += 1;
        Ok(())
    }

    /// Run until interrupted or until `max_frames` frames have been emitted.
    ///
    /// Returns the number of frames emitted by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails. The loop stops at the
    /// first failed frame.
    pub fn run(&mut self, anim: &mut impl Animation, w: &mut impl Write) -> io::Result<u64> {
        let interval = self.config.frame_interval();
        let start = self.frames;

        tracing::debug!(
            fps = self.config.fps,
            cols = self.screen.size().cols,
            rows = self.screen.size().rows,
            "frame loop starting"
        );

        while !signal::interrupted() {
            if let Some(max) = self.config.max_frames {
                if self.frames - start >= max {
                    break;
                }
            }

            self.step(anim, w)?;
            thread::sleep(interval);
        }

        let emitted = self.frames - start;
        tracing::debug!(frames = emitted, "frame loop finished");
        Ok(emitted)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
