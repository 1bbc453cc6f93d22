//! Animation configuration: every tunable constant in one place.
//!
//! The defaults give the stock look: twenty panels, each growing
//! to 40×12 in steps of 8 columns and 4 rows, holding for 40 frames while
//! the text scrolls two source rows per frame, at 30 frames per second.
//!
//! | Field              | Default    | Constraint              |
//! |--------------------|------------|-------------------------|
//! | `panels`           | 20         | > 0                     |
//! | `fps`              | 30         | > 0                     |
//! | `max_width`        | 40         | even                    |
//! | `max_height`       | 12         | even                    |
//! | `width_step`       | 8          | even, > 0               |
//! | `height_step`      | 4          | even, > 0               |
//! | `scroll_step`      | 2          | -                       |
//! | `hold_frames`      | 40         | > 0                     |
//! | `spawn_delay_secs` | 1..10      | non-empty               |
//! | `glyph_style`      | `Quadrant` | -                       |

use std::ops::Range;

use crate::glyph::GlyphStyle;

/// A configuration that would break a panel invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("panel count must be at least 1")]
    NoPanels,

    #[error("frame rate must be at least 1")]
    ZeroFps,

    #[error("{name} must be even, got {value}")]
    Odd { name: &'static str, value: u16 },

    #[error("{name} must be a positive even number, got {value}")]
    BadStep { name: &'static str, value: u16 },

    #[error("hold time must be at least one frame")]
    NoHold,

    #[error("spawn delay range {start}..{end} seconds is empty")]
    EmptySpawnRange { start: u32, end: u32 },
}

/// Tunables for the panel animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimConfig {
    /// Size of the panel pool.
    pub panels: usize,
    /// Frames per second; spawn delays are measured in frames.
    pub fps: u32,
    /// Fully grown width.
    pub max_width: u16,
    /// Fully grown height.
    pub max_height: u16,
    /// Width change per frame while growing or shrinking.
    pub width_step: u16,
    /// Height change per frame while growing or shrinking.
    pub height_step: u16,
    /// Source rows scrolled per frame while holding.
    pub scroll_step: u32,
    /// Frames spent fully grown.
    pub hold_frames: u32,
    /// Delay before a dormant panel spawns, in seconds (half-open).
    pub spawn_delay_secs: Range<u32>,
    /// Table used for interior text.
    pub glyph_style: GlyphStyle,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            panels: 20,
            fps: 30,
            max_width: 40,
            max_height: 12,
            width_step: 8,
            height_step: 4,
            scroll_step: 2,
            hold_frames: 40,
            spawn_delay_secs: 1..10,
            glyph_style: GlyphStyle::Quadrant,
        }
    }
}

impl AnimConfig {
    /// Check every constraint in the table above.
    ///
    /// # Errors
    ///
    /// The first violated constraint, as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panels == 0 {
            return Err(ConfigError::NoPanels);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        for (name, value) in [("max width", self.max_width), ("max height", self.max_height)] {
            if value % 2 != 0 {
                return Err(ConfigError::Odd { name, value });
            }
        }
        for (name, value) in [("width step", self.width_step), ("height step", self.height_step)] {
            if value == 0 || value % 2 != 0 {
                return Err(ConfigError::BadStep { name, value });
            }
        }
        if self.hold_frames == 0 {
            return Err(ConfigError::NoHold);
        }
        if self.spawn_delay_secs.is_empty() {
            return Err(ConfigError::EmptySpawnRange {
                start: self.spawn_delay_secs.start,
                end: self.spawn_delay_secs.end,
            });
        }
        Ok(())
    }

    /// Spawn delay range in frames: `[start × fps, end × fps)`.
    #[must_use]
    pub fn spawn_delay_frames(&self) -> Range<u32> {
        let start = self.spawn_delay_secs.start.saturating_mul(self.fps).max(1);
        let end = self.spawn_delay_secs.end.saturating_mul(self.fps).max(start.saturating_add(1));
        start..end
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
