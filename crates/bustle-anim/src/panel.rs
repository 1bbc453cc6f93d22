//! The panel lifecycle: an eight-phase state machine advanced once per frame.
//!
//! | # | Phase         | Each frame                       | Leaves when             |
//! |---|---------------|----------------------------------|-------------------------|
//! | 0 | `Dormant`     | draw a spawn delay               | immediately → 1         |
//! | 1 | `Waiting`     | `delay -= 1`                     | `delay == 0` → 2        |
//! | 2 | `Init`        | random position and scroll, 0×0  | immediately → 3         |
//! | 3 | `GrowHeight`  | `h += height_step`               | `h ≥ max_height` → 4    |
//! | 4 | `GrowWidth`   | `w += width_step`                | `w ≥ max_width` → 5     |
//! | 5 | `Hold`        | `scroll += scroll_step`          | `hold_frames` later → 6 |
//! | 6 | `ShrinkWidth` | `w -= width_step`                | `w == 0` → 7            |
//! | 7 | `ShrinkHeight`| `h -= height_step`               | would go below 0 → 0    |
//!
//! "Immediately" means fall-through: a phase that completes at once runs
//! the next phase's logic in the same tick. A dormant panel is waiting by
//! the end of its tick, and a panel whose wait expires is placed in the same
//! tick it stops waiting.
//!
//! Growth clamps at the maximum and shrinking at zero, so `w` and `h` stay
//! even and inside `[0, max]` whenever the configured steps are even.
//! Dormant and waiting panels are invisible; every other phase is drawn,
//! including the 0×0 frame right after placement and the zero-height frame
//! at the end of a shrink.

use rand::Rng;

use bustle_term::terminal::Size;

use crate::config::AnimConfig;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a panel is in its lifecycle. Counters live in the variant that
/// uses them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not on screen; a spawn delay is drawn on the next tick.
    #[default]
    Dormant,
    /// Not on screen; counting down to spawn.
    Waiting {
        /// Frames left, including the current one.
        delay: u32,
    },
    /// Being placed. Never observed between ticks.
    Init,
    /// One column wide, growing taller.
    GrowHeight,
    /// Full height, growing wider.
    GrowWidth,
    /// Fully grown, scrolling.
    Hold {
        /// Frames spent holding so far.
        elapsed: u32,
    },
    /// Full height, growing narrower.
    ShrinkWidth,
    /// One column wide, growing shorter.
    ShrinkHeight,
}

impl Phase {
    /// Position in the lifecycle, `0..=7`.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Dormant => 0,
            Self::Waiting { .. } => 1,
            Self::Init => 2,
            Self::GrowHeight => 3,
            Self::GrowWidth => 4,
            Self::Hold { .. } => 5,
            Self::ShrinkWidth => 6,
            Self::ShrinkHeight => 7,
        }
    }

    /// Whether a panel in this phase is drawn.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Dormant | Self::Waiting { .. })
    }
}

// ---------------------------------------------------------------------------
// TickContext
// ---------------------------------------------------------------------------

/// Everything a panel needs from the outside world to advance one frame.
pub struct TickContext<'a, R: Rng> {
    /// Steps, maxima, and timing.
    pub config: &'a AnimConfig,
    /// Screen the panel is placed on.
    pub size: Size,
    /// Lines in the text store; scroll wraps at this.
    pub line_count: usize,
    /// Source of spawn delays and placements.
    pub rng: &'a mut R,
}

impl<R: Rng> TickContext<'_, R> {
    fn spawn_delay(&mut self) -> u32 {
        self.rng.gen_range(self.config.spawn_delay_frames())
    }

    /// A center coordinate leaving `max / 2` cells of margin at both ends
    /// of the axis, or the middle of the axis when it is too short.
    fn center(&mut self, extent: u16, max: u16) -> i32 {
        if extent > max {
            i32::from(self.rng.gen_range(0..extent - max) + max / 2)
        } else {
            i32::from(extent / 2)
        }
    }

    fn scroll_origin(&mut self) -> usize {
        if self.line_count == 0 {
            0
        } else {
            self.rng.gen_range(0..self.line_count)
        }
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Whether the state machine should keep going within the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    FallThrough,
    Done,
}

/// One animated panel.
///
/// `(x, y)` is the center; the panel spans `w / 2` cells either side
/// horizontally and `h / 2` vertically, borders included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    x: i32,
    y: i32,
    w: u16,
    h: u16,
    scroll: usize,
    phase: Phase,
}

impl Panel {
    /// A dormant panel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            w: 0,
            h: 0,
            scroll: 0,
            phase: Phase::Dormant,
        }
    }

    /// A fully placed panel, holding, with its hold counter at zero.
    ///
    /// Odd extents are rounded down to even.
    #[must_use]
    pub const fn holding(x: i32, y: i32, w: u16, h: u16, scroll: usize) -> Self {
        Self {
            x,
            y,
            w: w & !1,
            h: h & !1,
            scroll,
            phase: Phase::Hold { elapsed: 0 },
        }
    }

    /// Center column.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Center row.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Current width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.w
    }

    /// Current height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.h
    }

    /// Vertical scroll offset into the text, `< line_count`.
    #[inline]
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the panel is drawn this frame.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    /// Advance by one frame.
    pub fn tick<R: Rng>(&mut self, ctx: &mut TickContext<'_, R>) {
        while self.advance(ctx) == Flow::FallThrough {}
    }

    /// Run the current phase once.
    fn advance<R: Rng>(&mut self, ctx: &mut TickContext<'_, R>) -> Flow {
        let c = ctx.config;

        match self.phase {
            Phase::Dormant => {
                self.w = 0;
                self.h = 0;
                self.phase = Phase::Waiting {
                    delay: ctx.spawn_delay(),
                };
                Flow::FallThrough
            }

            Phase::Waiting { delay } => {
                let delay = delay.saturating_sub(1);
                if delay > 0 {
                    self.phase = Phase::Waiting { delay };
                    Flow::Done
                } else {
                    self.phase = Phase::Init;
                    Flow::FallThrough
                }
            }

            Phase::Init => {
                self.x = ctx.center(ctx.size.cols, c.max_width);
                self.y = ctx.center(ctx.size.rows, c.max_height);
                self.w = 0;
                self.h = 0;
                self.scroll = ctx.scroll_origin();
                self.phase = Phase::GrowHeight;
                Flow::Done
            }

            Phase::GrowHeight => {
                self.h = self.h.saturating_add(c.height_step);
                if self.h >= c.max_height {
                    self.h = c.max_height;
                    self.phase = Phase::GrowWidth;
                }
                Flow::Done
            }

            Phase::GrowWidth => {
                self.w = self.w.saturating_add(c.width_step);
                if self.w >= c.max_width {
                    self.w = c.max_width;
                    self.phase = Phase::Hold { elapsed: 0 };
                }
                Flow::Done
            }

            Phase::Hold { elapsed } => {
                let step = c.scroll_step as usize;
                self.scroll = match ctx.line_count {
                    0 => 0,
                    n => (self.scroll + step % n) % n,
                };

                let elapsed = elapsed + 1;
                self.phase = if elapsed >= c.hold_frames {
                    Phase::ShrinkWidth
                } else {
                    Phase::Hold { elapsed }
                };
                Flow::Done
            }

            Phase::ShrinkWidth => {
                self.w = self.w.saturating_sub(c.width_step);
                if self.w == 0 {
                    self.phase = Phase::ShrinkHeight;
                }
                Flow::Done
            }

            Phase::ShrinkHeight => {
                if self.h < c.height_step {
                    self.h = 0;
                    self.phase = Phase::Dormant;
                } else {
                    self.h -= c.height_step;
                }
                Flow::Done
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SCREEN: Size = Size { cols: 120, rows: 40 };
    const LINES: usize = 50;

    /// Drive one panel with a fixed seed.
    struct Harness {
        config: AnimConfig,
        rng: StdRng,
        panel: Panel,
        size: Size,
    }

    impl Harness {
        fn new(config: AnimConfig) -> Self {
            Self {
                config,
                rng: StdRng::seed_from_u64(7),
                panel: Panel::new(),
                size: SCREEN,
            }
        }

        fn tick(&mut self) -> Panel {
            let mut ctx = TickContext {
                config: &self.config,
                size: self.size,
                line_count: LINES,
                rng: &mut self.rng,
            };
            self.panel.tick(&mut ctx);
            self.panel
        }

        /// Tick until the panel leaves its waiting phase.
        fn spawn(&mut self) -> Panel {
            loop {
                let p = self.tick();
                if p.is_visible() {
                    return p;
                }
            }
        }
    }

    fn quick() -> AnimConfig {
        AnimConfig {
            fps: 1,
            spawn_delay_secs: 1..2,
            ..AnimConfig::default()
        }
    }

    // -- Phase --

    #[test]
    fn phase_indices_cover_zero_to_seven() {
        let phases = [
            Phase::Dormant,
            Phase::Waiting { delay: 3 },
            Phase::Init,
            Phase::GrowHeight,
            Phase::GrowWidth,
            Phase::Hold { elapsed: 9 },
            Phase::ShrinkWidth,
            Phase::ShrinkHeight,
        ];
        let indices: Vec<u8> = phases.iter().map(|p| p.index()).collect();
        assert_eq!(indices, (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn only_dormant_and_waiting_are_invisible() {
        assert!(!Phase::Dormant.is_visible());
        assert!(!Phase::Waiting { delay: 1 }.is_visible());
        assert!(Phase::GrowHeight.is_visible());
        assert!(Phase::ShrinkHeight.is_visible());
    }

    // -- Dormant / Waiting --

    #[test]
    fn dormant_falls_through_to_waiting() {
        let mut h = Harness::new(AnimConfig::default());
        let p = h.tick();
        match p.phase() {
            Phase::Waiting { delay } => {
                // Drawn from [30, 300), then decremented once this tick.
                assert!((29..299).contains(&delay), "delay {delay}");
            }
            other => panic!("expected Waiting, got {other:?}"),
        }
        assert!(!p.is_visible());
    }

    #[test]
    fn single_frame_delay_places_on_first_tick() {
        let mut h = Harness::new(quick());
        let p = h.tick();
        assert_eq!(p.phase(), Phase::GrowHeight);
        assert_eq!((p.width(), p.height()), (0, 0));
    }

    #[test]
    fn waiting_counts_down_one_per_tick() {
        let mut h = Harness::new(AnimConfig { fps: 1, spawn_delay_secs: 3..4, ..AnimConfig::default() });
        assert_eq!(h.tick().phase(), Phase::Waiting { delay: 2 });
        assert_eq!(h.tick().phase(), Phase::Waiting { delay: 1 });
        assert_eq!(h.tick().phase(), Phase::GrowHeight);
    }

    // -- Init --

    #[test]
    fn placement_keeps_margins() {
        let mut h = Harness::new(quick());
        for _ in 0..200 {
            h.panel = Panel::new();
            let p = h.spawn();
            assert!((20..100).contains(&p.x()), "x {}", p.x());
            assert!((6..34).contains(&p.y()), "y {}", p.y());
            assert!(p.scroll() < LINES);
        }
    }

    #[test]
    fn placement_on_tiny_screen_uses_center() {
        let mut h = Harness::new(quick());
        h.size = Size { cols: 30, rows: 5 };
        let p = h.spawn();
        assert_eq!((p.x(), p.y()), (15, 2));
    }

    // -- Grow / Hold / Shrink --

    #[test]
    fn full_lifecycle_geometry() {
        let mut h = Harness::new(quick());
        h.spawn();

        let heights: Vec<u16> = (0..3).map(|_| h.tick().height()).collect();
        assert_eq!(heights, [4, 8, 12]);
        assert_eq!(h.panel.phase(), Phase::GrowWidth);

        let widths: Vec<u16> = (0..5).map(|_| h.tick().width()).collect();
        assert_eq!(widths, [8, 16, 24, 32, 40]);
        assert_eq!(h.panel.phase(), Phase::Hold { elapsed: 0 });

        let start = h.panel.scroll();
        for _ in 0..39 {
            assert!(matches!(h.tick().phase(), Phase::Hold { .. }));
        }
        assert_eq!(h.tick().phase(), Phase::ShrinkWidth);
        assert_eq!(h.panel.scroll(), (start + 80) % LINES);

        let widths: Vec<u16> = (0..5).map(|_| h.tick().width()).collect();
        assert_eq!(widths, [32, 24, 16, 8, 0]);
        assert_eq!(h.panel.phase(), Phase::ShrinkHeight);

        let heights: Vec<u16> = (0..3).map(|_| h.tick().height()).collect();
        assert_eq!(heights, [8, 4, 0]);
        assert!(h.panel.is_visible());

        let p = h.tick();
        assert_eq!(p.phase(), Phase::Dormant);
        assert_eq!((p.width(), p.height()), (0, 0));
        assert!(!p.is_visible());
    }

    #[test]
    fn growth_clamps_when_step_overshoots() {
        let config = AnimConfig { height_step: 10, width_step: 30, ..quick() };
        let mut h = Harness::new(config);
        h.spawn();
        assert_eq!(h.tick().height(), 10);
        assert_eq!(h.tick().height(), 12);
        assert_eq!(h.tick().width(), 30);
        assert_eq!(h.tick().width(), 40);
    }

    #[test]
    fn shrink_height_stops_before_going_negative() {
        let config = AnimConfig { height_step: 10, ..quick() };
        let mut h = Harness::new(config);
        h.panel = Panel { phase: Phase::ShrinkHeight, h: 12, ..Panel::new() };
        assert_eq!(h.tick().height(), 2);
        let p = h.tick();
        assert_eq!(p.phase(), Phase::Dormant);
        assert_eq!(p.height(), 0);
    }

    // -- Properties --

    #[test]
    fn cycle_returns_to_dormant_within_bound() {
        let config = AnimConfig::default();
        // Longest wait + placement + growth + hold + shrink + final tick.
        let bound = 300 + 1 + 3 + 5 + 40 + 5 + 4 + 1;
        let mut h = Harness::new(config);
        h.tick();
        let mut returned = false;
        for _ in 0..bound {
            if h.tick().phase() == Phase::Dormant {
                returned = true;
                break;
            }
        }
        assert!(returned, "panel did not complete its cycle in {bound} ticks");
        assert_eq!((h.panel.width(), h.panel.height()), (0, 0));
    }

    #[test]
    fn geometry_stays_even_and_bounded() {
        let mut h = Harness::new(quick());
        for _ in 0..5_000 {
            let p = h.tick();
            assert!(p.width() <= 40 && p.width() % 2 == 0, "{p:?}");
            assert!(p.height() <= 12 && p.height() % 2 == 0, "{p:?}");
            assert!(p.phase().index() <= 7);
            assert!(p.scroll() < LINES);
        }
    }

    #[test]
    fn same_seed_same_animation() {
        let run = || {
            let mut h = Harness::new(AnimConfig::default());
            (0..600).map(|_| h.tick()).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn holding_rounds_extents_down() {
        let p = Panel::holding(10, 5, 7, 3, 4);
        assert_eq!((p.width(), p.height()), (6, 2));
        assert_eq!(p.phase(), Phase::Hold { elapsed: 0 });
    }
}
