//! The panel pool: a fixed number of panels, advanced in index order.
//!
//! Panels never leave the pool. A panel that finishes its lifecycle goes
//! back to `Dormant` and starts over. Pool order is also draw priority:
//! the compositor lets the lowest index win wherever panels overlap.

use rand::Rng;

use crate::panel::{Panel, Phase, TickContext};

/// Fixed-size collection of panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPool {
    panels: Vec<Panel>,
}

impl PanelPool {
    /// `count` dormant panels.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            panels: vec![Panel::new(); count],
        }
    }

    /// Wrap an existing set of panels, keeping their order.
    #[must_use]
    pub const fn from_panels(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the pool has no panels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panels in priority order.
    #[inline]
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Number of panels currently drawn.
    #[must_use]
    pub fn visible(&self) -> usize {
        self.panels.iter().filter(|p| p.is_visible()).count()
    }

    /// Advance every panel by one frame, in index order.
    pub fn tick_all<R: Rng>(&mut self, ctx: &mut TickContext<'_, R>) {
        for (index, panel) in self.panels.iter_mut().enumerate() {
            let before = panel.phase();
            panel.tick(ctx);

            if matches!(before, Phase::Waiting { .. }) && panel.is_visible() {
                tracing::debug!(
                    panel = index,
                    x = panel.x(),
                    y = panel.y(),
                    scroll = panel.scroll(),
                    "panel spawned"
                );
            } else if before.is_visible() && panel.phase() == Phase::Dormant {
                tracing::trace!(panel = index, "panel despawned");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
