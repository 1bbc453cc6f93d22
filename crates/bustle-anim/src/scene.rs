//! The scene: text, panels, and compositor driven as one `Animation`.
//!
//! Each frame the frame loop calls [`Scene::tick`] (every panel advances one
//! step, in pool order) and then [`Scene::paint`] (the compositor paints the
//! pool onto the cleared screen). The random stream is owned here, so a
//! seeded scene replays the same animation frame for frame.

use rand::SeedableRng;
use rand::rngs::StdRng;

use bustle_term::frame_loop::Animation;
use bustle_term::screen::Screen;
use bustle_term::terminal::Size;

use crate::compositor::Compositor;
use crate::config::{AnimConfig, ConfigError};
use crate::panel::TickContext;
use crate::pool::PanelPool;
use crate::text::TextStore;

/// Everything one bustle run animates.
pub struct Scene {
    config: AnimConfig,
    size: Size,
    text: TextStore,
    pool: PanelPool,
    compositor: Compositor,
    rng: StdRng,
}

impl Scene {
    /// Build a scene of `config.panels` dormant panels.
    ///
    /// With a `seed` the animation is reproducible; without one the random
    /// stream is seeded from the OS.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn new(text: TextStore, config: AnimConfig, size: Size, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let pool = PanelPool::new(config.panels);

        tracing::info!(
            panels = config.panels,
            cols = size.cols,
            rows = size.rows,
            lines = text.line_count(),
            seed = ?seed,
            "scene ready"
        );

        Ok(Self {
            config,
            size,
            text,
            pool,
            compositor: Compositor::new(),
            rng,
        })
    }

    /// Screen size the scene was built for.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The panels, in priority order.
    #[must_use]
    pub const fn pool(&self) -> &PanelPool {
        &self.pool
    }
}

impl Animation for Scene {
    fn tick(&mut self) {
        let mut ctx = TickContext {
            config: &self.config,
            size: self.size,
            line_count: self.text.line_count(),
            rng: &mut self.rng,
        };
        self.pool.tick_all(&mut ctx);
    }

    fn paint(&mut self, screen: &mut Screen) {
        self.compositor
            .rasterize(self.pool.panels(), &self.text, self.config.glyph_style, screen);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
