// SPDX-License-Identifier: MIT
//
// bustle: a terminal that looks busy.
//
// This is the main binary that wires together the two crates:
//
//   bustle-term → glyph cells, screen buffer, output, size query, frame loop
//   bustle-anim → text store, panel lifecycle, glyph tables, compositor
//
// Startup is the only place anything can fail. In order:
//
//   parse args → init logging → load source → sample size → build scene
//
// Every failure before the first frame exits nonzero with nothing drawn.
// After that the frame loop runs until SIGINT/SIGTERM (or `--frames`):
//
//   tick panels → composite → cursor home + screen, one write → sleep 1/fps

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bustle_anim::config::{AnimConfig, ConfigError};
use bustle_anim::glyph::GlyphStyle;
use bustle_anim::scene::Scene;
use bustle_anim::text::{TextError, TextStore};
use bustle_term::frame_loop::{FrameLoop, LoopConfig};
use bustle_term::signal;
use bustle_term::terminal::Terminal;

// ─── Command line ───────────────────────────────────────────────────────────

/// Panels of scrolling source text that spawn, grow, and fade. Ctrl-C quits.
#[derive(Debug, Parser)]
#[command(name = "bustle", version, about)]
struct Cli {
    /// Text file to display (first 8 KiB, at most 1024 lines).
    file: PathBuf,

    /// Frames per second.
    #[arg(long, env = "BUSTLE_FPS", default_value_t = 30)]
    fps: u32,

    /// Number of panels in the pool.
    #[arg(long, env = "BUSTLE_PANELS", default_value_t = 20)]
    panels: usize,

    /// Seed for a reproducible animation.
    #[arg(long)]
    seed: Option<u64>,

    /// Glyph table for panel text: `quadrant` or `ascii`.
    #[arg(long, value_name = "STYLE", default_value_t = GlyphStyle::Quadrant)]
    glyphs: GlyphStyle,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Draw on the main screen and leave the cursor alone.
    #[arg(long)]
    no_alt_screen: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Animation settings: defaults overridden by flags.
    fn anim_config(&self) -> AnimConfig {
        AnimConfig {
            panels: self.panels,
            fps: self.fps,
            glyph_style: self.glyphs,
            ..AnimConfig::default()
        }
    }

    /// Frame loop timing.
    const fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            fps: self.fps,
            max_frames: self.frames,
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Anything that ends a run early.
#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal output failed: {0}")]
    Io(#[from] io::Error),
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Install the global subscriber. `RUST_LOG` filters; the default is `warn`.
///
/// Frames go to stdout, so a log file keeps diagnostics from landing in the
/// middle of the animation.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<u64, Error> {
    let text = TextStore::load(&cli.file)?;

    let mut terminal = Terminal::new();
    let size = terminal.size();
    let mut scene = Scene::new(text, cli.anim_config(), size, cli.seed)?;
    let mut frame_loop = FrameLoop::new(size, cli.loop_config());

    signal::install_interrupt_handler();
    if !cli.no_alt_screen {
        terminal.enter()?;
    }

    let result = {
        let mut stdout = io::stdout().lock();
        frame_loop.run(&mut scene, &mut stdout)
    };

    // Restore the screen even if a frame failed.
    let restored = terminal.leave();
    settle(result, restored)
}

/// Combine the loop result with the terminal restore result. A frame
/// error outranks a restore error.
fn settle(frames: io::Result<u64>, restored: io::Result<()>) -> Result<u64, Error> {
    match (frames, restored) {
        (Ok(frames), Ok(())) => Ok(frames),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e.into()),
        (Err(e), Err(restore)) => {
            tracing::warn!(error = %restore, "terminal restore failed after output error");
            Err(e.into())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("bustle: cannot open log file: {e}");
        process::exit(1);
    }

    match run(&cli) {
        Ok(frames) => tracing::info!(frames, "stopped"),
        Err(e) => {
            tracing::error!(error = %e, "startup or output failure");
            eprintln!("bustle: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
