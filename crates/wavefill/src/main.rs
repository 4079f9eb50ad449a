//! # WAVEFILL Demo
//!
//! Plays the liquid-fill indicator in a true-colour terminal.
//!
//! ```bash
//! # Defaults: 32px, 30 fps, 150 frames
//! wavefill_demo
//!
//! # From an attribute file, overriding the fill level
//! wavefill_demo --config crates/wavefill/wavefill.toml --percent 80
//!
//! # Run until interrupted, with lifecycle logging on stderr
//! RUST_LOG=wavefill_ui=debug wavefill_demo --frames 0 2>demo.log
//! ```

mod terminal;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use wavefill_core::{load_toml, Color, MeasureSpec, PixelCanvas, ViewAttributes, WaveResult};
use wavefill_ui::WaveFillView;

use crate::terminal::TerminalPresenter;

/// Terminal background behind the indicator.
const BACKGROUND: Color = Color::rgb(0.05, 0.05, 0.08);

/// Command-line options; each one overrides the attribute file.
#[derive(Debug, Parser)]
#[command(version, about = "Animated liquid-fill indicator in the terminal")]
struct Cli {
    /// TOML attribute file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side of the indicator in pixels (two pixel rows per terminal line).
    #[arg(long)]
    size: Option<u32>,

    /// Ticks per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Number of ticks to play; 0 plays forever.
    #[arg(long)]
    frames: Option<u64>,

    /// Fill level override, clamped to [0, 100].
    #[arg(long, allow_negative_numbers = true)]
    percent: Option<f32>,

    /// Label override; only the first character is shown.
    #[arg(long)]
    label: Option<String>,
}

/// `[demo]` table of the attribute file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DemoSettings {
    size: u32,
    fps: u32,
    frames: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            size: 32,
            fps: 30,
            frames: 150,
        }
    }
}

/// Attribute file: view attributes at the top level plus a `[demo]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DemoFile {
    #[serde(flatten)]
    view: ViewAttributes,
    demo: DemoSettings,
}

impl DemoFile {
    fn load(path: &Path) -> WaveResult<Self> {
        load_toml(path)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => DemoFile::load(path).context("loading demo configuration")?,
        None => DemoFile::default(),
    };

    let side = cli.size.unwrap_or(file.demo.size);
    let fps = cli.fps.unwrap_or(file.demo.fps).max(1);
    let frames = cli.frames.unwrap_or(file.demo.frames);

    let mut view = WaveFillView::new(&file.view);
    if let Some(percent) = cli.percent {
        view.set_water_percent(percent);
    }
    if let Some(label) = &cli.label {
        view.set_label(label);
    }

    let size = view.measure(MeasureSpec::Exactly(side), MeasureSpec::Unspecified(side));
    view.on_size_changed(size.width, size.height);
    view.on_attached();
    tracing::info!(?size, fps, frames, percent = view.water_percent(), "starting demo");

    let mut canvas = PixelCanvas::new(size.width, size.height);
    let mut presenter = TerminalPresenter::new(io::stdout().lock());
    presenter.begin()?;

    let interval = Duration::from_secs(1) / fps;
    let ticker = crossbeam_channel::tick(interval);
    let mut last = std::time::Instant::now();
    let mut played = 0_u64;

    while frames == 0 || played < frames {
        let now = ticker.recv().context("ticker stopped")?;
        view.tick(now.duration_since(last));
        last = now;
        played += 1;

        if view.take_redraw_request() {
            canvas.clear(BACKGROUND);
            view.draw(&mut canvas);
            presenter.present(canvas.pixmap())?;
        }
    }

    view.on_detached();
    presenter.finish()?;
    tracing::info!(played, "demo finished");
    Ok(())
}
