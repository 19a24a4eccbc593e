#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Neon Snake in a window.

mod game;
mod viewport;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use neon_snake_core::{GameMode, GridSize, MAX_GRID_SIZE, MIN_GRID_SIZE};
use neon_snake_rendering::RenderingBackend;
use neon_snake_rendering_macroquad::MacroquadBackend;
use neon_snake_storage::{Persistence, PreferenceStore, TomlFileStore};
use neon_snake_world::DEFAULT_SEED;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::{
    game::{Game, GameConfig, LoggingHaptics},
    viewport::{grid_for_width, ViewportClassifier},
};

/// Width assumed for the board size until the window reports its own.
const DEFAULT_VIEWPORT_WIDTH: f32 = 540.0;

#[derive(Debug, Parser)]
#[command(name = "neon-snake")]
#[command(about = "Neon Snake: grid snake with classic, obstacle, survival and neon feast modes")]
struct Args {
    /// Game mode (classic, obstacles, survival, neonFeast); defaults to the last one played
    #[arg(long)]
    mode: Option<GameMode>,

    /// Fixed board size in cells (5 to 64); disables sizing from the window width
    #[arg(
        long,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_GRID_SIZE)..=i64::from(MAX_GRID_SIZE))
    )]
    grid: Option<u32>,

    /// Viewport width used to pick the initial board size
    #[arg(long)]
    viewport_width: Option<f32>,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Preferences file holding the best score and settings
    #[arg(long, default_value = "neon-snake.toml")]
    prefs: PathBuf,

    /// Synchronise presentation with the display refresh rate
    #[arg(long)]
    vsync: Option<bool>,

    /// Log frame timing once per second
    #[arg(long)]
    show_fps: bool,

    /// Disable haptic feedback for this run
    #[arg(long)]
    no_haptics: bool,

    /// Remember whether haptic feedback is wanted
    #[arg(long)]
    haptics: Option<bool>,

    /// Remember whether the on-screen D-pad is shown
    #[arg(long)]
    dpad: Option<bool>,

    /// Remember the theme name
    #[arg(long)]
    theme: Option<String>,
}

/// Persists the preference flags given on the command line.
fn remember_choices<S: PreferenceStore>(args: &Args, persistence: &mut Persistence<S>) {
    if let Some(enabled) = args.haptics {
        persistence.set_haptics(enabled);
    }
    if let Some(enabled) = args.dpad {
        persistence.set_dpad(enabled);
    }
    if let Some(theme) = &args.theme {
        persistence.set_theme(theme);
    }
}

/// Entry point for the Neon Snake command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let mut persistence = Persistence::open(TomlFileStore::new(&args.prefs));
    remember_choices(&args, &mut persistence);
    let preferences = persistence.preferences().clone();

    let (grid_size, classifier) = match args.grid {
        Some(cells) => (GridSize::new(cells), None),
        None => {
            let size = grid_for_width(args.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH));
            (size, Some(ViewportClassifier::new(size)))
        }
    };
    let config = GameConfig {
        seed: args.seed.unwrap_or(DEFAULT_SEED),
        mode: args.mode.unwrap_or(preferences.mode),
        grid_size,
        classifier,
        haptics: preferences.haptics && !args.no_haptics,
        show_dpad: preferences.dpad,
    };
    tracing::debug!(
        prefs = %args.prefs.display(),
        theme = %preferences.theme,
        "preferences loaded"
    );

    let mut game = Game::new(config, persistence, LoggingHaptics);
    let presentation = game.presentation();

    let mut backend = MacroquadBackend::new().with_show_fps(args.show_fps);
    if let Some(vsync) = args.vsync {
        backend = backend.with_vsync(vsync);
    }

    backend
        .run(presentation, move |now, input, scene| {
            game.frame(now, input, scene);
        })
        .context("rendering loop failed")
}
