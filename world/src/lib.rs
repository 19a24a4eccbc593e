#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Neon Snake.
//!
//! The world owns exactly one game session at a time
//! together with the state that outlives sessions: the selected mode, the grid
//! size, the best score and the seeded random stream. All mutation flows
//! through [`apply`]; adapters and systems observe the result through the
//! [`query`] module and the emitted events.

pub mod rules;
mod session;

use std::time::Duration;

use neon_snake_core::{Command, Event, GameMode, GridSize, SessionStatus};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::session::GameSession;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0x5eed_0f5a_4ec0_de01;

/// Tuning knobs for speed curves and timed food effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionTuning {
    /// Ticks per second at score zero.
    pub base_rate: f32,
    /// Points required for each score-linked speed-up.
    pub speedup_every: u32,
    /// Ticks per second added by each speed-up.
    pub speedup_step: f32,
    /// Upper bound for every rate, including overrides.
    pub max_rate: f32,
    /// Lower bound for slowing overrides.
    pub min_rate: f32,
    /// Rate added to the base rate by speed food.
    pub boost_delta: f32,
    /// Rate removed from the base rate by slow food.
    pub slow_delta: f32,
    /// How long speed and slow overrides last.
    pub override_duration: Duration,
    /// Rate added every tick in survival mode.
    pub survival_ramp: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            base_rate: 7.0,
            speedup_every: 5,
            speedup_step: 0.6,
            max_rate: 20.0,
            min_rate: 3.0,
            boost_delta: 5.0,
            slow_delta: 3.0,
            override_duration: Duration::from_millis(5_000),
            survival_ramp: 0.02,
        }
    }
}

/// Represents the authoritative Neon Snake world state.
#[derive(Debug)]
pub struct World {
    rng: ChaCha8Rng,
    tuning: SessionTuning,
    mode: GameMode,
    grid_size: GridSize,
    best: u32,
    session: GameSession,
}

impl World {
    /// Creates a world seeded with [`DEFAULT_SEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a world whose food and obstacle placement follows `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_tuning(seed, SessionTuning::default())
    }

    /// Creates a world with explicit tuning.
    #[must_use]
    pub fn with_tuning(seed: u64, tuning: SessionTuning) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mode = GameMode::default();
        let grid_size = GridSize::default();
        let session = GameSession::new(grid_size, mode, tuning, &mut rng);
        Self {
            rng,
            tuning,
            mode,
            grid_size,
            best: 0,
            session,
        }
    }

    fn replace_session(&mut self, out_events: &mut Vec<Event>) {
        self.session = GameSession::new(self.grid_size, self.mode, self.tuning, &mut self.rng);
        tracing::info!(
            mode = %self.mode,
            grid = self.grid_size.get(),
            "session created"
        );
        out_events.push(Event::SessionCreated {
            mode: self.mode,
            grid_size: self.grid_size,
        });
    }

    fn raise_best(&mut self, candidate: u32, out_events: &mut Vec<Event>) {
        if candidate > self.best {
            self.best = candidate;
            out_events.push(Event::BestScoreRaised { best: candidate });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => match world.session.status() {
            SessionStatus::Idle | SessionStatus::Paused => world.session.run(out_events),
            SessionStatus::GameOver => {
                world.replace_session(out_events);
                world.session.run(out_events);
            }
            SessionStatus::Running => {}
        },
        Command::TogglePause => {
            if !world.session.started() {
                return;
            }
            match world.session.status() {
                SessionStatus::Running => world.session.pause(out_events),
                SessionStatus::Paused => world.session.run(out_events),
                SessionStatus::Idle | SessionStatus::GameOver => {}
            }
        }
        Command::Restart => {
            world.replace_session(out_events);
            world.session.run(out_events);
        }
        Command::RequestHeading { heading } => {
            world.session.request_heading(heading, out_events);
        }
        Command::ResizeGrid { size } => {
            if world.session.status() == SessionStatus::Running {
                tracing::debug!(requested = size.get(), "resize ignored while running");
                out_events.push(Event::GridResizeRejected { requested: size });
                return;
            }
            world.grid_size = size;
            world.replace_session(out_events);
        }
        Command::SelectMode { mode } => {
            world.mode = mode;
            out_events.push(Event::ModeSelected { mode });
            if matches!(
                world.session.status(),
                SessionStatus::Idle | SessionStatus::GameOver
            ) {
                world.replace_session(out_events);
            }
        }
        Command::SeedBestScore { best } => world.raise_best(best, out_events),
        Command::Tick { now } => {
            let World { session, rng, .. } = world;
            if let Some(score) = session.tick(now, rng, out_events) {
                world.raise_best(score, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use neon_snake_core::{GameMode, GridSize, SessionSnapshot, SessionStatus};

    use super::World;

    /// Captures a read-only view of the active session.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        let session = &world.session;
        SessionSnapshot {
            grid_size: session.grid_size(),
            mode: session.mode(),
            snake: session.snake().collect(),
            heading: session.heading(),
            food: session.food(),
            obstacles: session.obstacles().collect(),
            score: session.score(),
            best: world.best,
            status: session.status(),
            started: session.started(),
            tick_rate: session.rate().effective(),
            rate_override: session.rate().active,
        }
    }

    /// Lifecycle state of the active session.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.session.status()
    }

    /// Whether the loop driver should currently produce ticks.
    #[must_use]
    pub fn is_ticking(world: &World) -> bool {
        world.session.status().is_ticking()
    }

    /// Ticks per second currently in effect.
    #[must_use]
    pub fn tick_rate(world: &World) -> f32 {
        world.session.rate().effective()
    }

    /// Score of the active session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score()
    }

    /// All-time best score known to the world.
    #[must_use]
    pub fn best_score(world: &World) -> u32 {
        world.best
    }

    /// Mode that the next session will use.
    #[must_use]
    pub fn selected_mode(world: &World) -> GameMode {
        world.mode
    }

    /// Grid size that the next session will use.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid_size
    }
}
