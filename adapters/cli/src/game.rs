//! Per-frame loop driver wiring input, clock, world, feedback and storage.

use std::time::Duration;

use neon_snake_core::{Command, Event, GameMode, GridSize, SessionStatus};
use neon_snake_rendering::{render, FrameInput, Palette, Presentation, Scene};
use neon_snake_storage::{Persistence, PreferenceStore};
use neon_snake_system_clock::SimulationClock;
use neon_snake_system_feedback::{EffectTuning, Feedback, HapticPattern, HapticSink, Notification};
use neon_snake_system_input::{Input, SwipeTuning};
use neon_snake_world::{self as world, query, World};

use crate::viewport::ViewportClassifier;

/// Haptic sink for platforms without a vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LoggingHaptics;

impl HapticSink for LoggingHaptics {
    fn vibrate(&mut self, pattern: &HapticPattern) {
        tracing::debug!(?pattern, "vibration unsupported on this platform");
    }
}

/// Start-up choices resolved from arguments and stored preferences.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GameConfig {
    pub(crate) seed: u64,
    pub(crate) mode: GameMode,
    pub(crate) grid_size: GridSize,
    /// Follows the viewport width when set; `None` pins the board size.
    pub(crate) classifier: Option<ViewportClassifier>,
    pub(crate) haptics: bool,
    pub(crate) show_dpad: bool,
}

/// Owns every piece of game state for the lifetime of the window.
#[derive(Debug)]
pub(crate) struct Game<S, H> {
    world: World,
    clock: SimulationClock,
    input: Input,
    feedback: Feedback,
    persistence: Persistence<S>,
    haptics: H,
    palette: Palette,
    classifier: Option<ViewportClassifier>,
    pending_resize: Option<GridSize>,
    show_dpad: bool,
    commands: Vec<Command>,
    events: Vec<Event>,
    notifications: Vec<Notification>,
}

impl<S: PreferenceStore, H: HapticSink> Game<S, H> {
    pub(crate) fn new(config: GameConfig, persistence: Persistence<S>, haptics: H) -> Self {
        let mut world = World::with_seed(config.seed);
        let mut events = Vec::new();
        for command in [
            Command::SeedBestScore {
                best: persistence.best_score(),
            },
            Command::SelectMode { mode: config.mode },
            Command::ResizeGrid {
                size: config.grid_size,
            },
        ] {
            world::apply(&mut world, command, &mut events);
        }
        tracing::info!(
            seed = config.seed,
            mode = %config.mode,
            grid = config.grid_size.get(),
            best = persistence.best_score(),
            "game ready"
        );

        let mut game = Self {
            world,
            clock: SimulationClock::new(),
            input: Input::new(SwipeTuning::default()),
            feedback: Feedback::new(EffectTuning::default(), config.haptics),
            persistence,
            haptics,
            palette: Palette::neon(),
            classifier: config.classifier,
            pending_resize: None,
            show_dpad: config.show_dpad,
            commands: Vec::new(),
            events,
            notifications: Vec::new(),
        };
        game.dispatch_events(Duration::ZERO);
        game
    }

    /// Window description carrying the idle scene.
    pub(crate) fn presentation(&self) -> Presentation {
        let scene = self.scene(Duration::ZERO);
        Presentation::new(
            "Neon Snake",
            self.palette.background,
            self.show_dpad,
            scene,
        )
    }

    /// Advances the game by one rendered frame and rebuilds `scene`.
    pub(crate) fn frame(&mut self, now: Duration, input: FrameInput, scene: &mut Scene) {
        self.track_viewport(input.viewport.x);
        self.input.handle(
            &input.keys,
            &input.dpad,
            &input.touches,
            input.viewport,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        if self
            .events
            .iter()
            .any(|event| matches!(event, Event::SessionCreated { .. }))
        {
            self.clock.reset();
        }

        self.clock.begin_frame(now, query::is_ticking(&self.world));
        while query::is_ticking(&self.world)
            && self.clock.next_tick(query::tick_rate(&self.world))
        {
            world::apply(&mut self.world, Command::Tick { now }, &mut self.events);
        }

        self.dispatch_events(now);
        *scene = self.scene(now);
    }

    fn track_viewport(&mut self, width: f32) {
        if let Some(size) = self
            .classifier
            .as_mut()
            .and_then(|classifier| classifier.observe(width))
        {
            self.pending_resize = Some(size);
        }

        let Some(size) = self.pending_resize else {
            return;
        };
        if matches!(
            query::status(&self.world),
            SessionStatus::Idle | SessionStatus::GameOver
        ) {
            self.pending_resize = None;
            self.commands.push(Command::ResizeGrid { size });
        }
    }

    fn dispatch_events(&mut self, now: Duration) {
        for event in &self.events {
            match event {
                Event::ModeSelected { mode } => self.persistence.set_mode(*mode),
                Event::GameOver { cause, score, .. } => {
                    tracing::info!(?cause, score, "game over");
                }
                _ => {}
            }
        }

        self.feedback.handle(
            &self.events,
            now,
            &mut self.haptics,
            &mut self.notifications,
        );
        self.feedback.prune(now);
        self.events.clear();

        for notification in self.notifications.drain(..) {
            match notification {
                Notification::BestUpdated { best } => {
                    let _ = self.persistence.record_best(best);
                }
                Notification::Ended { score } => {
                    tracing::debug!(score, best = self.persistence.best_score(), "session ended");
                }
                Notification::ScoreUpdated { .. }
                | Notification::Playing
                | Notification::Paused => {
                    tracing::trace!(?notification, "hud notification");
                }
            }
        }
    }

    fn scene(&self, now: Duration) -> Scene {
        render(
            &query::snapshot(&self.world),
            &self.feedback.view(),
            &self.palette,
            now,
        )
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
