#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation feedback derived from world events.
//!
//! The feedback system never mutates the world. It listens to the event
//! stream and produces three kinds of output: HUD notifications, transient
//! visual effects (motion trail, death particles, floating labels) and haptic
//! requests forwarded to a [`HapticSink`].

use std::{collections::VecDeque, f32::consts::TAU, time::Duration};

use neon_snake_core::{
    Cell, EffectsView, Event, FloatingLabel, FoodKind, Particle, SessionStatus, TrailMark,
};

/// Vibration pattern requested from the platform, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HapticPattern {
    /// Single vibration of the given length.
    Pulse(u32),
    /// Alternating vibrate/pause lengths, starting with a vibration.
    Sequence(Vec<u32>),
}

impl HapticPattern {
    /// Pattern played when ordinary food is eaten.
    #[must_use]
    pub fn food() -> Self {
        Self::Pulse(15)
    }

    /// Pattern played when bonus food is eaten.
    #[must_use]
    pub fn bonus() -> Self {
        Self::Sequence(vec![20, 40, 20])
    }

    /// Pattern played when the session ends.
    #[must_use]
    pub fn game_over() -> Self {
        Self::Sequence(vec![60, 40, 120])
    }
}

/// Fire-and-forget haptic output.
pub trait HapticSink {
    /// Plays the pattern; unsupported platforms ignore the request.
    fn vibrate(&mut self, pattern: &HapticPattern);
}

/// HUD-facing notifications derived from events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The session score changed.
    ScoreUpdated {
        /// Score after the change.
        score: u32,
    },
    /// The best score increased and should be persisted.
    BestUpdated {
        /// New best score.
        best: u32,
    },
    /// The player started or resumed play.
    Playing,
    /// The player paused play.
    Paused,
    /// The session ended.
    Ended {
        /// Final score.
        score: u32,
    },
}

/// Lifetimes and sizes of the transient effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTuning {
    /// How long a trail mark stays visible.
    pub trail_lifetime: Duration,
    /// Maximum number of trail marks kept at once.
    pub trail_capacity: usize,
    /// Particles emitted on game over.
    pub particle_count: usize,
    /// How long a particle stays visible.
    pub particle_lifetime: Duration,
    /// Fastest particle speed in cells per second.
    pub particle_speed: f32,
    /// How long a floating label stays visible.
    pub label_lifetime: Duration,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            trail_lifetime: Duration::from_millis(320),
            trail_capacity: 24,
            particle_count: 18,
            particle_lifetime: Duration::from_millis(650),
            particle_speed: 5.0,
            label_lifetime: Duration::from_millis(750),
        }
    }
}

/// Event-driven feedback system.
#[derive(Debug)]
pub struct Feedback {
    tuning: EffectTuning,
    haptics_enabled: bool,
    last_head: Option<Cell>,
    trail: VecDeque<TrailMark>,
    particles: Vec<Particle>,
    labels: VecDeque<FloatingLabel>,
}

impl Feedback {
    /// Creates a feedback system; `haptics_enabled` mirrors the persisted preference.
    #[must_use]
    pub fn new(tuning: EffectTuning, haptics_enabled: bool) -> Self {
        Self {
            tuning,
            haptics_enabled,
            last_head: None,
            trail: VecDeque::new(),
            particles: Vec::new(),
            labels: VecDeque::new(),
        }
    }

    /// Consumes the events produced during a frame.
    pub fn handle(
        &mut self,
        events: &[Event],
        now: Duration,
        haptics: &mut dyn HapticSink,
        out: &mut Vec<Notification>,
    ) {
        for event in events {
            match event {
                Event::SessionCreated { .. } => self.clear(),
                Event::StatusChanged { to, .. } => match to {
                    SessionStatus::Running => out.push(Notification::Playing),
                    SessionStatus::Paused => out.push(Notification::Paused),
                    SessionStatus::Idle | SessionStatus::GameOver => {}
                },
                Event::SnakeAdvanced { head, vacated } => {
                    self.last_head = Some(*head);
                    if let Some(cell) = vacated {
                        self.leave_trail(*cell, now);
                    }
                }
                Event::FoodEaten {
                    cell,
                    kind,
                    score_delta,
                } => {
                    self.labels.push_back(FloatingLabel {
                        cell: *cell,
                        text: label_text(*kind, *score_delta),
                        kind: *kind,
                        born_at: now,
                    });
                    let pattern = if *kind == FoodKind::Bonus {
                        HapticPattern::bonus()
                    } else {
                        HapticPattern::food()
                    };
                    self.vibrate(haptics, &pattern);
                }
                Event::ScoreChanged { score } => {
                    out.push(Notification::ScoreUpdated { score: *score });
                }
                Event::BestScoreRaised { best } => {
                    out.push(Notification::BestUpdated { best: *best });
                }
                Event::GameOver { at, score, .. } => {
                    let origin = self.last_head.unwrap_or(*at);
                    self.burst(origin, now);
                    self.vibrate(haptics, &HapticPattern::game_over());
                    out.push(Notification::Ended { score: *score });
                }
                _ => {}
            }
        }
    }

    /// Drops every effect whose lifetime ended before `now`.
    pub fn prune(&mut self, now: Duration) {
        let tuning = self.tuning;
        let alive = |born_at: Duration, lifetime: Duration| now.saturating_sub(born_at) < lifetime;
        self.trail
            .retain(|mark| alive(mark.born_at, tuning.trail_lifetime));
        self.particles
            .retain(|particle| alive(particle.born_at, tuning.particle_lifetime));
        self.labels
            .retain(|label| alive(label.born_at, tuning.label_lifetime));
    }

    /// Read-only view of the live effects.
    #[must_use]
    pub fn view(&self) -> EffectsView {
        EffectsView {
            trail: self.trail.iter().copied().collect(),
            particles: self.particles.clone(),
            labels: self.labels.iter().cloned().collect(),
            trail_lifetime: self.tuning.trail_lifetime,
            particle_lifetime: self.tuning.particle_lifetime,
            label_lifetime: self.tuning.label_lifetime,
        }
    }

    fn clear(&mut self) {
        self.last_head = None;
        self.trail.clear();
        self.particles.clear();
        self.labels.clear();
    }

    fn leave_trail(&mut self, cell: Cell, now: Duration) {
        self.trail.push_back(TrailMark { cell, born_at: now });
        while self.trail.len() > self.tuning.trail_capacity {
            let _ = self.trail.pop_front();
        }
    }

    fn burst(&mut self, cell: Cell, now: Duration) {
        let count = self.tuning.particle_count;
        let origin = (cell.x() as f32 + 0.5, cell.y() as f32 + 0.5);
        self.particles.extend((0..count).map(|index| {
            let angle = index as f32 * TAU / count as f32;
            let speed = self.tuning.particle_speed * (0.55 + 0.15 * (index % 4) as f32);
            Particle {
                origin,
                velocity: (angle.cos() * speed, angle.sin() * speed),
                born_at: now,
            }
        }));
    }

    fn vibrate(&self, haptics: &mut dyn HapticSink, pattern: &HapticPattern) {
        if !self.haptics_enabled {
            return;
        }
        tracing::trace!(?pattern, "haptic request");
        haptics.vibrate(pattern);
    }
}

/// Text floated above eaten food.
#[must_use]
pub fn label_text(kind: FoodKind, score_delta: u32) -> String {
    match kind {
        FoodKind::Speed => "FAST".to_owned(),
        FoodKind::Slow => "SLOW".to_owned(),
        FoodKind::Normal | FoodKind::Bonus => format!("+{score_delta}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<HapticPattern>);

    impl HapticSink for Recorder {
        fn vibrate(&mut self, pattern: &HapticPattern) {
            self.0.push(pattern.clone());
        }
    }

    fn eaten(kind: FoodKind, score_delta: u32) -> Event {
        Event::FoodEaten {
            cell: Cell::new(4, 4),
            kind,
            score_delta,
        }
    }

    #[test]
    fn labels_describe_the_food() {
        assert_eq!(label_text(FoodKind::Normal, 1), "+1");
        assert_eq!(label_text(FoodKind::Bonus, 5), "+5");
        assert_eq!(label_text(FoodKind::Speed, 1), "FAST");
        assert_eq!(label_text(FoodKind::Slow, 1), "SLOW");
    }

    #[test]
    fn haptic_patterns_follow_food_kind() {
        let mut feedback = Feedback::new(EffectTuning::default(), true);
        let mut haptics = Recorder::default();
        let mut out = Vec::new();

        feedback.handle(
            &[eaten(FoodKind::Normal, 1), eaten(FoodKind::Bonus, 5)],
            Duration::ZERO,
            &mut haptics,
            &mut out,
        );

        assert_eq!(haptics.0, vec![HapticPattern::food(), HapticPattern::bonus()]);
    }

    #[test]
    fn disabled_haptics_stay_silent() {
        let mut feedback = Feedback::new(EffectTuning::default(), false);
        let mut haptics = Recorder::default();
        let mut out = Vec::new();

        feedback.handle(
            &[eaten(FoodKind::Bonus, 5)],
            Duration::ZERO,
            &mut haptics,
            &mut out,
        );
        assert!(haptics.0.is_empty());
        assert_eq!(feedback.view().labels.len(), 1, "visual feedback still plays");
    }

    #[test]
    fn trail_is_capped_and_expires() {
        let tuning = EffectTuning {
            trail_capacity: 3,
            ..EffectTuning::default()
        };
        let mut feedback = Feedback::new(tuning, false);
        let mut haptics = Recorder::default();
        let mut out = Vec::new();

        let moves: Vec<Event> = (0..5)
            .map(|x| Event::SnakeAdvanced {
                head: Cell::new(x + 2, 0),
                vacated: Some(Cell::new(x, 0)),
            })
            .collect();
        feedback.handle(&moves, Duration::ZERO, &mut haptics, &mut out);

        let trail = feedback.view().trail;
        assert_eq!(trail.len(), 3);
        assert_eq!(trail[0].cell, Cell::new(2, 0));

        feedback.prune(tuning.trail_lifetime);
        assert!(feedback.view().trail.is_empty());
    }

    #[test]
    fn new_session_clears_effects() {
        let mut feedback = Feedback::new(EffectTuning::default(), false);
        let mut haptics = Recorder::default();
        let mut out = Vec::new();
        feedback.handle(
            &[eaten(FoodKind::Normal, 1)],
            Duration::ZERO,
            &mut haptics,
            &mut out,
        );
        assert_eq!(feedback.view().labels.len(), 1);

        feedback.handle(
            &[Event::SessionCreated {
                mode: neon_snake_core::GameMode::Classic,
                grid_size: neon_snake_core::GridSize::new(21),
            }],
            Duration::ZERO,
            &mut haptics,
            &mut out,
        );
        assert_eq!(
            feedback.view(),
            EffectsView {
                trail_lifetime: EffectTuning::default().trail_lifetime,
                particle_lifetime: EffectTuning::default().particle_lifetime,
                label_lifetime: EffectTuning::default().label_lifetime,
                ..EffectsView::default()
            }
        );
    }
}
