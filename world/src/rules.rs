//! Mode-specific rules consulted by the session while it ticks.
//!
//! A session picks its rule set once, at creation, through [`rules_for`].
//! Everything that differs between modes (obstacle layout, food kinds, score
//! deltas and the tick-rate curve) sits behind the [`ModeRules`] trait so the
//! tick algorithm itself stays identical for every mode.

use std::time::Duration;

use neon_snake_core::{FoodKind, GameMode, GridSize, RateOverride};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::SessionTuning;

/// Cells per obstacle in obstacle mode.
const CELLS_PER_OBSTACLE: u32 = 20;

/// Points awarded for bonus food.
const BONUS_POINTS: u32 = 5;

/// Tick-rate bookkeeping shared by every mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateState {
    /// Rate in effect when no override is active.
    pub base: f32,
    /// Temporary override granted by special food.
    pub active: Option<RateOverride>,
}

impl RateState {
    /// Creates a rate state without an override.
    #[must_use]
    pub const fn new(base: f32) -> Self {
        Self { base, active: None }
    }

    /// Ticks per second currently in effect.
    #[must_use]
    pub fn effective(&self) -> f32 {
        self.active
            .map_or(self.base, |rate_override| rate_override.rate)
    }
}

/// Outcome of eating a single food item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodEffect {
    /// Points added to the score.
    pub score_delta: u32,
    /// Override replacing any active one, if the food grants one.
    pub rate_override: Option<RateOverride>,
}

impl FoodEffect {
    const fn points(score_delta: u32) -> Self {
        Self {
            score_delta,
            rate_override: None,
        }
    }
}

/// Capabilities that vary between game modes.
pub trait ModeRules: std::fmt::Debug {
    /// Mode implemented by the rule set.
    fn mode(&self) -> GameMode;

    /// Whether obstacle cells are generated and fatal.
    fn has_obstacles(&self) -> bool {
        false
    }

    /// Number of obstacles placed on a grid of the provided size.
    fn obstacle_count(&self, _grid: GridSize) -> usize {
        0
    }

    /// Chooses the kind of the next food item.
    fn spawn_kind(&self, _rng: &mut ChaCha8Rng) -> FoodKind {
        FoodKind::Normal
    }

    /// Resolves the effect of eating food of the provided kind at `now`.
    fn food_effect(&self, _kind: FoodKind, _now: Duration) -> FoodEffect {
        FoodEffect::points(1)
    }

    /// Base rate for the provided score, or `None` when score does not move the rate.
    fn rate_for_score(&self, score: u32) -> Option<f32>;

    /// Adjusts the rate once per tick before the snake moves.
    fn on_tick(&self, _rate: &mut RateState) {}

    /// Drops an override whose deadline has been reached, returning its source.
    fn expire_override(&self, rate: &mut RateState, now: Duration) -> Option<FoodKind> {
        let expired = rate
            .active
            .filter(|rate_override| rate_override.expires_at <= now)?;
        rate.active = None;
        Some(expired.source)
    }
}

/// Builds the rule set for the provided mode.
#[must_use]
pub fn rules_for(mode: GameMode, tuning: SessionTuning) -> Box<dyn ModeRules> {
    match mode {
        GameMode::Classic => Box::new(Classic { tuning }),
        GameMode::Obstacles => Box::new(Obstacles { tuning }),
        GameMode::Survival => Box::new(Survival { tuning }),
        GameMode::NeonFeast => Box::new(NeonFeast { tuning }),
    }
}

fn score_curve(tuning: &SessionTuning, score: u32) -> f32 {
    let steps = if tuning.speedup_every == 0 {
        0
    } else {
        score / tuning.speedup_every
    };
    (tuning.base_rate + steps as f32 * tuning.speedup_step).min(tuning.max_rate)
}

#[derive(Debug)]
struct Classic {
    tuning: SessionTuning,
}

impl ModeRules for Classic {
    fn mode(&self) -> GameMode {
        GameMode::Classic
    }

    fn rate_for_score(&self, score: u32) -> Option<f32> {
        Some(score_curve(&self.tuning, score))
    }
}

#[derive(Debug)]
struct Obstacles {
    tuning: SessionTuning,
}

impl ModeRules for Obstacles {
    fn mode(&self) -> GameMode {
        GameMode::Obstacles
    }

    fn has_obstacles(&self) -> bool {
        true
    }

    fn obstacle_count(&self, grid: GridSize) -> usize {
        (grid.cell_count() / CELLS_PER_OBSTACLE) as usize
    }

    fn rate_for_score(&self, score: u32) -> Option<f32> {
        Some(score_curve(&self.tuning, score))
    }
}

#[derive(Debug)]
struct Survival {
    tuning: SessionTuning,
}

impl ModeRules for Survival {
    fn mode(&self) -> GameMode {
        GameMode::Survival
    }

    fn rate_for_score(&self, _score: u32) -> Option<f32> {
        None
    }

    fn on_tick(&self, rate: &mut RateState) {
        rate.base = (rate.base + self.tuning.survival_ramp).min(self.tuning.max_rate);
    }
}

#[derive(Debug)]
struct NeonFeast {
    tuning: SessionTuning,
}

impl ModeRules for NeonFeast {
    fn mode(&self) -> GameMode {
        GameMode::NeonFeast
    }

    fn spawn_kind(&self, rng: &mut ChaCha8Rng) -> FoodKind {
        FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())]
    }

    fn food_effect(&self, kind: FoodKind, now: Duration) -> FoodEffect {
        let tuning = &self.tuning;
        let timed = |rate: f32| FoodEffect {
            score_delta: 1,
            rate_override: Some(RateOverride {
                source: kind,
                rate,
                expires_at: now + tuning.override_duration,
            }),
        };
        match kind {
            FoodKind::Normal => FoodEffect::points(1),
            FoodKind::Speed => timed((tuning.base_rate + tuning.boost_delta).min(tuning.max_rate)),
            FoodKind::Slow => timed((tuning.base_rate - tuning.slow_delta).max(tuning.min_rate)),
            FoodKind::Bonus => FoodEffect::points(BONUS_POINTS),
        }
    }

    fn rate_for_score(&self, _score: u32) -> Option<f32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn score_curve_steps_every_five_points() {
        let rules = rules_for(GameMode::Classic, SessionTuning::default());
        assert_eq!(rules.rate_for_score(0), Some(7.0));
        assert_eq!(rules.rate_for_score(4), Some(7.0));
        let rate = rules.rate_for_score(12).expect("classic follows score");
        assert!((rate - 8.2).abs() < 1e-4, "unexpected rate {rate}");
    }

    #[test]
    fn score_curve_is_capped() {
        let rules = rules_for(GameMode::Obstacles, SessionTuning::default());
        assert_eq!(rules.rate_for_score(10_000), Some(20.0));
    }

    #[test]
    fn obstacle_count_scales_with_area() {
        let rules = rules_for(GameMode::Obstacles, SessionTuning::default());
        assert!(rules.has_obstacles());
        assert_eq!(rules.obstacle_count(GridSize::new(21)), 22);
        assert_eq!(rules.obstacle_count(GridSize::new(13)), 8);
        let classic = rules_for(GameMode::Classic, SessionTuning::default());
        assert_eq!(classic.obstacle_count(GridSize::new(21)), 0);
    }

    #[test]
    fn survival_ramps_until_cap() {
        let rules = rules_for(GameMode::Survival, SessionTuning::default());
        let mut rate = RateState::new(7.0);
        rules.on_tick(&mut rate);
        assert!((rate.base - 7.02).abs() < 1e-4);
        for _ in 0..2_000 {
            rules.on_tick(&mut rate);
        }
        assert_eq!(rate.base, 20.0);
        assert_eq!(rules.rate_for_score(30), None);
    }

    #[test]
    fn neon_feast_food_effects_match_kinds() {
        let rules = rules_for(GameMode::NeonFeast, SessionTuning::default());
        let now = Duration::from_millis(1_000);

        let bonus = rules.food_effect(FoodKind::Bonus, now);
        assert_eq!(bonus.score_delta, 5);
        assert!(bonus.rate_override.is_none());

        let speed = rules.food_effect(FoodKind::Speed, now);
        let boost = speed.rate_override.expect("speed food grants an override");
        assert_eq!(boost.rate, 12.0);
        assert_eq!(boost.expires_at, Duration::from_millis(6_000));

        let slow = rules.food_effect(FoodKind::Slow, now);
        assert_eq!(slow.rate_override.map(|o| o.rate), Some(4.0));
        assert_eq!(rules.rate_for_score(8), None);
    }

    #[test]
    fn neon_feast_samples_every_kind() {
        let rules = rules_for(GameMode::NeonFeast, SessionTuning::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let _ = seen.insert(rules.spawn_kind(&mut rng));
        }
        assert_eq!(seen.len(), FoodKind::ALL.len());
    }

    #[test]
    fn override_expires_once_deadline_is_reached() {
        let rules = rules_for(GameMode::NeonFeast, SessionTuning::default());
        let mut rate = RateState::new(7.0);
        rate.active = rules
            .food_effect(FoodKind::Speed, Duration::ZERO)
            .rate_override;
        assert_eq!(rate.effective(), 12.0);

        assert_eq!(rules.expire_override(&mut rate, Duration::from_millis(4_999)), None);
        assert_eq!(
            rules.expire_override(&mut rate, Duration::from_millis(5_000)),
            Some(FoodKind::Speed)
        );
        assert_eq!(rate.effective(), 7.0);
    }
}
