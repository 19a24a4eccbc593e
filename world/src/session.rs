//! Single game session: snake body, food, obstacles and the per-tick algorithm.

use std::{
    collections::{BTreeSet, VecDeque},
    time::Duration,
};

use neon_snake_core::{
    Cell, CollisionKind, Event, Food, GameMode, GridSize, Heading, SessionStatus,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{
    rules::{rules_for, ModeRules, RateState},
    SessionTuning,
};

/// Random draws attempted before falling back to scanning free cells.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 256;

/// Cells directly ahead of the initial head that stay clear of obstacles.
const CLEAR_RUNWAY: i32 = 3;

#[derive(Debug)]
pub(crate) struct GameSession {
    grid_size: GridSize,
    rules: Box<dyn ModeRules>,
    snake: VecDeque<Cell>,
    heading: Heading,
    pending: Heading,
    food: Option<Food>,
    obstacles: BTreeSet<Cell>,
    score: u32,
    status: SessionStatus,
    started: bool,
    rate: RateState,
}

impl GameSession {
    pub(crate) fn new(
        grid_size: GridSize,
        mode: GameMode,
        tuning: SessionTuning,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let head = grid_size.center();
        let snake: VecDeque<Cell> = [head, Cell::new(head.x() - 1, head.y())]
            .into_iter()
            .collect();
        let mut session = Self {
            grid_size,
            rules: rules_for(mode, tuning),
            snake,
            heading: Heading::Right,
            pending: Heading::Right,
            food: None,
            obstacles: BTreeSet::new(),
            score: 0,
            status: SessionStatus::Idle,
            started: false,
            rate: RateState::new(tuning.base_rate),
        };
        session.place_obstacles(rng);
        session.food = session.spawn_food(rng);
        session
    }

    pub(crate) fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub(crate) fn mode(&self) -> GameMode {
        self.rules.mode()
    }

    pub(crate) fn snake(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.iter().copied()
    }

    pub(crate) fn heading(&self) -> Heading {
        self.heading
    }

    pub(crate) fn food(&self) -> Option<Food> {
        self.food
    }

    pub(crate) fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles.iter().copied()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn status(&self) -> SessionStatus {
        self.status
    }

    pub(crate) fn started(&self) -> bool {
        self.started
    }

    pub(crate) fn rate(&self) -> &RateState {
        &self.rate
    }

    /// Moves to `Running`, marking the session as started.
    pub(crate) fn run(&mut self, out_events: &mut Vec<Event>) {
        self.started = true;
        self.transition(SessionStatus::Running, out_events);
    }

    pub(crate) fn pause(&mut self, out_events: &mut Vec<Event>) {
        self.transition(SessionStatus::Paused, out_events);
    }

    fn transition(&mut self, to: SessionStatus, out_events: &mut Vec<Event>) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        out_events.push(Event::StatusChanged { from, to });
    }

    /// Stores `heading` as pending unless it reverses the current heading.
    pub(crate) fn request_heading(&mut self, heading: Heading, out_events: &mut Vec<Event>) {
        if self.status != SessionStatus::Running || heading.is_reverse_of(self.heading) {
            out_events.push(Event::HeadingRejected { heading });
            return;
        }
        self.pending = heading;
        out_events.push(Event::HeadingQueued { heading });
    }

    /// Advances the snake by one cell. Returns the score when it changed.
    pub(crate) fn tick(
        &mut self,
        now: Duration,
        rng: &mut ChaCha8Rng,
        out_events: &mut Vec<Event>,
    ) -> Option<u32> {
        if self.status != SessionStatus::Running {
            return None;
        }

        let rate_before = self.rate.effective();
        if let Some(source) = self.rules.expire_override(&mut self.rate, now) {
            out_events.push(Event::RateOverrideExpired { source });
        }
        self.rules.on_tick(&mut self.rate);
        self.report_rate_change(rate_before, out_events);

        if self.pending != self.heading && !self.pending.is_reverse_of(self.heading) {
            self.heading = self.pending;
            out_events.push(Event::HeadingChanged {
                heading: self.heading,
            });
        }

        let Some(head) = self.snake.front().copied() else {
            return None;
        };
        let candidate = head.step(self.heading);

        if let Some(cause) = self.collision_at(candidate) {
            tracing::info!(?cause, score = self.score, "snake crashed");
            self.transition(SessionStatus::GameOver, out_events);
            out_events.push(Event::GameOver {
                cause,
                at: candidate,
                score: self.score,
            });
            out_events.push(Event::TimeAdvanced { now });
            return None;
        }

        self.snake.push_front(candidate);

        let eaten = self.food.filter(|food| food.cell == candidate);
        let vacated = if eaten.is_some() {
            None
        } else {
            self.snake.pop_back()
        };
        out_events.push(Event::SnakeAdvanced {
            head: candidate,
            vacated,
        });

        let mut score_changed = None;
        if let Some(food) = eaten {
            let rate_before = self.rate.effective();
            let effect = self.rules.food_effect(food.kind, now);
            self.score = self.score.saturating_add(effect.score_delta);
            out_events.push(Event::FoodEaten {
                cell: food.cell,
                kind: food.kind,
                score_delta: effect.score_delta,
            });
            out_events.push(Event::ScoreChanged { score: self.score });
            score_changed = Some(self.score);

            if let Some(base) = self.rules.rate_for_score(self.score) {
                self.rate.base = base;
            }
            if let Some(rate_override) = effect.rate_override {
                self.rate.active = Some(rate_override);
                out_events.push(Event::RateOverrideStarted { rate_override });
            }
            self.report_rate_change(rate_before, out_events);

            self.food = self.spawn_food(rng);
            if let Some(food) = self.food {
                out_events.push(Event::FoodSpawned { food });
            }
        }

        out_events.push(Event::TimeAdvanced { now });
        score_changed
    }

    fn report_rate_change(&self, before: f32, out_events: &mut Vec<Event>) {
        let rate = self.rate.effective();
        if (rate - before).abs() > f32::EPSILON {
            out_events.push(Event::TickRateChanged { rate });
        }
    }

    fn collision_at(&self, candidate: Cell) -> Option<CollisionKind> {
        if !self.grid_size.contains(candidate) {
            Some(CollisionKind::Wall)
        } else if self.snake.contains(&candidate) {
            Some(CollisionKind::SelfHit)
        } else if self.rules.has_obstacles() && self.obstacles.contains(&candidate) {
            Some(CollisionKind::Obstacle)
        } else {
            None
        }
    }

    fn is_free(&self, cell: Cell) -> bool {
        !self.snake.contains(&cell) && !self.obstacles.contains(&cell)
    }

    fn place_obstacles(&mut self, rng: &mut ChaCha8Rng) {
        let count = self.rules.obstacle_count(self.grid_size);
        if count == 0 {
            return;
        }

        let head = self.grid_size.center();
        let runway: Vec<Cell> = (1..=CLEAR_RUNWAY)
            .map(|offset| Cell::new(head.x() + offset, head.y()))
            .collect();
        let edge = self.grid_size.edge();
        let attempts = count.saturating_mul(RANDOM_PLACEMENT_ATTEMPTS);

        for _ in 0..attempts {
            if self.obstacles.len() >= count {
                break;
            }
            let cell = Cell::new(rng.gen_range(0..edge), rng.gen_range(0..edge));
            if self.snake.contains(&cell) || runway.contains(&cell) {
                continue;
            }
            let _ = self.obstacles.insert(cell);
        }

        tracing::debug!(
            requested = count,
            placed = self.obstacles.len(),
            "obstacles placed"
        );
    }

    fn spawn_food(&self, rng: &mut ChaCha8Rng) -> Option<Food> {
        let edge = self.grid_size.edge();
        let kind = self.rules.spawn_kind(rng);

        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let cell = Cell::new(rng.gen_range(0..edge), rng.gen_range(0..edge));
            if self.is_free(cell) {
                return Some(Food::new(cell, kind));
            }
        }

        let free: Vec<Cell> = (0..edge)
            .flat_map(|y| (0..edge).map(move |x| Cell::new(x, y)))
            .filter(|cell| self.is_free(*cell))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(Food::new(free[rng.gen_range(0..free.len())], kind))
    }

    #[cfg(test)]
    pub(crate) fn arrange(
        &mut self,
        snake: &[Cell],
        heading: Heading,
        food: Option<Food>,
        obstacles: &[Cell],
    ) {
        self.snake = snake.iter().copied().collect();
        self.heading = heading;
        self.pending = heading;
        self.food = food;
        self.obstacles = obstacles.iter().copied().collect();
    }
}
