#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Neon Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches or
//! presentation data.

use std::{error::Error, fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Smallest grid edge the world accepts; smaller requests are clamped.
pub const MIN_GRID_SIZE: u32 = 5;

/// Largest grid edge the world accepts; larger requests are clamped.
pub const MAX_GRID_SIZE: u32 = 64;

/// Grid edge used when no viewport information is available.
pub const DEFAULT_GRID_SIZE: u32 = 21;

/// Selectable rule sets that shape food, speed and obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Single food type, score-linked speed curve, open board.
    #[default]
    #[serde(rename = "classic")]
    Classic,
    /// Classic rules plus fatal obstacle cells placed at session start.
    #[serde(rename = "obstacles")]
    Obstacles,
    /// Speed ramps every tick regardless of score.
    #[serde(rename = "survival")]
    Survival,
    /// Four food types with timed speed boosts and penalties.
    #[serde(rename = "neonFeast")]
    NeonFeast,
}

impl GameMode {
    /// Every selectable mode in menu order.
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Obstacles,
        GameMode::Survival,
        GameMode::NeonFeast,
    ];

    /// Stable identifier used for persistence and command-line parsing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Obstacles => "obstacles",
            Self::Survival => "survival",
            Self::NeonFeast => "neonFeast",
        }
    }

    /// Human readable name shown in the HUD.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Obstacles => "Obstacles",
            Self::Survival => "Survival",
            Self::NeonFeast => "Neon Feast",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseModeError(trimmed.to_owned()))
    }
}

/// Error returned when a mode identifier is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown game mode '{}' (expected classic, obstacles, survival or neonFeast)",
            self.0
        )
    }
}

impl Error for ParseModeError {}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Heading {
    /// Unit vector `(dx, dy)` travelled by one step in this heading.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Heading pointing the exact opposite way.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether turning from `self` to `other` would be a 180° turn.
    #[must_use]
    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.reverse() == other
    }
}

/// Location of a single grid cell.
///
/// Coordinates are signed so a candidate head one step past the border can be
/// represented and rejected by the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell reached by one step in the provided heading.
    #[must_use]
    pub const fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Edge length of the square play grid measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a grid size, clamping to [`MIN_GRID_SIZE`]`..=`[`MAX_GRID_SIZE`].
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value < MIN_GRID_SIZE {
            Self(MIN_GRID_SIZE)
        } else if value > MAX_GRID_SIZE {
            Self(MAX_GRID_SIZE)
        } else {
            Self(value)
        }
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Number of cells along each edge as a signed coordinate bound.
    #[must_use]
    pub fn edge(&self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.0 * self.0
    }

    /// Reports whether the cell lies within `[0, size)` on both axes.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let bound = i64::from(self.0);
        (0..bound).contains(&i64::from(cell.x())) && (0..bound).contains(&i64::from(cell.y()))
    }

    /// Central cell, where new snakes are spawned.
    #[must_use]
    pub fn center(&self) -> Cell {
        let middle = self.edge() / 2;
        Cell::new(middle, middle)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// Types of food that can appear on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Ordinary food worth a single point.
    Normal,
    /// Worth a point and temporarily speeds the snake up.
    Speed,
    /// Worth a point and temporarily slows the snake down.
    Slow,
    /// Worth five points.
    Bonus,
}

impl FoodKind {
    /// Every food kind, used for uniform sampling.
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Normal,
        FoodKind::Speed,
        FoodKind::Slow,
        FoodKind::Bonus,
    ];
}

/// Food item resting on a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Food {
    /// Cell the food occupies.
    pub cell: Cell,
    /// Kind of the food, controlling its effect when eaten.
    pub kind: FoodKind,
}

impl Food {
    /// Creates a new food descriptor.
    #[must_use]
    pub const fn new(cell: Cell, kind: FoodKind) -> Self {
        Self { cell, kind }
    }
}

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Freshly created, waiting for the player to start.
    Idle,
    /// Ticks advance the snake.
    Running,
    /// Started but frozen until resumed.
    Paused,
    /// Terminal until a restart builds a new session.
    GameOver,
}

impl SessionStatus {
    /// Whether the snake is still alive in this status.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::GameOver)
    }

    /// Whether simulation ticks are currently produced.
    #[must_use]
    pub const fn is_ticking(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Obstruction that ended a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// The head left the grid.
    Wall,
    /// The head ran into the snake's own body.
    SelfHit,
    /// The head entered an obstacle cell.
    Obstacle,
}

/// Temporary tick-rate override granted by special food.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateOverride {
    /// Food kind that triggered the override.
    pub source: FoodKind,
    /// Ticks per second while the override is active.
    pub rate: f32,
    /// Session timestamp at which the override lapses.
    pub expires_at: Duration,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts the idle session, resumes a paused one, or replaces a finished one.
    Start,
    /// Toggles between running and paused for a started session.
    TogglePause,
    /// Discards the current session and starts a fresh one immediately.
    Restart,
    /// Queues a heading to adopt on the next tick.
    RequestHeading {
        /// Heading requested by the player.
        heading: Heading,
    },
    /// Rebuilds the session on a grid of the provided size while not playing.
    ResizeGrid {
        /// Requested number of cells along each edge.
        size: GridSize,
    },
    /// Chooses the rule set used by the next session.
    SelectMode {
        /// Mode the player selected.
        mode: GameMode,
    },
    /// Supplies the persisted best score at boot.
    SeedBestScore {
        /// Best score recovered from storage.
        best: u32,
    },
    /// Advances the simulation by exactly one step.
    Tick {
        /// Timestamp of the frame that produced the tick.
        now: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new session replaced the previous one.
    SessionCreated {
        /// Rule set governing the session.
        mode: GameMode,
        /// Grid dimensions of the session.
        grid_size: GridSize,
    },
    /// The session changed lifecycle state.
    StatusChanged {
        /// Status before the transition.
        from: SessionStatus,
        /// Status after the transition.
        to: SessionStatus,
    },
    /// A heading request was accepted as the pending heading.
    HeadingQueued {
        /// Heading that will be adopted on the next tick.
        heading: Heading,
    },
    /// A heading request was refused.
    HeadingRejected {
        /// Heading that was refused.
        heading: Heading,
    },
    /// The snake adopted a new heading during a tick.
    HeadingChanged {
        /// Heading the snake now travels in.
        heading: Heading,
    },
    /// The snake advanced a single cell.
    SnakeAdvanced {
        /// Cell now occupied by the head.
        head: Cell,
        /// Tail cell released by the move, absent when the snake grew.
        vacated: Option<Cell>,
    },
    /// The snake consumed a food item.
    FoodEaten {
        /// Cell where the food was eaten.
        cell: Cell,
        /// Kind of food consumed.
        kind: FoodKind,
        /// Points awarded for the food.
        score_delta: u32,
    },
    /// A new food item appeared.
    FoodSpawned {
        /// Food that was placed.
        food: Food,
    },
    /// The session score changed.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// The all-time best score increased.
    BestScoreRaised {
        /// New best score.
        best: u32,
    },
    /// The tick rate changed.
    TickRateChanged {
        /// Ticks per second after the change.
        rate: f32,
    },
    /// Special food granted a temporary tick-rate override.
    RateOverrideStarted {
        /// Override now in effect.
        rate_override: RateOverride,
    },
    /// A temporary tick-rate override lapsed.
    RateOverrideExpired {
        /// Food kind that had triggered the override.
        source: FoodKind,
    },
    /// A collision ended the session.
    GameOver {
        /// Obstruction the head ran into.
        cause: CollisionKind,
        /// Cell the head attempted to enter.
        at: Cell,
        /// Final score of the session.
        score: u32,
    },
    /// A resize request arrived while the session was being played.
    GridResizeRejected {
        /// Size that was requested.
        requested: GridSize,
    },
    /// The player chose the mode for upcoming sessions.
    ModeSelected {
        /// Mode that will be used.
        mode: GameMode,
    },
    /// A simulation tick completed.
    TimeAdvanced {
        /// Timestamp carried by the tick.
        now: Duration,
    },
}

/// Read-only snapshot of the active session used by renderers and systems.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// Grid dimensions of the session.
    pub grid_size: GridSize,
    /// Rule set governing the session.
    pub mode: GameMode,
    /// Snake cells, head first.
    pub snake: Vec<Cell>,
    /// Heading the snake currently travels in.
    pub heading: Heading,
    /// Food currently on the board, absent only when the snake fills every free cell.
    pub food: Option<Food>,
    /// Obstacle cells in ascending order.
    pub obstacles: Vec<Cell>,
    /// Score of the session.
    pub score: u32,
    /// All-time best score.
    pub best: u32,
    /// Lifecycle state of the session.
    pub status: SessionStatus,
    /// Whether the player has started this session.
    pub started: bool,
    /// Ticks per second currently in effect.
    pub tick_rate: f32,
    /// Temporary override in effect, if any.
    pub rate_override: Option<RateOverride>,
}

impl SessionSnapshot {
    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

/// Keys the input adapter understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// `W`, alternate up.
    W,
    /// `A`, alternate left.
    A,
    /// `S`, alternate down.
    S,
    /// `D`, alternate right.
    D,
    /// Space bar, pause toggle.
    Space,
    /// Enter, start.
    Enter,
    /// `R`, restart.
    R,
}

/// Phase of a touch contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger touched the surface.
    Started,
    /// A finger left the surface.
    Ended,
}

/// Single touch observation in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    /// Whether the contact began or ended.
    pub phase: TouchPhase,
    /// Horizontal screen position in pixels.
    pub x: f32,
    /// Vertical screen position in pixels.
    pub y: f32,
    /// Frame timestamp at which the sample was observed.
    pub at: Duration,
}

/// Fading mark left behind by the snake's tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailMark {
    /// Cell that was vacated.
    pub cell: Cell,
    /// Timestamp at which the mark was left.
    pub born_at: Duration,
}

/// Death particle emitted at the point of collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Starting position in cell units.
    pub origin: (f32, f32),
    /// Velocity in cells per second.
    pub velocity: (f32, f32),
    /// Timestamp at which the particle was emitted.
    pub born_at: Duration,
}

/// Short text that floats up from where something happened.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingLabel {
    /// Cell the label rises from.
    pub cell: Cell,
    /// Text to display, for example `+5`.
    pub text: String,
    /// Food kind associated with the label, used for colouring.
    pub kind: FoodKind,
    /// Timestamp at which the label appeared.
    pub born_at: Duration,
}

/// Read-only view of transient effects consumed by renderers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectsView {
    /// Trail marks, oldest first.
    pub trail: Vec<TrailMark>,
    /// Death particles.
    pub particles: Vec<Particle>,
    /// Floating labels, oldest first.
    pub labels: Vec<FloatingLabel>,
    /// Lifetime of a trail mark.
    pub trail_lifetime: Duration,
    /// Lifetime of a particle.
    pub particle_lifetime: Duration,
    /// Lifetime of a label.
    pub label_lifetime: Duration,
}

#[cfg(test)]
mod tests {
    use super::{Cell, GameMode, GridSize, Heading, MAX_GRID_SIZE, MIN_GRID_SIZE};
    use serde::{Deserialize, Serialize};

    #[test]
    fn reverse_heading_is_detected_for_every_axis() {
        assert!(Heading::Up.is_reverse_of(Heading::Down));
        assert!(Heading::Left.is_reverse_of(Heading::Right));
        assert!(!Heading::Up.is_reverse_of(Heading::Left));
        assert!(!Heading::Right.is_reverse_of(Heading::Right));
    }

    #[test]
    fn stepping_follows_unit_vectors() {
        let origin = Cell::new(10, 10);
        assert_eq!(origin.step(Heading::Right), Cell::new(11, 10));
        assert_eq!(origin.step(Heading::Up), Cell::new(10, 9));
        assert_eq!(Cell::new(0, 3).step(Heading::Left), Cell::new(-1, 3));
    }

    #[test]
    fn grid_contains_rejects_cells_past_the_border() {
        let grid = GridSize::new(21);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(20, 20)));
        assert!(!grid.contains(Cell::new(21, 10)));
        assert!(!grid.contains(Cell::new(-1, 10)));
    }

    #[test]
    fn grid_size_is_clamped_to_minimum() {
        assert_eq!(GridSize::new(1).get(), MIN_GRID_SIZE);
        assert_eq!(GridSize::new(13).center(), Cell::new(6, 6));
    }

    #[test]
    fn grid_size_is_clamped_to_maximum() {
        let grid = GridSize::new(70_000);
        assert_eq!(grid.get(), MAX_GRID_SIZE);
        assert_eq!(grid.cell_count(), MAX_GRID_SIZE * MAX_GRID_SIZE);
        assert_eq!(GridSize::new(u32::MAX).edge(), 64);
        assert_eq!(grid.center(), Cell::new(32, 32));
    }

    #[test]
    fn mode_identifiers_parse_case_insensitively() {
        assert_eq!("neonfeast".parse::<GameMode>(), Ok(GameMode::NeonFeast));
        assert_eq!(" Survival ".parse::<GameMode>(), Ok(GameMode::Survival));
        assert!("arcade".parse::<GameMode>().is_err());
    }

    #[derive(Serialize, Deserialize)]
    struct ModeRecord {
        mode: GameMode,
    }

    #[test]
    fn mode_serializes_with_stable_identifier() {
        let encoded = toml::to_string(&ModeRecord {
            mode: GameMode::NeonFeast,
        })
        .expect("serialize");
        assert_eq!(encoded.trim(), "mode = \"neonFeast\"");

        let decoded: ModeRecord = toml::from_str("mode = \"obstacles\"").expect("deserialize");
        assert_eq!(decoded.mode, GameMode::Obstacles);
    }
}
