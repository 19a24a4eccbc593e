#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Neon Snake adapters.
//!
//! [`render`] turns a session snapshot and the live effects into a [`Scene`]
//! expressed in cell units. Backends only scale and draw; they never look at
//! the world directly.

use anyhow::Result as AnyResult;
use glam::Vec2;
use neon_snake_core::{
    EffectsView, FoodKind, Heading, Key, SessionSnapshot, SessionStatus, TouchSample,
};
use std::{error::Error, f32::consts::TAU, fmt, time::Duration};

/// Period of the food pulse animation.
pub const FOOD_PULSE_PERIOD: Duration = Duration::from_millis(900);

/// Corner radius of food tiles as a fraction of a cell.
pub const FOOD_CORNER_RADIUS: f32 = 0.25;

/// Corner radius of snake and obstacle tiles as a fraction of a cell.
pub const SNAKE_CORNER_RADIUS: f32 = 0.2;

const EYE_OFFSET: f32 = 0.18;
const EYE_RADIUS: f32 = 0.09;
const PARTICLE_RADIUS: f32 = 0.12;
const LABEL_RISE: f32 = 0.9;
const TRAIL_ALPHA: f32 = 0.35;
const INDICATOR_RADIUS: f32 = 0.35;
const INDICATOR_SWEEP: f32 = TAU / 6.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha scaled by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        Self {
            alpha: self.alpha * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used for every scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Frame background.
    pub background: Color,
    /// Grid lines.
    pub grid_line: Color,
    /// Snake body segments.
    pub snake_body: Color,
    /// Snake head.
    pub snake_head: Color,
    /// Head eyes.
    pub eye: Color,
    /// Direction indicator arc.
    pub indicator: Color,
    /// Obstacle tiles.
    pub obstacle: Color,
    /// Ordinary food.
    pub food_normal: Color,
    /// Speed food.
    pub food_speed: Color,
    /// Slow food.
    pub food_slow: Color,
    /// Bonus food.
    pub food_bonus: Color,
    /// Death particles.
    pub particle: Color,
    /// HUD and overlay text.
    pub text: Color,
}

impl Palette {
    /// Default neon palette.
    #[must_use]
    pub const fn neon() -> Self {
        Self {
            background: Color::from_rgb_u8(0x19, 0x1d, 0x3a),
            grid_line: Color::from_rgb_u8(0x25, 0x2a, 0x52),
            snake_body: Color::from_rgb_u8(0x29, 0xf1, 0x9c),
            snake_head: Color::from_rgb_u8(0x6a, 0xa8, 0xff),
            eye: Color::from_rgb_u8(0x0b, 0x0d, 0x1a),
            indicator: Color::new(0.42, 0.66, 1.0, 0.6),
            obstacle: Color::from_rgb_u8(0x8a, 0x4b, 0xff),
            food_normal: Color::from_rgb_u8(0xff, 0xcf, 0x6b),
            food_speed: Color::from_rgb_u8(0xff, 0x5c, 0x8a),
            food_slow: Color::from_rgb_u8(0x5c, 0xd6, 0xff),
            food_bonus: Color::from_rgb_u8(0xf4, 0x7b, 0xff),
            particle: Color::from_rgb_u8(0xff, 0x7a, 0x59),
            text: Color::from_rgb_u8(0xe8, 0xec, 0xff),
        }
    }

    /// Fill color of the provided food kind.
    #[must_use]
    pub const fn food(&self, kind: FoodKind) -> Color {
        match kind {
            FoodKind::Normal => self.food_normal,
            FoodKind::Speed => self.food_speed,
            FoodKind::Slow => self.food_slow,
            FoodKind::Bonus => self.food_bonus,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::neon()
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Keys pressed during this frame, in arrival order.
    pub keys: Vec<Key>,
    /// On-screen D-pad buttons pressed during this frame.
    pub dpad: Vec<Heading>,
    /// Touch starts and ends observed during this frame.
    pub touches: Vec<TouchSample>,
    /// Current viewport size in pixels.
    pub viewport: Vec2,
}

/// Axis-aligned grid line in cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    /// Start of the line.
    pub from: Vec2,
    /// End of the line.
    pub to: Vec2,
}

/// Rounded square occupying one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Top-left corner in cell units.
    pub origin: Vec2,
    /// Edge length in cell units.
    pub size: f32,
    /// Corner radius in cell units.
    pub corner_radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Center in cell units.
    pub center: Vec2,
    /// Radius in cell units.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Pulsing food item with a glow halo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPresentation {
    /// Scaled food tile.
    pub tile: Tile,
    /// Halo drawn behind the tile.
    pub glow: Dot,
}

/// Arc hinting at the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    /// Center of the arc in cell units.
    pub center: Vec2,
    /// Radius of the arc in cell units.
    pub radius: f32,
    /// Angle at the middle of the arc, in radians, with `y` growing downwards.
    pub facing: f32,
    /// Total angular width of the arc in radians.
    pub sweep: f32,
    /// Stroke color.
    pub color: Color,
}

/// Text anchored in cell space.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Anchor position in cell units.
    pub position: Vec2,
    /// Text to draw.
    pub text: String,
    /// Text color.
    pub color: Color,
}

/// Heads-up display drawn above the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Current score.
    pub score: String,
    /// Best score.
    pub best: String,
    /// Current tick rate.
    pub rate: String,
    /// Active mode.
    pub mode: String,
    /// Centered overlay text, if the overlay is shown.
    pub overlay: Option<String>,
    /// Text color.
    pub color: Color,
}

/// Complete description of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of cells along each edge.
    pub grid_size: u32,
    /// Background fill.
    pub background: Color,
    /// Grid line color.
    pub line_color: Color,
    /// Interior grid lines.
    pub grid_lines: Vec<GridLine>,
    /// Fading marks left by the tail.
    pub trail: Vec<Tile>,
    /// Obstacle tiles.
    pub obstacles: Vec<Tile>,
    /// Food on the board, if any.
    pub food: Option<FoodPresentation>,
    /// Snake tiles from tail to head.
    pub snake: Vec<Tile>,
    /// Head eyes.
    pub eyes: Vec<Dot>,
    /// Direction hint ahead of the head.
    pub indicator: Option<Indicator>,
    /// Death particles.
    pub particles: Vec<Dot>,
    /// Floating labels.
    pub labels: Vec<Label>,
    /// Heads-up display.
    pub hud: Hud,
}

impl Scene {
    /// Empty scene for a grid of the provided size.
    #[must_use]
    pub fn empty(grid_size: u32, palette: &Palette) -> Self {
        Self {
            grid_size,
            background: palette.background,
            line_color: palette.grid_line,
            grid_lines: grid_lines(grid_size),
            trail: Vec::new(),
            obstacles: Vec::new(),
            food: None,
            snake: Vec::new(),
            eyes: Vec::new(),
            indicator: None,
            particles: Vec::new(),
            labels: Vec::new(),
            hud: Hud {
                score: String::new(),
                best: String::new(),
                rate: String::new(),
                mode: String::new(),
                overlay: None,
                color: palette.text,
            },
        }
    }
}

/// Text shown over the board for the provided status.
#[must_use]
pub fn overlay_text(status: SessionStatus, score: u32) -> Option<String> {
    match status {
        SessionStatus::Idle => Some("Press Enter to Play".to_owned()),
        SessionStatus::Paused => Some("Paused".to_owned()),
        SessionStatus::GameOver => Some(format!("Game Over — Score {score}")),
        SessionStatus::Running => None,
    }
}

/// Scale factor of the food tile at `now`, oscillating within `0.7..=1.0`.
#[must_use]
pub fn food_pulse(now: Duration) -> f32 {
    let phase = now.as_secs_f32() / FOOD_PULSE_PERIOD.as_secs_f32();
    0.85 + 0.15 * (TAU * phase).sin()
}

/// Builds the scene for a snapshot.
///
/// The result depends only on the arguments, so equal inputs always produce
/// equal scenes.
#[must_use]
pub fn render(
    snapshot: &SessionSnapshot,
    effects: &EffectsView,
    palette: &Palette,
    now: Duration,
) -> Scene {
    let mut scene = Scene::empty(snapshot.grid_size.get(), palette);

    scene.trail = effects
        .trail
        .iter()
        .map(|mark| {
            let remaining = 1.0 - progress(now, mark.born_at, effects.trail_lifetime);
            cell_tile(
                mark.cell.x(),
                mark.cell.y(),
                palette.snake_body.fade(TRAIL_ALPHA * remaining),
            )
        })
        .collect();

    scene.obstacles = snapshot
        .obstacles
        .iter()
        .map(|cell| cell_tile(cell.x(), cell.y(), palette.obstacle))
        .collect();

    scene.food = snapshot.food.map(|food| {
        let pulse = food_pulse(now);
        let center = cell_center(food.cell.x(), food.cell.y());
        let color = palette.food(food.kind);
        FoodPresentation {
            tile: Tile {
                origin: center - Vec2::splat(pulse / 2.0),
                size: pulse,
                corner_radius: FOOD_CORNER_RADIUS * pulse,
                color,
            },
            glow: Dot {
                center,
                radius: 0.5 + 0.25 * pulse,
                color: color.fade(0.25),
            },
        }
    });

    let length = snapshot.snake.len();
    scene.snake = snapshot
        .snake
        .iter()
        .enumerate()
        .rev()
        .map(|(index, cell)| {
            let color = if index == 0 {
                palette.snake_head
            } else {
                let depth = index as f32 / length.max(1) as f32;
                palette.snake_body.lighten(0.2 * (1.0 - depth))
            };
            Tile {
                corner_radius: SNAKE_CORNER_RADIUS,
                ..cell_tile(cell.x(), cell.y(), color)
            }
        })
        .collect();

    if let Some(head) = snapshot.head() {
        let center = cell_center(head.x(), head.y());
        let (dx, dy) = snapshot.heading.delta();
        let forward = Vec2::new(dx as f32, dy as f32);
        let side = forward.perp();
        scene.eyes = [1.0, -1.0]
            .into_iter()
            .map(|sign| Dot {
                center: center + forward * EYE_OFFSET + side * (EYE_OFFSET / 2.0) * sign,
                radius: EYE_RADIUS,
                color: palette.eye,
            })
            .collect();

        if snapshot.status != SessionStatus::GameOver {
            scene.indicator = Some(Indicator {
                center: center + forward,
                radius: INDICATOR_RADIUS,
                facing: forward.y.atan2(forward.x),
                sweep: INDICATOR_SWEEP,
                color: palette.indicator,
            });
        }
    }

    scene.particles = effects
        .particles
        .iter()
        .map(|particle| {
            let age = now.saturating_sub(particle.born_at).as_secs_f32();
            let t = progress(now, particle.born_at, effects.particle_lifetime);
            let origin = Vec2::new(particle.origin.0, particle.origin.1);
            let velocity = Vec2::new(particle.velocity.0, particle.velocity.1);
            Dot {
                center: origin + velocity * age,
                radius: PARTICLE_RADIUS * (1.0 - 0.5 * t),
                color: palette.particle.fade(1.0 - t),
            }
        })
        .collect();

    scene.labels = effects
        .labels
        .iter()
        .map(|label| {
            let t = progress(now, label.born_at, effects.label_lifetime);
            Label {
                position: cell_center(label.cell.x(), label.cell.y())
                    - Vec2::new(0.0, LABEL_RISE * t),
                text: label.text.clone(),
                color: palette.food(label.kind).lighten(0.3).fade(1.0 - t),
            }
        })
        .collect();

    scene.hud = Hud {
        score: format!("Score {}", snapshot.score),
        best: format!("Best {}", snapshot.best),
        rate: format!("{:.1} moves/s", snapshot.tick_rate),
        mode: snapshot.mode.title().to_owned(),
        overlay: overlay_text(snapshot.status, snapshot.score),
        color: palette.text,
    };

    scene
}

fn grid_lines(grid_size: u32) -> Vec<GridLine> {
    let edge = grid_size as f32;
    (1..grid_size)
        .flat_map(|index| {
            let offset = index as f32;
            [
                GridLine {
                    from: Vec2::new(offset, 0.0),
                    to: Vec2::new(offset, edge),
                },
                GridLine {
                    from: Vec2::new(0.0, offset),
                    to: Vec2::new(edge, offset),
                },
            ]
        })
        .collect()
}

fn cell_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

fn cell_tile(x: i32, y: i32, color: Color) -> Tile {
    Tile {
        origin: Vec2::new(x as f32, y as f32),
        size: 1.0,
        corner_radius: SNAKE_CORNER_RADIUS,
        color,
    }
}

fn progress(now: Duration, born_at: Duration, lifetime: Duration) -> f32 {
    if lifetime.is_zero() {
        return 1.0;
    }
    (now.saturating_sub(born_at).as_secs_f32() / lifetime.as_secs_f32()).clamp(0.0, 1.0)
}

/// Pixel placement of the board, HUD and optional D-pad within a viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    /// Top-left corner of the board in pixels.
    pub origin: Vec2,
    /// Edge length of a single cell in pixels.
    pub cell_length: f32,
    /// Height of the HUD strip in pixels.
    pub hud_height: f32,
    /// On-screen D-pad buttons, empty when the D-pad is hidden.
    pub dpad: Vec<DpadButton>,
}

/// Circular on-screen direction button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DpadButton {
    /// Heading requested by the button.
    pub heading: Heading,
    /// Center of the button in pixels.
    pub center: Vec2,
    /// Radius of the button in pixels.
    pub radius: f32,
}

impl SceneLayout {
    /// Height of the HUD strip.
    pub const HUD_HEIGHT: f32 = 48.0;

    /// Gap kept around the board.
    pub const MARGIN: f32 = 12.0;

    /// Height reserved for the D-pad when shown.
    pub const DPAD_HEIGHT: f32 = 180.0;

    /// Fits a square board of `grid_size` cells into the viewport.
    pub fn fit(
        viewport: Vec2,
        grid_size: u32,
        show_dpad: bool,
    ) -> std::result::Result<Self, RenderingError> {
        if grid_size == 0 {
            return Err(RenderingError::EmptyGrid);
        }
        let dpad_height = if show_dpad { Self::DPAD_HEIGHT } else { 0.0 };
        let available = Vec2::new(
            viewport.x - 2.0 * Self::MARGIN,
            viewport.y - Self::HUD_HEIGHT - dpad_height - 2.0 * Self::MARGIN,
        );
        let side = available.min_element();
        if !side.is_finite() || side <= 0.0 {
            return Err(RenderingError::DegenerateViewport {
                width: viewport.x,
                height: viewport.y,
            });
        }

        let cell_length = side / grid_size as f32;
        let board = cell_length * grid_size as f32;
        let origin = Vec2::new(
            (viewport.x - board) / 2.0,
            Self::HUD_HEIGHT + Self::MARGIN,
        );

        let dpad = if show_dpad {
            let radius = Self::DPAD_HEIGHT / 6.0;
            let center = Vec2::new(
                viewport.x / 2.0,
                origin.y + board + Self::MARGIN + Self::DPAD_HEIGHT / 2.0,
            );
            [Heading::Up, Heading::Down, Heading::Left, Heading::Right]
                .into_iter()
                .map(|heading| {
                    let (dx, dy) = heading.delta();
                    DpadButton {
                        heading,
                        center: center + Vec2::new(dx as f32, dy as f32) * 2.0 * radius,
                        radius,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            origin,
            cell_length,
            hud_height: Self::HUD_HEIGHT,
            dpad,
        })
    }

    /// Converts a point in cell units into pixels.
    #[must_use]
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.origin + point * self.cell_length
    }

    /// D-pad button under the provided pixel position, if any.
    #[must_use]
    pub fn dpad_hit(&self, point: Vec2) -> Option<Heading> {
        self.dpad
            .iter()
            .find(|button| button.center.distance(point) <= button.radius)
            .map(|button| button.heading)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Whether the on-screen D-pad is shown.
    pub show_dpad: bool,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, show_dpad: bool, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            show_dpad,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Neon Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the time elapsed since the
    /// backend started, per-frame input captured by the adapter, and replaces
    /// the scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The grid must contain at least one cell.
    EmptyGrid,
    /// The viewport leaves no room for the board.
    DegenerateViewport {
        /// Viewport width in pixels.
        width: f32,
        /// Viewport height in pixels.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must contain at least one cell"),
            Self::DegenerateViewport { width, height } => {
                write!(f, "viewport {width}x{height} leaves no room for the board")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_snake_core::{Cell, Food, GameMode, GridSize};

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            grid_size: GridSize::new(21),
            mode: GameMode::Classic,
            snake: vec![Cell::new(10, 10), Cell::new(9, 10)],
            heading: Heading::Right,
            food: Some(Food::new(Cell::new(3, 4), FoodKind::Normal)),
            obstacles: Vec::new(),
            score: 0,
            best: 0,
            status: SessionStatus::Running,
            started: true,
            tick_rate: 7.0,
            rate_override: None,
        }
    }

    #[test]
    fn grid_lines_cover_interior_only() {
        let scene = Scene::empty(21, &Palette::neon());
        assert_eq!(scene.grid_lines.len(), 40);
        assert!(scene
            .grid_lines
            .iter()
            .all(|line| line.from.x > 0.0 || line.from.y > 0.0));
    }

    #[test]
    fn snake_is_drawn_tail_first_with_distinct_head() {
        let palette = Palette::neon();
        let scene = render(&snapshot(), &EffectsView::default(), &palette, Duration::ZERO);

        assert_eq!(scene.snake.len(), 2);
        let head = scene.snake.last().expect("head tile");
        assert_eq!(head.origin, Vec2::new(10.0, 10.0));
        assert_eq!(head.color, palette.snake_head);
        assert_eq!(head.corner_radius, SNAKE_CORNER_RADIUS);
        assert_ne!(scene.snake[0].color, palette.snake_head);
    }

    #[test]
    fn eyes_sit_ahead_of_the_head_center() {
        let scene = render(
            &snapshot(),
            &EffectsView::default(),
            &Palette::neon(),
            Duration::ZERO,
        );

        assert_eq!(scene.eyes.len(), 2);
        for eye in &scene.eyes {
            assert!((eye.center.x - 10.68).abs() < 1e-5);
            assert!(((eye.center.y - 10.5).abs() - 0.09).abs() < 1e-5);
            assert_eq!(eye.radius, 0.09);
        }
    }

    #[test]
    fn food_pulses_between_bounds() {
        assert!((food_pulse(Duration::ZERO) - 0.85).abs() < 1e-6);
        assert!((food_pulse(Duration::from_millis(225)) - 1.0).abs() < 1e-4);
        assert!((food_pulse(Duration::from_millis(675)) - 0.7).abs() < 1e-4);
    }

    #[test]
    fn overlay_follows_status() {
        assert_eq!(
            overlay_text(SessionStatus::Idle, 0).as_deref(),
            Some("Press Enter to Play")
        );
        assert_eq!(overlay_text(SessionStatus::Paused, 3).as_deref(), Some("Paused"));
        assert_eq!(
            overlay_text(SessionStatus::GameOver, 12).as_deref(),
            Some("Game Over — Score 12")
        );
        assert_eq!(overlay_text(SessionStatus::Running, 12), None);
    }

    #[test]
    fn render_is_idempotent() {
        let palette = Palette::neon();
        let now = Duration::from_millis(1_337);
        let first = render(&snapshot(), &EffectsView::default(), &palette, now);
        let second = render(&snapshot(), &EffectsView::default(), &palette, now);
        assert_eq!(first, second);
    }

    #[test]
    fn layout_rejects_degenerate_viewports() {
        let error = SceneLayout::fit(Vec2::new(20.0, 20.0), 21, false)
            .expect_err("viewport too small for the board");
        assert!(matches!(error, RenderingError::DegenerateViewport { .. }));
        assert_eq!(
            SceneLayout::fit(Vec2::new(800.0, 600.0), 0, false),
            Err(RenderingError::EmptyGrid)
        );
    }

    #[test]
    fn layout_places_dpad_below_the_board() {
        let layout = SceneLayout::fit(Vec2::new(390.0, 844.0), 13, true).expect("fits");
        assert_eq!(layout.cell_length, 366.0 / 13.0);
        assert_eq!(layout.dpad.len(), 4);

        let up = layout.dpad[0];
        assert_eq!(up.heading, Heading::Up);
        assert_eq!(layout.dpad_hit(up.center), Some(Heading::Up));
        assert_eq!(layout.dpad_hit(Vec2::ZERO), None);

        let board_bottom = layout.to_screen(Vec2::splat(13.0)).y;
        assert!(up.center.y - up.radius > board_bottom);
    }
}
