#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Neon Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Mouse presses double as touches: macroquad forwards touch contacts as
//! left-button events, so one pointer path serves both swipes and the
//! on-screen D-pad.

mod ui;

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{
        is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
        KeyCode, MouseButton,
    },
    shapes::{draw_circle, draw_line, draw_rectangle},
};
use neon_snake_core::{Key, TouchPhase, TouchSample};
use neon_snake_rendering::{
    Dot, FrameInput, Indicator, Presentation, RenderingBackend, Scene, SceneLayout, Tile,
};
use std::time::{Duration, Instant};

const GAME_KEYS: [(KeyCode, Key); 11] = [
    (KeyCode::Up, Key::ArrowUp),
    (KeyCode::Down, Key::ArrowDown),
    (KeyCode::Left, Key::ArrowLeft),
    (KeyCode::Right, Key::ArrowRight),
    (KeyCode::W, Key::W),
    (KeyCode::A, Key::A),
    (KeyCode::S, Key::S),
    (KeyCode::D, Key::D),
    (KeyCode::Space, Key::Space),
    (KeyCode::Enter, Key::Enter),
    (KeyCode::R, Key::R),
];

const INDICATOR_SEGMENTS: usize = 12;

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Game keys in table order.
    keys: Vec<Key>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let keys = GAME_KEYS
            .iter()
            .filter(|(code, _)| is_key_pressed(*code))
            .map(|(_, key)| *key)
            .collect();

        Self {
            quit_requested,
            keys,
        }
    }
}

/// Turns pointer presses into D-pad presses or swipe samples.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    swiping: bool,
}

impl PointerTracker {
    /// Records one frame of pointer state into `input`.
    ///
    /// A press that lands on a D-pad button is reported as that heading and
    /// never starts a swipe; any other press starts a swipe that ends on
    /// release.
    pub fn observe(
        &mut self,
        pressed: bool,
        released: bool,
        position: Vec2,
        now: Duration,
        layout: Option<&SceneLayout>,
        input: &mut FrameInput,
    ) {
        if pressed {
            if let Some(heading) = layout.and_then(|layout| layout.dpad_hit(position)) {
                input.dpad.push(heading);
            } else {
                self.swiping = true;
                input.touches.push(sample(TouchPhase::Started, position, now));
            }
        }

        if released && self.swiping {
            self.swiping = false;
            input.touches.push(sample(TouchPhase::Ended, position, now));
        }
    }
}

fn sample(phase: TouchPhase, position: Vec2, at: Duration) -> TouchSample {
    TouchSample {
        phase,
        x: position.x,
        y: position.y,
        at,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    update_accum: Duration,
}

impl FpsCounter {
    /// Records a frame and returns frames per second plus the average update
    /// time once a full second has elapsed.
    fn record_frame(&mut self, frame: Duration, update: Duration) -> Option<(f32, Duration)> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += update;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        let avg_update = self.update_accum / self.frames.max(1);
        *self = Self::default();
        Some((per_second, avg_update))
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            show_dpad,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 540,
            window_height: if show_dpad { 860 } else { 660 },
            high_dpi: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut pointer = PointerTracker::default();
            let mut fps_counter = FpsCounter::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let now = Duration::from_secs_f64(macroquad::time::get_time().max(0.0));
                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));

                let layout_before = SceneLayout::fit(viewport, scene.grid_size, show_dpad).ok();
                let (cursor_x, cursor_y) = mouse_position();
                let mut input = FrameInput {
                    keys: keyboard.keys,
                    viewport,
                    ..FrameInput::default()
                };
                pointer.observe(
                    is_mouse_button_pressed(MouseButton::Left),
                    is_mouse_button_released(MouseButton::Left),
                    Vec2::new(cursor_x, cursor_y),
                    now,
                    layout_before.as_ref(),
                    &mut input,
                );

                let update_start = Instant::now();
                update_scene(now, input, &mut scene);
                let update_duration = update_start.elapsed();

                macroquad::window::clear_background(background);
                match SceneLayout::fit(viewport, scene.grid_size, show_dpad) {
                    Ok(layout) => draw_scene(&scene, &layout),
                    Err(error) => tracing::debug!(%error, "skipping frame"),
                }

                if let Some((per_second, avg_update)) =
                    fps_counter.record_frame(frame_dt, update_duration)
                {
                    if show_fps {
                        tracing::info!(
                            fps = per_second,
                            update_ms = avg_update.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, layout: &SceneLayout) {
    let board = scene.grid_size as f32 * layout.cell_length;
    draw_rectangle(
        layout.origin.x,
        layout.origin.y,
        board,
        board,
        to_macroquad_color(scene.background),
    );

    let line_color = to_macroquad_color(scene.line_color);
    for line in &scene.grid_lines {
        let from = layout.to_screen(line.from);
        let to = layout.to_screen(line.to);
        draw_line(from.x, from.y, to.x, to.y, 1.0, line_color);
    }

    for tile in scene.trail.iter().chain(scene.obstacles.iter()) {
        draw_rounded_tile(tile, layout);
    }

    if let Some(food) = &scene.food {
        draw_dot(&food.glow, layout);
        draw_rounded_tile(&food.tile, layout);
    }

    for tile in &scene.snake {
        draw_rounded_tile(tile, layout);
    }
    for eye in &scene.eyes {
        draw_dot(eye, layout);
    }
    if let Some(indicator) = &scene.indicator {
        draw_indicator(indicator, layout);
    }
    for particle in &scene.particles {
        draw_dot(particle, layout);
    }

    ui::draw_labels(&scene.labels, layout);
    ui::draw_hud(&scene.hud, layout, board);
    ui::draw_overlay(&scene.hud, layout, board);
    ui::draw_dpad(layout, scene.hud.color);
}

fn draw_rounded_tile(tile: &Tile, layout: &SceneLayout) {
    let origin = layout.to_screen(tile.origin);
    let size = tile.size * layout.cell_length;
    let radius = (tile.corner_radius * layout.cell_length).min(size / 2.0);
    let color = to_macroquad_color(tile.color);

    if radius <= 0.5 {
        draw_rectangle(origin.x, origin.y, size, size, color);
        return;
    }

    draw_rectangle(origin.x + radius, origin.y, size - 2.0 * radius, size, color);
    draw_rectangle(origin.x, origin.y + radius, radius, size - 2.0 * radius, color);
    draw_rectangle(
        origin.x + size - radius,
        origin.y + radius,
        radius,
        size - 2.0 * radius,
        color,
    );
    for (dx, dy) in [
        (radius, radius),
        (size - radius, radius),
        (radius, size - radius),
        (size - radius, size - radius),
    ] {
        draw_circle(origin.x + dx, origin.y + dy, radius, color);
    }
}

fn draw_dot(dot: &Dot, layout: &SceneLayout) {
    let center = layout.to_screen(dot.center);
    let radius = (dot.radius * layout.cell_length).max(1.2);
    draw_circle(center.x, center.y, radius, to_macroquad_color(dot.color));
}

fn draw_indicator(indicator: &Indicator, layout: &SceneLayout) {
    let points = arc_points(indicator, layout);
    let color = to_macroquad_color(indicator.color);
    let thickness = (layout.cell_length * 0.08).max(1.0);
    for pair in points.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, thickness, color);
    }
}

fn arc_points(indicator: &Indicator, layout: &SceneLayout) -> Vec<Vec2> {
    let center = layout.to_screen(indicator.center);
    let radius = indicator.radius * layout.cell_length;
    let start = indicator.facing - indicator.sweep / 2.0;
    (0..=INDICATOR_SEGMENTS)
        .map(|step| {
            let angle = start + indicator.sweep * step as f32 / INDICATOR_SEGMENTS as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn to_macroquad_color(color: neon_snake_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
