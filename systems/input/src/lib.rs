#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates keyboard, D-pad and swipe input into world commands.

use std::time::Duration;

use glam::Vec2;
use neon_snake_core::{Command, Heading, Key, TouchPhase, TouchSample};

/// Thresholds that decide whether a touch gesture counts as a swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeTuning {
    /// Minimum travel in pixels regardless of viewport size.
    pub min_pixels: f32,
    /// Minimum travel as a fraction of the smaller viewport dimension.
    pub min_ratio: f32,
    /// Gestures shorter than this are treated as flicks.
    pub fast_window: Duration,
    /// Multiplier applied to the threshold for flicks.
    pub fast_factor: f32,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            min_pixels: 20.0,
            min_ratio: 0.05,
            fast_window: Duration::from_millis(180),
            fast_factor: 0.6,
        }
    }
}

/// Heading steered by a key, if any.
#[must_use]
pub const fn heading_for_key(key: Key) -> Option<Heading> {
    match key {
        Key::ArrowUp | Key::W => Some(Heading::Up),
        Key::ArrowDown | Key::S => Some(Heading::Down),
        Key::ArrowLeft | Key::A => Some(Heading::Left),
        Key::ArrowRight | Key::D => Some(Heading::Right),
        Key::Space | Key::Enter | Key::R => None,
    }
}

/// Command issued by a single key press.
#[must_use]
pub const fn command_for_key(key: Key) -> Command {
    match key {
        Key::Space => Command::TogglePause,
        Key::Enter => Command::Start,
        Key::R => Command::Restart,
        Key::ArrowUp | Key::W => Command::RequestHeading {
            heading: Heading::Up,
        },
        Key::ArrowDown | Key::S => Command::RequestHeading {
            heading: Heading::Down,
        },
        Key::ArrowLeft | Key::A => Command::RequestHeading {
            heading: Heading::Left,
        },
        Key::ArrowRight | Key::D => Command::RequestHeading {
            heading: Heading::Right,
        },
    }
}

/// Classifies a finished gesture into a heading.
///
/// `delta` is measured in screen pixels with `y` growing downwards. Ties
/// between the axes resolve to vertical movement.
#[must_use]
pub fn classify_swipe(
    delta: Vec2,
    elapsed: Duration,
    viewport_min: f32,
    tuning: &SwipeTuning,
) -> Option<Heading> {
    let mut threshold = tuning.min_pixels.max(viewport_min * tuning.min_ratio);
    if elapsed < tuning.fast_window {
        threshold *= tuning.fast_factor;
    }

    let magnitude = delta.abs();
    if magnitude.max_element() < threshold {
        return None;
    }

    let heading = if magnitude.x > magnitude.y {
        if delta.x > 0.0 {
            Heading::Right
        } else {
            Heading::Left
        }
    } else if delta.y > 0.0 {
        Heading::Down
    } else {
        Heading::Up
    };
    Some(heading)
}

#[derive(Clone, Copy, Debug)]
struct TouchStart {
    position: Vec2,
    at: Duration,
}

/// Stateful input system tracking touches across frames.
#[derive(Debug, Default)]
pub struct Input {
    tuning: SwipeTuning,
    touch: Option<TouchStart>,
}

impl Input {
    /// Creates an input system with the provided swipe tuning.
    #[must_use]
    pub fn new(tuning: SwipeTuning) -> Self {
        Self { tuning, touch: None }
    }

    /// Converts one frame of raw input into commands, preserving arrival order.
    pub fn handle(
        &mut self,
        keys: &[Key],
        dpad: &[Heading],
        touches: &[TouchSample],
        viewport: Vec2,
        out: &mut Vec<Command>,
    ) {
        out.extend(keys.iter().map(|key| command_for_key(*key)));
        out.extend(
            dpad.iter()
                .map(|heading| Command::RequestHeading { heading: *heading }),
        );

        for sample in touches {
            let position = Vec2::new(sample.x, sample.y);
            match sample.phase {
                TouchPhase::Started => {
                    self.touch = Some(TouchStart {
                        position,
                        at: sample.at,
                    });
                }
                TouchPhase::Ended => {
                    let Some(start) = self.touch.take() else {
                        continue;
                    };
                    let elapsed = sample.at.saturating_sub(start.at);
                    if let Some(heading) = classify_swipe(
                        position - start.position,
                        elapsed,
                        viewport.min_element(),
                        &self.tuning,
                    ) {
                        out.push(Command::RequestHeading { heading });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: f32 = 390.0;

    #[test]
    fn short_slow_swipe_is_ignored() {
        let tuning = SwipeTuning::default();
        let heading = classify_swipe(
            Vec2::new(15.0, 2.0),
            Duration::from_millis(400),
            PHONE,
            &tuning,
        );
        assert_eq!(heading, None);
    }

    #[test]
    fn same_swipe_performed_fast_is_accepted() {
        let tuning = SwipeTuning::default();
        let heading = classify_swipe(
            Vec2::new(15.0, 2.0),
            Duration::from_millis(90),
            PHONE,
            &tuning,
        );
        assert_eq!(heading, Some(Heading::Right));
    }

    #[test]
    fn large_viewports_raise_the_threshold() {
        let tuning = SwipeTuning::default();
        let delta = Vec2::new(0.0, -30.0);
        let slow = Duration::from_millis(500);
        assert_eq!(classify_swipe(delta, slow, PHONE, &tuning), Some(Heading::Up));
        assert_eq!(classify_swipe(delta, slow, 1_000.0, &tuning), None);
    }

    #[test]
    fn diagonal_ties_resolve_vertically() {
        let tuning = SwipeTuning::default();
        let heading = classify_swipe(
            Vec2::new(-40.0, 40.0),
            Duration::from_millis(300),
            PHONE,
            &tuning,
        );
        assert_eq!(heading, Some(Heading::Down));
    }

    #[test]
    fn wasd_mirrors_arrow_keys() {
        for (letter, arrow) in [
            (Key::W, Key::ArrowUp),
            (Key::A, Key::ArrowLeft),
            (Key::S, Key::ArrowDown),
            (Key::D, Key::ArrowRight),
        ] {
            assert_eq!(heading_for_key(letter), heading_for_key(arrow));
            assert_eq!(command_for_key(letter), command_for_key(arrow));
        }
        assert_eq!(heading_for_key(Key::Space), None);
        assert_eq!(command_for_key(Key::Enter), Command::Start);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut input = Input::new(SwipeTuning::default());
        let mut out = Vec::new();
        input.handle(
            &[],
            &[],
            &[TouchSample {
                phase: TouchPhase::Ended,
                x: 200.0,
                y: 10.0,
                at: Duration::from_millis(50),
            }],
            Vec2::new(PHONE, 800.0),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
