use std::time::Duration;

use glam::Vec2;
use neon_snake_core::{Heading, TouchPhase};
use neon_snake_rendering::{FrameInput, SceneLayout};
use neon_snake_rendering_macroquad::PointerTracker;

#[derive(Clone, Copy)]
struct PointerFrame {
    pressed: bool,
    released: bool,
    position: Vec2,
}

fn frame(pressed: bool, released: bool, x: f32, y: f32) -> PointerFrame {
    PointerFrame {
        pressed,
        released,
        position: Vec2::new(x, y),
    }
}

fn replay(frames: &[PointerFrame], layout: &SceneLayout) -> Vec<FrameInput> {
    let mut tracker = PointerTracker::default();
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            let mut input = FrameInput::default();
            tracker.observe(
                frame.pressed,
                frame.released,
                frame.position,
                Duration::from_millis(16 * index as u64),
                Some(layout),
                &mut input,
            );
            input
        })
        .collect()
}

#[test]
fn pointer_sequence_is_deterministic() {
    let layout =
        SceneLayout::fit(Vec2::new(390.0, 844.0), 13, true).expect("phone viewport fits");
    let up = layout.dpad[0].center;
    let frames = [
        frame(true, false, 120.0, 240.0),
        frame(false, false, 150.0, 242.0),
        frame(false, true, 190.0, 244.0),
        frame(true, false, up.x, up.y),
        frame(false, true, up.x, up.y),
        frame(false, true, 10.0, 10.0),
    ];

    let first = replay(&frames, &layout);
    let second = replay(&frames, &layout);
    assert_eq!(first, second);

    let touches: Vec<(usize, TouchPhase)> = first
        .iter()
        .enumerate()
        .flat_map(|(index, input)| input.touches.iter().map(move |touch| (index, touch.phase)))
        .collect();
    assert_eq!(
        touches,
        vec![(0, TouchPhase::Started), (2, TouchPhase::Ended)]
    );

    let presses: Vec<Heading> = first.iter().flat_map(|input| input.dpad.clone()).collect();
    assert_eq!(presses, vec![Heading::Up]);
}

#[test]
fn release_without_press_is_ignored() {
    let layout =
        SceneLayout::fit(Vec2::new(540.0, 860.0), 21, true).expect("desktop viewport fits");
    let inputs = replay(&[frame(false, true, 200.0, 200.0)], &layout);
    assert_eq!(inputs, vec![FrameInput::default()]);
}
