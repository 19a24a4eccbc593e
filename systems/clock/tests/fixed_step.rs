use std::time::Duration;

use neon_snake_core::{Cell, Command};
use neon_snake_system_clock::SimulationClock;
use neon_snake_world::{self as world, query, World};

fn run_frame(world: &mut World, clock: &mut SimulationClock, now: Duration) -> usize {
    clock.begin_frame(now, query::is_ticking(world));
    let mut ticks = 0;
    while query::is_ticking(world) && clock.next_tick(query::tick_rate(world)) {
        let mut events = Vec::new();
        world::apply(world, Command::Tick { now }, &mut events);
        ticks += 1;
    }
    ticks
}

#[test]
fn one_second_at_base_rate_moves_seven_cells() {
    let mut world = World::with_seed(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    let mut clock = SimulationClock::new();

    assert_eq!(run_frame(&mut world, &mut clock, Duration::ZERO), 0);
    assert_eq!(run_frame(&mut world, &mut clock, Duration::from_secs(1)), 7);
    assert_eq!(query::snapshot(&world).head(), Some(Cell::new(17, 10)));
}

#[test]
fn pausing_freezes_tick_production() {
    let mut world = World::with_seed(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    let mut clock = SimulationClock::new();
    let _ = run_frame(&mut world, &mut clock, Duration::ZERO);

    world::apply(&mut world, Command::TogglePause, &mut events);
    assert_eq!(run_frame(&mut world, &mut clock, Duration::from_secs(30)), 0);

    world::apply(&mut world, Command::TogglePause, &mut events);
    assert_eq!(
        run_frame(&mut world, &mut clock, Duration::from_millis(30_100)),
        0,
        "resuming must not release ticks owed for the paused time"
    );
    assert_eq!(
        run_frame(&mut world, &mut clock, Duration::from_millis(30_200)),
        1
    );
}

#[test]
fn game_over_stops_the_drain_mid_frame() {
    let mut world = World::with_seed(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    let mut clock = SimulationClock::new();
    let _ = run_frame(&mut world, &mut clock, Duration::ZERO);

    let ticks = run_frame(&mut world, &mut clock, Duration::from_secs(10));
    assert_eq!(ticks, 11, "ten moves to the wall plus the fatal tick");
    assert!(!query::is_ticking(&world));
}
