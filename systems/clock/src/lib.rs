#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep clock that turns frame timestamps into simulation ticks.
//!
//! Rendering runs at whatever rate the display offers while the snake moves at
//! its own tick rate. Each frame the driver calls
//! [`SimulationClock::begin_frame`] once and then drains
//! [`SimulationClock::next_tick`] in a loop, re-reading the current tick rate
//! before every call so a speed change only affects intervals that have not
//! been evaluated yet.

use std::time::Duration;

/// Accumulates elapsed frame time and releases it one tick interval at a time.
#[derive(Clone, Debug, Default)]
pub struct SimulationClock {
    last_frame: Option<Duration>,
    accumulator: Duration,
}

impl SimulationClock {
    /// Creates a clock that has not observed any frame yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame timestamp.
    ///
    /// The first frame only establishes the reference point. While `ticking`
    /// is false the elapsed time is discarded, so resuming never releases a
    /// burst of ticks for the time spent paused.
    pub fn begin_frame(&mut self, now: Duration, ticking: bool) {
        let Some(last) = self.last_frame.replace(now) else {
            return;
        };
        if ticking {
            let delta = now.saturating_sub(last);
            self.accumulator = self.accumulator.saturating_add(delta);
        }
    }

    /// Consumes one interval for `rate` ticks per second if enough time accumulated.
    pub fn next_tick(&mut self, rate: f32) -> bool {
        let Some(interval) = Self::interval_for(rate) else {
            return false;
        };
        if self.accumulator >= interval {
            self.accumulator -= interval;
            true
        } else {
            false
        }
    }

    /// Drops any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Time accumulated but not yet released as ticks.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Interval between ticks at `rate` ticks per second; `None` for rates that never tick.
    #[must_use]
    pub fn interval_for(rate: f32) -> Option<Duration> {
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        let interval = Duration::from_secs_f64(1.0 / f64::from(rate));
        if interval.is_zero() {
            None
        } else {
            Some(interval)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut SimulationClock, rate: f32) -> usize {
        let mut ticks = 0;
        while clock.next_tick(rate) {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn first_frame_establishes_reference_only() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::from_secs(30), true);
        assert_eq!(clock.pending(), Duration::ZERO);
        assert_eq!(drain(&mut clock, 10.0), 0);
    }

    #[test]
    fn stall_releases_every_owed_tick() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_secs(1), true);
        assert_eq!(drain(&mut clock, 10.0), 10);
        assert_eq!(clock.pending(), Duration::ZERO);
    }

    #[test]
    fn paused_frames_do_not_accumulate() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_millis(50), true);
        clock.begin_frame(Duration::from_secs(10), false);
        assert_eq!(clock.pending(), Duration::from_millis(50));

        clock.begin_frame(Duration::from_millis(10_050), true);
        assert_eq!(drain(&mut clock, 10.0), 1);
    }

    #[test]
    fn remainder_carries_into_next_frame() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_millis(150), true);
        assert_eq!(drain(&mut clock, 10.0), 1);
        clock.begin_frame(Duration::from_millis(200), true);
        assert_eq!(drain(&mut clock, 10.0), 1);
    }

    #[test]
    fn rate_changes_apply_to_the_next_interval_only() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_secs(1), true);
        assert!(clock.next_tick(10.0));
        assert!(clock.next_tick(2.0));
        assert_eq!(clock.pending(), Duration::from_millis(400));
        assert!(!clock.next_tick(2.0));
    }

    #[test]
    fn non_positive_rates_never_tick() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_secs(5), true);
        assert!(!clock.next_tick(0.0));
        assert!(!clock.next_tick(-3.0));
        assert!(!clock.next_tick(f32::NAN));
        assert_eq!(SimulationClock::interval_for(4.0), Some(Duration::from_millis(250)));
    }

    #[test]
    fn reset_discards_accumulated_time() {
        let mut clock = SimulationClock::new();
        clock.begin_frame(Duration::ZERO, true);
        clock.begin_frame(Duration::from_secs(2), true);
        clock.reset();
        assert_eq!(drain(&mut clock, 10.0), 0);
    }
}
