//! Fixed-timestep tick scheduling.
//!
//! Frames arrive at whatever rate the host can manage; the simulation only
//! ever advances in whole 1/30 s ticks. `TickClock` converts wall-clock time
//! between frames into a tick count, with two safeguards:
//!
//! - a catch-up cap, so a slow frame is paid back over several frames instead
//!   of one giant burst;
//! - a resync threshold, so a suspended process (debugger, laptop lid) drops
//!   its backlog instead of fast-forwarding through it.
//!
//! Game time is derived from the tick counter, not the wall clock, which
//! keeps every cooldown and stage timer deterministic for a seeded run.

use std::time::{Duration, Instant};

use crate::game::constants::tick;

#[derive(Debug)]
pub struct TickClock {
    max_catchup_ticks: u32,
    resync_threshold: Duration,
    last_frame: Option<Instant>,
    accumulator: Duration,
    ticks: u64,
}

impl TickClock {
    pub fn new(max_catchup_ticks: u32, resync_threshold: Duration) -> Self {
        Self {
            max_catchup_ticks,
            resync_threshold,
            last_frame: None,
            accumulator: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Advances the clock to `now` and returns the number of whole ticks to
    /// simulate this frame.
    ///
    /// The first call after construction or [`reset`](Self::reset) only
    /// establishes the baseline and returns 0.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            return 0;
        };
        let elapsed = now.saturating_duration_since(last);
        self.last_frame = Some(now);

        if elapsed >= self.resync_threshold {
            // Fell too far behind to be worth replaying. Drop the backlog and
            // run a single tick so the game stays live.
            self.accumulator = Duration::ZERO;
            self.ticks += 1;
            return 1;
        }

        self.accumulator += elapsed;
        let whole = (self.accumulator.as_nanos() / tick::TICK_INTERVAL.as_nanos()) as u32;
        // Keep only the sub-tick remainder; whole ticks beyond the cap are
        // discarded, not deferred.
        self.accumulator -= tick::TICK_INTERVAL * whole;

        let ticks = whole.min(self.max_catchup_ticks);
        self.ticks += u64::from(ticks);
        ticks
    }

    /// Books `ticks` synthetic ticks without consulting the wall clock.
    /// Used by turbo mode, tests, and benches.
    pub fn advance_by(&mut self, ticks: u32) {
        self.ticks += u64::from(ticks);
    }

    /// Total ticks processed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulation-time milliseconds derived from the tick counter.
    pub fn game_time_ms(&self) -> u64 {
        self.ticks * 1000 / u64::from(tick::TICK_RATE)
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
        self.accumulator = Duration::ZERO;
        self.ticks = 0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(tick::MAX_CATCHUP_TICKS, tick::RESYNC_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> TickClock {
        TickClock::default()
    }

    #[test]
    fn test_first_advance_establishes_baseline() {
        let mut clock = clock();
        assert_eq!(clock.advance(Instant::now()), 0);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_one_tick_after_one_interval() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        assert_eq!(clock.advance(t0 + tick::TICK_INTERVAL), 1);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_sub_tick_frames_accumulate() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        assert_eq!(clock.advance(t0 + tick::TICK_INTERVAL / 2), 0);
        assert_eq!(clock.advance(t0 + tick::TICK_INTERVAL), 1);
    }

    #[test]
    fn test_fractional_remainder_carries_over() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        let t1 = t0 + tick::TICK_INTERVAL * 3 + Duration::from_millis(17);
        assert_eq!(clock.advance(t1), 3);
        // The 17 ms remainder plus another 17 ms crosses one more tick
        assert_eq!(clock.advance(t1 + Duration::from_millis(17)), 1);
    }

    #[test]
    fn test_catchup_capped() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        // 20 ticks behind, still under the resync threshold
        let ticks = clock.advance(t0 + tick::TICK_INTERVAL * 20);
        assert_eq!(ticks, tick::MAX_CATCHUP_TICKS);
    }

    #[test]
    fn test_capped_backlog_is_discarded_not_deferred() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        let t1 = t0 + tick::TICK_INTERVAL * 20;
        clock.advance(t1);
        // Backlog was dropped: a normal next frame yields a normal tick count
        assert_eq!(clock.advance(t1 + tick::TICK_INTERVAL), 1);
    }

    #[test]
    fn test_resync_after_long_suspension() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        assert_eq!(clock.advance(t0 + Duration::from_secs(5)), 1);
        // Accumulator was cleared by the resync
        let t1 = t0 + Duration::from_secs(5);
        assert_eq!(clock.advance(t1 + tick::TICK_INTERVAL / 2), 0);
    }

    #[test]
    fn test_resync_at_exact_threshold() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        assert_eq!(clock.advance(t0 + tick::RESYNC_THRESHOLD), 1);
    }

    #[test]
    fn test_non_monotonic_now_is_ignored() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0 + tick::TICK_INTERVAL);
        // `now` earlier than the baseline counts as zero elapsed
        assert_eq!(clock.advance(t0), 0);
    }

    #[test]
    fn test_game_time_tracks_processed_ticks() {
        let mut clock = clock();
        assert_eq!(clock.game_time_ms(), 0);
        clock.advance_by(30);
        assert_eq!(clock.game_time_ms(), 1000);
        clock.advance_by(15);
        assert_eq!(clock.game_time_ms(), 1500);
    }

    #[test]
    fn test_game_time_unaffected_by_capped_backlog() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        clock.advance(t0 + tick::TICK_INTERVAL * 20);
        assert_eq!(clock.ticks(), u64::from(tick::MAX_CATCHUP_TICKS));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.advance(t0);
        clock.advance(t0 + tick::TICK_INTERVAL * 3);
        clock.reset();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.game_time_ms(), 0);
        assert_eq!(clock.advance(t0 + tick::TICK_INTERVAL * 10), 0);
    }
}
