//! Frame timing against the fixed simulation budget.
//!
//! The simulation has a 33.3ms budget per frame at the 30Hz tick rate.
//! Tracking how much of it each frame actually uses gives the headless
//! runner something to report and flags machines that cannot keep up.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::game::constants::tick;

/// How the simulation is doing against its frame budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Comfortably inside the budget
    Smooth,
    /// Using most of the budget; catch-up ticks are likely soon
    Busy,
    /// Over budget; the clock is falling behind and clamping catch-up
    Degraded,
}

/// Rolling monitor of frame durations.
pub struct FrameMonitor {
    frame_durations: VecDeque<Duration>,
    max_samples: usize,
    /// One tick interval; the whole frame must fit inside it to hold 30Hz
    budget: Duration,
    busy_threshold: f32,
    degraded_threshold: f32,
    status: FrameStatus,
    frame_start: Option<Instant>,
    last_entity_count: usize,
}

impl FrameMonitor {
    pub fn new() -> Self {
        Self {
            // Two seconds of frames at the fixed tick rate
            frame_durations: VecDeque::with_capacity(60),
            max_samples: 60,
            budget: tick::TICK_INTERVAL,
            busy_threshold: 0.5,
            degraded_threshold: 1.0,
            status: FrameStatus::Smooth,
            frame_start: None,
            last_entity_count: 0,
        }
    }

    pub fn frame_start(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    pub fn frame_end(&mut self, entity_count: usize) {
        if let Some(start) = self.frame_start.take() {
            self.record_frame(start.elapsed());
            self.last_entity_count = entity_count;
        }
    }

    fn record_frame(&mut self, duration: Duration) {
        self.frame_durations.push_back(duration);
        while self.frame_durations.len() > self.max_samples {
            self.frame_durations.pop_front();
        }
        self.update_status();
    }

    fn update_status(&mut self) {
        // Too few samples to judge
        if self.frame_durations.len() < 10 {
            return;
        }

        let avg = self.average_frame_duration();
        let ratio = avg.as_secs_f32() / self.budget.as_secs_f32();

        self.status = if ratio < self.busy_threshold {
            FrameStatus::Smooth
        } else if ratio < self.degraded_threshold {
            FrameStatus::Busy
        } else {
            FrameStatus::Degraded
        };
    }

    pub fn average_frame_duration(&self) -> Duration {
        if self.frame_durations.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.frame_durations.iter().sum();
        sum / self.frame_durations.len() as u32
    }

    pub fn p95_frame_duration(&self) -> Duration {
        if self.frame_durations.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted: Vec<_> = self.frame_durations.iter().copied().collect();
        sorted.sort();
        let idx = (sorted.len() as f32 * 0.95) as usize;
        sorted
            .get(idx.min(sorted.len() - 1))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    pub fn status(&self) -> FrameStatus {
        self.status
    }

    /// Average frame duration as a share of the budget, 0-100+.
    pub fn budget_usage_percent(&self) -> f32 {
        (self.average_frame_duration().as_secs_f32() / self.budget.as_secs_f32()) * 100.0
    }

    pub fn last_entity_count(&self) -> usize {
        self.last_entity_count
    }

    pub fn status_message(&self) -> String {
        format!(
            "{:?} - {:.1}% budget, {} entities",
            self.status,
            self.budget_usage_percent(),
            self.last_entity_count
        )
    }
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_starts_smooth() {
        let monitor = FrameMonitor::new();
        assert_eq!(monitor.status(), FrameStatus::Smooth);
        assert_eq!(monitor.average_frame_duration(), Duration::ZERO);
    }

    #[test]
    fn test_smooth_under_half_budget() {
        let mut monitor = FrameMonitor::new();
        // Budget is ~33.3ms; 2ms frames are well inside it
        for _ in 0..20 {
            monitor.record_frame(Duration::from_millis(2));
        }
        assert_eq!(monitor.status(), FrameStatus::Smooth);
    }

    #[test]
    fn test_busy_between_half_and_full_budget() {
        let mut monitor = FrameMonitor::new();
        for _ in 0..20 {
            monitor.record_frame(Duration::from_millis(25));
        }
        assert_eq!(monitor.status(), FrameStatus::Busy);
    }

    #[test]
    fn test_degraded_over_budget() {
        let mut monitor = FrameMonitor::new();
        for _ in 0..20 {
            monitor.record_frame(Duration::from_millis(40));
        }
        assert_eq!(monitor.status(), FrameStatus::Degraded);
        assert!(monitor.budget_usage_percent() > 100.0);
    }

    #[test]
    fn test_too_few_samples_keeps_status() {
        let mut monitor = FrameMonitor::new();
        for _ in 0..5 {
            monitor.record_frame(Duration::from_millis(40));
        }
        assert_eq!(monitor.status(), FrameStatus::Smooth);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut monitor = FrameMonitor::new();
        for _ in 0..200 {
            monitor.record_frame(Duration::from_millis(1));
        }
        assert!(monitor.frame_durations.len() <= 60);
    }

    #[test]
    fn test_frame_timing_records_entity_count() {
        let mut monitor = FrameMonitor::new();
        monitor.frame_start();
        monitor.frame_end(12);
        assert_eq!(monitor.last_entity_count(), 12);
        assert_eq!(monitor.frame_durations.len(), 1);
    }

    #[test]
    fn test_p95_tracks_outliers() {
        let mut monitor = FrameMonitor::new();
        for _ in 0..19 {
            monitor.record_frame(Duration::from_millis(2));
        }
        monitor.record_frame(Duration::from_millis(30));
        assert_eq!(monitor.p95_frame_duration(), Duration::from_millis(30));
        assert!(monitor.average_frame_duration() < Duration::from_millis(5));
    }
}
