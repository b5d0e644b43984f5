//! Stage progression state machine.
//!
//! Runs on simulation time: three timed stages of thirty seconds each, then
//! the boss, then an endless stage once the boss falls.
//!
//! ```text
//! One --30s--> Two --30s--> Three --30s--> Boss --boss killed--> Endless
//! ```

use serde::{Deserialize, Serialize};

use crate::game::constants::stage::{MIN_SPAWN_COOLDOWN_MS, STAGE_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    One,
    Two,
    Three,
    Boss,
    Endless,
}

/// Per-stage spawn pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTuning {
    /// Raider population ceiling
    pub max_raiders: usize,
    /// Speed multiplier applied to raiders spawned in this stage
    pub speed_multi: f64,
    /// Raider spawn cooldown
    pub spawn_cooldown_ms: u64,
}

impl Stage {
    /// 1-based stage number for display and tier gating.
    pub fn level(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
            Stage::Three => 3,
            Stage::Boss => 4,
            Stage::Endless => 5,
        }
    }

    pub fn tuning(self) -> StageTuning {
        match self {
            Stage::One => StageTuning {
                max_raiders: 5,
                speed_multi: 1.0,
                spawn_cooldown_ms: 900,
            },
            Stage::Two => StageTuning {
                max_raiders: 7,
                speed_multi: 1.2,
                spawn_cooldown_ms: 700,
            },
            Stage::Three => StageTuning {
                max_raiders: 9,
                speed_multi: 1.4,
                spawn_cooldown_ms: 500,
            },
            // A thin trickle of escorts while the boss holds the screen
            Stage::Boss => StageTuning {
                max_raiders: 3,
                speed_multi: 1.4,
                spawn_cooldown_ms: 2000,
            },
            Stage::Endless => StageTuning {
                max_raiders: 12,
                speed_multi: 1.8,
                spawn_cooldown_ms: MIN_SPAWN_COOLDOWN_MS,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageState {
    stage: Stage,
    /// One-shot flag raised on entering [`Stage::Boss`], consumed by spawning
    boss_spawn_pending: bool,
}

impl StageState {
    pub fn new() -> Self {
        Self {
            stage: Stage::One,
            boss_spawn_pending: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tuning(&self) -> StageTuning {
        self.stage.tuning()
    }

    /// Advances at most one timed transition per call and returns the newly
    /// entered stage. Boss -> Endless is not timed; see
    /// [`on_boss_defeated`](Self::on_boss_defeated).
    pub fn update(&mut self, now_ms: u64) -> Option<Stage> {
        let next = match self.stage {
            Stage::One if now_ms >= STAGE_DURATION_MS => Stage::Two,
            Stage::Two if now_ms >= 2 * STAGE_DURATION_MS => Stage::Three,
            Stage::Three if now_ms >= 3 * STAGE_DURATION_MS => Stage::Boss,
            _ => return None,
        };
        self.stage = next;
        if next == Stage::Boss {
            self.boss_spawn_pending = true;
        }
        Some(next)
    }

    /// Consumes the one-shot boss spawn flag.
    pub fn take_boss_spawn(&mut self) -> bool {
        std::mem::take(&mut self.boss_spawn_pending)
    }

    /// Advances Boss -> Endless. Returns false outside the boss stage.
    pub fn on_boss_defeated(&mut self) -> bool {
        if self.stage == Stage::Boss {
            self.stage = Stage::Endless;
            return true;
        }
        false
    }
}

impl Default for StageState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_stage_one() {
        let state = StageState::new();
        assert_eq!(state.stage(), Stage::One);
        assert!(!state.clone().take_boss_spawn());
    }

    #[test]
    fn test_timed_transitions() {
        let mut state = StageState::new();
        assert_eq!(state.update(29_999), None);
        assert_eq!(state.update(30_000), Some(Stage::Two));
        assert_eq!(state.update(30_000), None);
        assert_eq!(state.update(59_999), None);
        assert_eq!(state.update(60_000), Some(Stage::Three));
        assert_eq!(state.update(90_000), Some(Stage::Boss));
        // Boss is not a timed stage; nothing more happens
        assert_eq!(state.update(10_000_000), None);
        assert_eq!(state.stage(), Stage::Boss);
    }

    #[test]
    fn test_one_transition_per_update() {
        let mut state = StageState::new();
        // Far past several boundaries: advances one stage per call
        assert_eq!(state.update(95_000), Some(Stage::Two));
        assert_eq!(state.update(95_000), Some(Stage::Three));
        assert_eq!(state.update(95_000), Some(Stage::Boss));
        assert_eq!(state.update(95_000), None);
    }

    #[test]
    fn test_boss_spawn_flag_is_one_shot() {
        let mut state = StageState::new();
        state.update(30_000);
        state.update(60_000);
        assert!(!state.take_boss_spawn());
        state.update(90_000);
        assert!(state.take_boss_spawn());
        assert!(!state.take_boss_spawn());
    }

    #[test]
    fn test_boss_defeat_advances_to_endless() {
        let mut state = StageState::new();
        state.update(30_000);
        state.update(60_000);
        state.update(90_000);
        assert!(state.on_boss_defeated());
        assert_eq!(state.stage(), Stage::Endless);
        // Endless is terminal
        assert_eq!(state.update(1_000_000), None);
        assert!(!state.on_boss_defeated());
    }

    #[test]
    fn test_boss_defeat_ignored_outside_boss_stage() {
        let mut state = StageState::new();
        assert!(!state.on_boss_defeated());
        assert_eq!(state.stage(), Stage::One);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Stage::One.level(), 1);
        assert_eq!(Stage::Two.level(), 2);
        assert_eq!(Stage::Three.level(), 3);
        assert_eq!(Stage::Boss.level(), 4);
        assert_eq!(Stage::Endless.level(), 5);
    }

    #[test]
    fn test_tuning_escalates_spawn_pressure() {
        let one = Stage::One.tuning();
        let two = Stage::Two.tuning();
        let three = Stage::Three.tuning();
        let endless = Stage::Endless.tuning();
        assert!(one.max_raiders < two.max_raiders);
        assert!(two.max_raiders < three.max_raiders);
        assert!(three.max_raiders < endless.max_raiders);
        assert!(one.spawn_cooldown_ms > two.spawn_cooldown_ms);
        assert!(two.spawn_cooldown_ms > three.spawn_cooldown_ms);
        assert!(one.speed_multi < endless.speed_multi);
        // The boss stage throttles escorts instead
        assert!(Stage::Boss.tuning().max_raiders < three.max_raiders);
    }
}
