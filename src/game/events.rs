//! Events emitted by the simulation, drained once per frame.
//!
//! This is the seam a frontend hangs sounds and effects on; the simulation
//! itself never interprets them.

use serde::{Deserialize, Serialize};

use crate::game::state::{BuffKind, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    StageAdvanced { stage: u8 },
    BossSpawned,
    BossDefeated,
    /// A raider was destroyed by damage (not by leaving the area)
    RaiderDestroyed { id: EntityId, points: u32 },
    PlayerHit { hit_points_left: i32 },
    BuffCollected { kind: BuffKind },
    /// Player or boss volley; raider fire is silent
    ShotFired,
    GameOver { score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let events = vec![
            GameEvent::GameStarted,
            GameEvent::StageAdvanced { stage: 2 },
            GameEvent::RaiderDestroyed {
                id: "7".to_string(),
                points: 300,
            },
            GameEvent::GameOver { score: 12_400 },
        ];
        let json = serde_json::to_string(&events).unwrap();
        let decoded: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, decoded);
    }
}
