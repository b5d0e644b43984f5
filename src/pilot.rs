//! A scripted autopilot for headless runs.
//!
//! The demo binary has no one at the keyboard, so this decides the five
//! in-game keys each frame from the visible store. It is a pure function of
//! the state: replaying a seeded run replays the same decisions.

use crate::game::constants::area;
use crate::game::input::KeySet;
use crate::game::state::{Entities, Entity, EntityKind};

/// Vertical slack before the pilot bothers adjusting its row.
const ROW_TOLERANCE: i32 = 8;
/// How close an incoming round gets before the pilot evades.
const THREAT_RANGE: i32 = 280;
/// How far off-row a round can be and still count as incoming.
const THREAT_ROW_SLACK: i32 = 60;

/// What the pilot is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotBehavior {
    /// Line up with the nearest raider or boss and shoot
    Hunt,
    /// Back toward the left edge, slipping out of an incoming round's row
    Evade,
    /// Nothing on screen; drift back to the vertical center
    Center,
}

pub struct Pilot {
    behavior: PilotBehavior,
}

impl Pilot {
    pub fn new() -> Self {
        Self {
            behavior: PilotBehavior::Center,
        }
    }

    pub fn behavior(&self) -> PilotBehavior {
        self.behavior
    }

    /// Decides this frame's keys. The trigger is held whenever the player
    /// is alive; the movement keys depend on the behavior.
    pub fn decide(&mut self, entities: &Entities) -> KeySet {
        let Some(player) = entities.player() else {
            self.behavior = PilotBehavior::Center;
            return KeySet::default();
        };

        let mut keys = KeySet {
            fire: true,
            ..KeySet::default()
        };

        if let Some(shot) = nearest_incoming_shot(player, entities) {
            self.behavior = PilotBehavior::Evade;
            keys.left = player.rect.x > 0;
            if shot.rect.center_y() >= player.rect.center_y() {
                keys.up = player.rect.y > 0;
                keys.down = !keys.up;
            } else {
                keys.down = player.rect.bottom() < area::HEIGHT;
                keys.up = !keys.down;
            }
            return keys;
        }

        if let Some(target) = nearest_hostile(player, entities) {
            self.behavior = PilotBehavior::Hunt;
            steer_to_row(&mut keys, target.rect.center_y() - player.rect.center_y());
            return keys;
        }

        self.behavior = PilotBehavior::Center;
        steer_to_row(&mut keys, area::HEIGHT / 2 - player.rect.center_y());
        keys
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

fn steer_to_row(keys: &mut KeySet, dy: i32) {
    if dy.abs() > ROW_TOLERANCE {
        keys.down = dy > 0;
        keys.up = dy < 0;
    }
}

/// The closest enemy round ahead of the ship and near its row.
fn nearest_incoming_shot<'a>(player: &Entity, entities: &'a Entities) -> Option<&'a Entity> {
    entities
        .iter()
        .filter(|(_, e)| e.kind.is_projectile() && e.team != player.team && e.move_left)
        .filter(|(_, e)| {
            let dx = e.rect.x - player.rect.right();
            (0..THREAT_RANGE).contains(&dx)
                && (e.rect.center_y() - player.rect.center_y()).abs() < THREAT_ROW_SLACK
        })
        .min_by_key(|(_, e)| e.rect.x - player.rect.right())
        .map(|(_, e)| e)
}

fn nearest_hostile<'a>(player: &Entity, entities: &'a Entities) -> Option<&'a Entity> {
    entities
        .iter()
        .filter(|(_, e)| matches!(e.kind, EntityKind::Raider { .. } | EntityKind::Boss))
        .min_by_key(|(_, e)| (e.rect.x - player.rect.x).abs())
        .map(|(_, e)| e)
}
