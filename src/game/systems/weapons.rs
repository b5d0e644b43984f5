//! Trigger pulls become projectiles.
//!
//! The player fires on demand, gated by a cooldown; raider and boss guns
//! fire every time their cooldown lapses. Volleys grow with the player's
//! rapid-fire level, up to five rounds per pull.

use smallvec::SmallVec;

use crate::game::constants::{player as player_consts, projectile, raider};
use crate::game::events::GameEvent;
use crate::game::state::{Entities, Entity, EntityKind};
use crate::util::rect::Rect;

/// One trigger pull's worth of rounds. Five covers the largest volley.
type Volley = SmallVec<[Entity; 5]>;

pub fn update(entities: &mut Entities, now_ms: u64, events: &mut Vec<GameEvent>) {
    let ids = entities.ids();
    let mut audible = false;

    for id in &ids {
        let Some(shooter) = entities.get_mut(id) else {
            continue;
        };
        if !wants_to_fire(shooter, now_ms) {
            continue;
        }
        shooter.shoot_ready_at_ms = now_ms + shooter.shoot_cooldown_ms;

        let volley = match shooter.kind {
            EntityKind::Player => player_volley(shooter),
            EntityKind::Boss => gun_volley(shooter, true),
            EntityKind::Raider { .. } => gun_volley(shooter, false),
            _ => Volley::new(),
        };
        // Raider fire is ambient noise; only the player's and boss's guns
        // register
        audible |= !shooter.kind.is_raider();

        for round in volley {
            entities.insert(round, now_ms);
        }
    }

    if audible {
        events.push(GameEvent::ShotFired);
    }
}

fn wants_to_fire(shooter: &Entity, now_ms: u64) -> bool {
    if !shooter.can_shoot || now_ms < shooter.shoot_ready_at_ms {
        return false;
    }
    !shooter.kind.is_player() || shooter.fire
}

/// The player's volley. The primary round leaves the muzzle centered on the
/// ship; at level 1 the pair is offset half a round so the spread stays
/// centered. Levels stack rounds above and below, then diagonals, and the
/// top level swaps in the faster round.
fn player_volley(shooter: &Entity) -> Volley {
    let height = projectile::HEIGHT;
    let level = shooter.rapid_fire_level;
    let multi = if level >= player_consts::RAPID_FIRE_MAX_LEVEL {
        projectile::PLAYER_SUPER_SPEED_MULTI
    } else {
        projectile::PLAYER_SPEED_MULTI
    };

    let x = shooter.rect.right() + player_consts::MUZZLE_GAP;
    let mut y = shooter.rect.y + shooter.rect.h / 2 - height / 2;
    if level == 1 {
        y += height / 2;
    }

    let mut primary = Entity::projectile(
        shooter.team,
        Rect::new(x, y, projectile::WIDTH, height),
        shooter.base_speed,
        multi,
        shooter.damage,
    );
    primary.move_right = true;

    let mut volley = Volley::new();
    if level >= 1 {
        let mut round = primary.clone();
        round.rect.y -= height;
        volley.push(round);
    }
    if level >= 2 {
        let mut round = primary.clone();
        round.rect.y += height;
        volley.push(round);
    }
    if level >= 3 {
        let mut up = primary.clone();
        up.move_up = true;
        volley.push(up);
        let mut down = primary.clone();
        down.move_down = true;
        volley.push(down);
    }
    volley.insert(0, primary);
    volley
}

/// A raider or boss round, fired leftward from just ahead of the shooter,
/// at one and a half times the shooter's speed. `triple` adds the boss's
/// diagonal pair.
fn gun_volley(shooter: &Entity, triple: bool) -> Volley {
    let x = shooter.rect.x - projectile::WIDTH;
    let y = shooter.rect.y + shooter.rect.h / 2 - projectile::HEIGHT / 2;
    let mut primary = Entity::projectile(
        shooter.team,
        Rect::new(x, y, projectile::WIDTH, projectile::HEIGHT),
        shooter.base_speed * raider::PROJECTILE_SPEED_FACTOR,
        shooter.speed_multi,
        shooter.damage,
    );
    primary.move_left = true;

    let mut volley = Volley::new();
    volley.push(primary.clone());
    if triple {
        let mut up = primary.clone();
        up.move_up = true;
        volley.push(up);
        let mut down = primary;
        down.move_down = true;
        volley.push(down);
    }
    volley
}
