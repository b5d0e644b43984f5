//! Pairwise collision resolution: damage, kills, and buff pickup.
//!
//! The broad phase is a deliberate O(n^2) sweep over an id snapshot - entity
//! counts are tens, not thousands, and the snapshot keeps the pass stable
//! while kills remove entries mid-iteration. Projectiles are skipped as
//! targets; they still act on others as the second half of each pair, and
//! die by taking contact damage from whatever they hit.

use crate::game::constants::player;
use crate::game::events::GameEvent;
use crate::game::state::{BuffKind, Entities, Entity, EntityKind};

/// Resolves every overlapping pair once for this frame. Returns the score
/// earned from kills; emits kill/hit/pickup events.
pub fn update(entities: &mut Entities, now_ms: u64, events: &mut Vec<GameEvent>) -> u32 {
    let ids = entities.ids();
    let mut points = 0u32;

    for target_id in &ids {
        // Removed by an earlier pair, or not a valid target
        let Some(target) = entities.get(target_id) else {
            continue;
        };
        if target.kind.is_projectile() {
            continue;
        }

        for other_id in &ids {
            if other_id == target_id {
                continue;
            }
            let Some(target) = entities.get(target_id) else {
                break;
            };
            let Some(other) = entities.get(other_id) else {
                continue;
            };
            if !target.rect.overlaps(&other.rect) {
                continue;
            }

            if target.team != other.team {
                let damage_to_target = other.damage;
                let damage_to_other = target.damage;
                let ranged_hit = other.kind.is_projectile();

                if let Some(target) = entities.get_mut(target_id) {
                    if apply_damage(target, damage_to_target, ranged_hit, now_ms)
                        && target.kind.is_player()
                    {
                        events.push(GameEvent::PlayerHit {
                            hit_points_left: target.hit_points,
                        });
                    }
                }
                if let Some(other) = entities.get_mut(other_id) {
                    // The target is never a projectile, so this side is
                    // always a contact hit
                    if apply_damage(other, damage_to_other, false, now_ms)
                        && other.kind.is_player()
                    {
                        events.push(GameEvent::PlayerHit {
                            hit_points_left: other.hit_points,
                        });
                    }
                }

                points += reap(entities, target_id, events);
                points += reap(entities, other_id, events);
            } else if target.kind.is_player() {
                if let Some(kind) = other.kind.buff_kind() {
                    if let Some(target) = entities.get_mut(target_id) {
                        apply_buff(target, kind);
                    }
                    events.push(GameEvent::BuffCollected { kind });
                    entities.remove(other_id);
                }
            }
        }
    }

    points
}

/// Applies `amount` damage to one side of a pair. Contact hits respect
/// `hurt_on_touch`; the player additionally has a post-hit grace window and
/// pays one rapid-fire level per hit. Returns true if damage landed.
fn apply_damage(entity: &mut Entity, amount: i32, ranged: bool, now_ms: u64) -> bool {
    if !entity.damageable {
        return false;
    }
    if !ranged && !entity.hurt_on_touch {
        return false;
    }
    if entity.kind.is_player() {
        if now_ms < entity.vulnerable_at_ms {
            return false;
        }
        entity.hit_points -= amount;
        if entity.rapid_fire_level > 0 {
            entity.rapid_fire_level -= 1;
        }
        entity.vulnerable_at_ms = now_ms + player::HURT_GRACE_MS;
        return true;
    }
    entity.hit_points -= amount;
    true
}

/// Removes an entity that ran out of hit points, crediting its kill value.
fn reap(entities: &mut Entities, id: &str, events: &mut Vec<GameEvent>) -> u32 {
    let dead = entities
        .get(id)
        .is_some_and(|entity| entity.hit_points < 1);
    if !dead {
        return 0;
    }
    let Some(entity) = entities.remove(id) else {
        return 0;
    };
    match entity.kind {
        EntityKind::Raider { .. } => events.push(GameEvent::RaiderDestroyed {
            id: id.to_string(),
            points: entity.points_on_kill,
        }),
        EntityKind::Boss => events.push(GameEvent::BossDefeated),
        // Player death becomes GameOver at the engine level; projectile
        // burn-up is silent
        _ => {}
    }
    entity.points_on_kill
}

fn apply_buff(player_entity: &mut Entity, kind: BuffKind) {
    match kind {
        BuffKind::Heal => {
            if player_entity.hit_points < player::MAX_HIT_POINTS {
                player_entity.hit_points += 1;
            }
        }
        BuffKind::RapidFire => {
            if player_entity.rapid_fire_level < player::RAPID_FIRE_MAX_LEVEL {
                player_entity.rapid_fire_level += 1;
            }
        }
    }
}
