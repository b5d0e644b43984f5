//! Entity creation: the boss entrance, the raider trickle, and
//! score-threshold buff drops.
//!
//! All randomness flows through the engine's seeded rng, so a fixed seed
//! replays the same waves.

use rand::rngs::StdRng;
use rand::Rng;

use crate::game::constants::buff;
use crate::game::constants::raider as raider_consts;
use crate::game::events::GameEvent;
use crate::game::stage::StageState;
use crate::game::state::{BuffKind, Entities, Entity, RaiderTier};

pub fn update(
    entities: &mut Entities,
    stage: &mut StageState,
    score: u32,
    now_ms: u64,
    rng: &mut StdRng,
    events: &mut Vec<GameEvent>,
) {
    if stage.take_boss_spawn() && entities.boss().is_none() {
        let mut boss = Entity::boss();
        boss.move_up = rng.gen_bool(0.5);
        boss.move_down = !boss.move_up;
        entities.insert_named("boss", boss);
        events.push(GameEvent::BossSpawned);
    }

    let tuning = stage.tuning();
    entities.set_raider_spawn_cooldown(tuning.spawn_cooldown_ms);
    if entities.raider_count() < tuning.max_raiders && entities.raider_spawn_ready(now_ms) {
        let raider = roll_raider(stage.stage().level(), tuning.speed_multi, rng);
        entities.insert(raider, now_ms);
    }

    if entities.heal_buff_due(score) {
        entities.insert(Entity::buff(BuffKind::Heal, roll_buff_y(rng)), now_ms);
    }
    if entities.rapid_fire_buff_due(score) {
        entities.insert(Entity::buff(BuffKind::RapidFire, roll_buff_y(rng)), now_ms);
    }
}

/// Rolls a raider on a 0..10 seed: 9 is a tier-three, 5..=8 a tier-two,
/// the rest tier-one. Tiers the stage has not unlocked fall back to
/// tier-one.
fn roll_raider(stage_level: u8, speed_multi: f64, rng: &mut StdRng) -> Entity {
    let roll = rng.gen_range(0..10);
    let tier = if roll > 8 {
        if stage_level >= 3 {
            RaiderTier::Three
        } else {
            RaiderTier::One
        }
    } else if roll > 4 {
        if stage_level >= 2 {
            RaiderTier::Two
        } else {
            RaiderTier::One
        }
    } else {
        RaiderTier::One
    };

    let y = rng.gen_range(raider_consts::SPAWN_Y_MIN..raider_consts::SPAWN_Y_MAX);
    let base_speed = f64::from(rng.gen_range(tier.speed_range())) / 1000.0;
    let mut raider = Entity::raider(tier, y, base_speed, speed_multi);
    if tier.dives() {
        raider.move_up = rng.gen_bool(0.5);
        raider.move_down = !raider.move_up;
    }
    raider
}

fn roll_buff_y(rng: &mut StdRng) -> i32 {
    rng.gen_range(buff::SPAWN_Y_MIN..buff::SPAWN_Y_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::stage as stage_consts;
    use crate::game::state::EntityKind;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn stage_at_boss() -> StageState {
        let mut stage = StageState::new();
        for _ in 0..3 {
            stage.update(3 * stage_consts::STAGE_DURATION_MS);
        }
        stage
    }

    fn run(
        entities: &mut Entities,
        stage: &mut StageState,
        score: u32,
        now_ms: u64,
        rng: &mut StdRng,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        update(entities, stage, score, now_ms, rng, &mut events);
        events
    }

    #[test]
    fn test_boss_spawns_once_when_stage_arrives() {
        let mut entities = Entities::new();
        let mut stage = stage_at_boss();
        let mut rng = rng();
        let events = run(&mut entities, &mut stage, 0, 0, &mut rng);
        assert!(events.contains(&GameEvent::BossSpawned));
        let boss = entities.boss().unwrap();
        assert!(boss.move_up != boss.move_down);

        // The pending flag was consumed; no second boss
        let events = run(&mut entities, &mut stage, 0, 100, &mut rng);
        assert!(!events.contains(&GameEvent::BossSpawned));
        assert_eq!(
            entities.iter().filter(|(_, e)| e.kind == EntityKind::Boss).count(),
            1
        );
    }

    #[test]
    fn test_raider_spawns_respect_cooldown() {
        let mut entities = Entities::new();
        let mut stage = StageState::new();
        let mut rng = rng();
        run(&mut entities, &mut stage, 0, 0, &mut rng);
        assert_eq!(entities.raider_count(), 1);

        // Stage one cools down for 900ms
        run(&mut entities, &mut stage, 0, 500, &mut rng);
        assert_eq!(entities.raider_count(), 1);
        run(&mut entities, &mut stage, 0, 900, &mut rng);
        assert_eq!(entities.raider_count(), 2);
    }

    #[test]
    fn test_raider_count_capped_by_stage() {
        let mut entities = Entities::new();
        let mut stage = StageState::new();
        let mut rng = rng();
        let cap = stage.tuning().max_raiders;
        let mut now_ms = 0;
        for _ in 0..cap * 3 {
            run(&mut entities, &mut stage, 0, now_ms, &mut rng);
            now_ms += 1_000;
        }
        assert_eq!(entities.raider_count(), cap);
    }

    #[test]
    fn test_stage_one_only_rolls_tier_one() {
        let mut entities = Entities::new();
        let mut stage = StageState::new();
        let mut rng = rng();
        let mut now_ms = 0;
        for _ in 0..4 {
            run(&mut entities, &mut stage, 0, now_ms, &mut rng);
            now_ms += 1_000;
        }
        assert!(entities.raider_count() > 0);
        for (_, entity) in entities.iter() {
            assert_eq!(entity.kind, EntityKind::Raider { tier: RaiderTier::One });
            assert!(!entity.can_shoot);
        }
    }

    #[test]
    fn test_rolled_raiders_match_their_tier() {
        let mut entities = Entities::new();
        let mut stage = stage_at_boss();
        stage.on_boss_defeated();
        let mut rng = rng();
        let multi = stage.tuning().speed_multi;
        let mut now_ms = 0;
        // Endless stage, so every tier is unlocked; drain the cap a few
        // times to sample widely
        for round in 0..40 {
            run(&mut entities, &mut stage, 0, now_ms, &mut rng);
            now_ms += 1_000;
            if round % 10 == 9 {
                let ids = entities.ids();
                for id in &ids {
                    let entity = &entities.get(id).unwrap().clone();
                    let EntityKind::Raider { tier } = entity.kind else {
                        continue;
                    };
                    let range = tier.speed_range();
                    let lo = f64::from(range.start) / 1000.0;
                    let hi = f64::from(range.end) / 1000.0;
                    assert!(entity.base_speed >= lo && entity.base_speed < hi);
                    assert_eq!(entity.speed_multi, multi);
                    assert_eq!(entity.can_shoot, tier.has_gun());
                    if tier.dives() {
                        assert!(entity.move_up != entity.move_down);
                    } else {
                        assert!(!entity.move_up && !entity.move_down);
                    }
                    entities.remove(id);
                }
            }
        }
    }

    #[test]
    fn test_heal_buff_drops_past_score_threshold() {
        let mut entities = Entities::new();
        let mut stage = StageState::new();
        let mut rng = rng();
        let heals = |entities: &Entities| {
            entities
                .iter()
                .filter(|(_, e)| e.kind == EntityKind::Buff { kind: BuffKind::Heal })
                .count()
        };
        // At the threshold exactly nothing drops; the crossing is strict
        run(&mut entities, &mut stage, buff::HEAL_SCORE_INTERVAL, 0, &mut rng);
        assert_eq!(heals(&entities), 0);

        run(&mut entities, &mut stage, buff::HEAL_SCORE_INTERVAL + 1, 100, &mut rng);
        assert_eq!(heals(&entities), 1);
        let (_, heal) = entities
            .iter()
            .find(|(_, e)| e.kind == EntityKind::Buff { kind: BuffKind::Heal })
            .unwrap();
        assert!(heal.rect.y >= buff::SPAWN_Y_MIN && heal.rect.y < buff::SPAWN_Y_MAX);

        // Consumed: the same score does not drop another
        run(&mut entities, &mut stage, buff::HEAL_SCORE_INTERVAL + 1, 200, &mut rng);
        assert_eq!(heals(&entities), 1);
    }

    #[test]
    fn test_rapid_fire_buff_has_own_threshold() {
        let mut entities = Entities::new();
        let mut stage = StageState::new();
        let mut rng = rng();
        run(
            &mut entities,
            &mut stage,
            buff::RAPID_FIRE_SCORE_INTERVAL + 1,
            0,
            &mut rng,
        );
        assert!(entities
            .iter()
            .any(|(_, e)| e.kind == EntityKind::Buff { kind: BuffKind::RapidFire }));
        assert!(!entities
            .iter()
            .any(|(_, e)| e.kind == EntityKind::Buff { kind: BuffKind::Heal }));
    }
}
