//! Entity records and the keyed entity store.
//!
//! Every simulated object - the player ship, raiders, the boss, projectiles,
//! buff pickups - is one [`Entity`] record in a single string-keyed store.
//! The player and boss live under the well-known ids `"player"` and `"boss"`;
//! everything else gets a sequential numeric id from a per-run counter.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::game::constants::{area, boss, buff, entity, player, raider, stage};
use crate::util::rect::Rect;

pub type EntityId = String;

/// Team tag. Entities on the same team never damage each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    pub const NEUTRAL: Team = Team(0);
    pub const ALLY: Team = Team(1);
    pub const RAIDER: Team = Team(2);
}

/// Raider strength tiers. Higher tiers are tougher, slower, and worth more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaiderTier {
    One,
    Two,
    Three,
}

impl RaiderTier {
    pub fn hit_points(self) -> i32 {
        match self {
            RaiderTier::One => 1,
            RaiderTier::Two => 2,
            RaiderTier::Three => 3,
        }
    }

    pub fn points_on_kill(self) -> u32 {
        match self {
            RaiderTier::One => 100,
            RaiderTier::Two => 300,
            RaiderTier::Three => 600,
        }
    }

    /// Tier one rushes in unarmed; higher tiers shoot back.
    pub fn has_gun(self) -> bool {
        !matches!(self, RaiderTier::One)
    }

    /// Tier three crosses the screen diagonally, bouncing off the top and
    /// bottom edges.
    pub fn dives(self) -> bool {
        matches!(self, RaiderTier::Three)
    }

    /// Base speed range in thousandths of area-widths per second. Unarmed
    /// tier-one raiders are fast; gunners come in slow.
    pub fn speed_range(self) -> Range<u32> {
        match self {
            RaiderTier::One => 400..600,
            RaiderTier::Two => 200..400,
            RaiderTier::Three => 200..300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    Heal,
    RapidFire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Raider { tier: RaiderTier },
    Boss,
    Projectile,
    Buff { kind: BuffKind },
}

impl EntityKind {
    pub fn is_player(&self) -> bool {
        matches!(self, EntityKind::Player)
    }

    pub fn is_raider(&self) -> bool {
        matches!(self, EntityKind::Raider { .. })
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self, EntityKind::Projectile)
    }

    pub fn buff_kind(&self) -> Option<BuffKind> {
        match self {
            EntityKind::Buff { kind } => Some(*kind),
            _ => None,
        }
    }
}

/// One simulated object.
///
/// Speeds are fractions of the area *width* covered per second, so an entity
/// with `base_speed 0.5` and `speed_multi 1.0` crosses the screen in two
/// seconds. `rect` is integer pixels in the 960x540 logical area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub team: Team,
    pub rect: Rect,

    pub base_speed: f64,
    pub speed_multi: f64,
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Player trigger; raider and boss guns fire whenever their cooldown lapses
    pub fire: bool,

    /// Flip vertical movement flags instead of crossing the top/bottom edge
    pub bounce_vertical: bool,
    /// When false, the left/right edges bounce too (boss); when true the
    /// entity may fly off horizontally and be despawned
    pub exit_horizontal: bool,

    pub hit_points: i32,
    pub damage: i32,
    pub damageable: bool,
    /// Contact with an opposing non-projectile hurts this entity
    pub hurt_on_touch: bool,
    pub points_on_kill: u32,

    pub can_shoot: bool,
    pub shoot_cooldown_ms: u64,
    /// Simulation-time deadline after which the gun may fire again
    pub shoot_ready_at_ms: u64,

    /// Player only: rapid-fire buff level, 0..=4
    pub rapid_fire_level: u8,
    /// Player only: simulation-time deadline of the post-hit grace window
    pub vulnerable_at_ms: u64,
}

impl Entity {
    fn base(kind: EntityKind, team: Team, rect: Rect) -> Self {
        Self {
            kind,
            team,
            rect,
            base_speed: entity::BASE_SPEED,
            speed_multi: entity::SPEED_MULTI,
            move_up: false,
            move_down: false,
            move_left: false,
            move_right: false,
            fire: false,
            bounce_vertical: false,
            exit_horizontal: true,
            hit_points: entity::HIT_POINTS,
            damage: entity::DAMAGE,
            damageable: true,
            hurt_on_touch: true,
            points_on_kill: 0,
            can_shoot: false,
            shoot_cooldown_ms: entity::SHOOT_COOLDOWN_MS,
            shoot_ready_at_ms: 0,
            rapid_fire_level: 0,
            vulnerable_at_ms: 0,
        }
    }

    /// The player ship: left edge, vertical center, clamped to the area by
    /// the movement system.
    pub fn player() -> Self {
        let rect = Rect::new(0, player::SPAWN_Y, player::WIDTH, player::HEIGHT);
        Self {
            hit_points: player::MAX_HIT_POINTS,
            can_shoot: true,
            shoot_cooldown_ms: player::SHOOT_COOLDOWN_MS,
            ..Self::base(EntityKind::Player, Team::ALLY, rect)
        }
    }

    /// A raider entering at the right edge. The caller rolls tier, spawn row
    /// and speed; tier three divers additionally get a vertical flag.
    pub fn raider(tier: RaiderTier, y: i32, base_speed: f64, speed_multi: f64) -> Self {
        let rect = Rect::new(area::WIDTH, y, raider::SIZE, raider::SIZE);
        Self {
            base_speed,
            speed_multi,
            move_left: true,
            bounce_vertical: true,
            hit_points: tier.hit_points(),
            points_on_kill: tier.points_on_kill(),
            can_shoot: tier.has_gun(),
            ..Self::base(EntityKind::Raider { tier }, Team::RAIDER, rect)
        }
    }

    /// The boss: bottom-right corner, bouncing on all four edges, immune to
    /// contact damage so ramming it is not a strategy.
    pub fn boss() -> Self {
        let rect = Rect::new(
            area::WIDTH - boss::WIDTH,
            area::HEIGHT - boss::HEIGHT,
            boss::WIDTH,
            boss::HEIGHT,
        );
        Self {
            base_speed: boss::BASE_SPEED,
            move_left: true,
            bounce_vertical: true,
            exit_horizontal: false,
            hit_points: boss::MAX_HIT_POINTS,
            hurt_on_touch: false,
            points_on_kill: boss::POINTS_ON_KILL,
            can_shoot: true,
            shoot_cooldown_ms: boss::SHOOT_COOLDOWN_MS,
            ..Self::base(EntityKind::Boss, Team::RAIDER, rect)
        }
    }

    /// A projectile inheriting its shooter's team and damage. The caller sets
    /// the movement flags for its heading.
    pub fn projectile(
        team: Team,
        rect: Rect,
        base_speed: f64,
        speed_multi: f64,
        damage: i32,
    ) -> Self {
        Self {
            base_speed,
            speed_multi,
            damage,
            ..Self::base(EntityKind::Projectile, team, rect)
        }
    }

    /// A buff pickup drifting in from the right edge. Ally team and
    /// indestructible, so raider fire passes straight through it.
    pub fn buff(kind: BuffKind, y: i32) -> Self {
        let rect = Rect::new(area::WIDTH, y, buff::SIZE, buff::SIZE);
        Self {
            move_left: true,
            damageable: false,
            damage: 0,
            ..Self::base(EntityKind::Buff { kind }, Team::ALLY, rect)
        }
    }
}

/// The keyed entity store, plus the spawn bookkeeping that belongs with it:
/// the raider population count and spawn cooldown, and the score thresholds
/// at which the next buffs drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    entities: HashMap<EntityId, Entity, FxBuildHasher>,
    next_id: u64,
    raider_count: usize,
    raider_spawn_cooldown_ms: u64,
    raider_spawn_ready_at_ms: u64,
    next_heal_score: u32,
    next_rapid_fire_score: u32,
}

impl Entities {
    pub fn new() -> Self {
        Self {
            entities: HashMap::default(),
            next_id: 0,
            raider_count: 0,
            raider_spawn_cooldown_ms: stage::MIN_SPAWN_COOLDOWN_MS,
            raider_spawn_ready_at_ms: 0,
            next_heal_score: buff::HEAL_SCORE_INTERVAL,
            next_rapid_fire_score: buff::RAPID_FIRE_SCORE_INTERVAL,
        }
    }

    /// Inserts under the next counter id. Raider insertion is gated by the
    /// spawn cooldown: a raider arriving while the cooldown is live is
    /// rejected, an accepted one re-arms it.
    pub fn insert(&mut self, entity: Entity, now_ms: u64) -> Option<EntityId> {
        if entity.kind.is_raider() {
            if now_ms < self.raider_spawn_ready_at_ms {
                return None;
            }
            self.raider_count += 1;
            self.raider_spawn_ready_at_ms = now_ms + self.raider_spawn_cooldown_ms;
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.entities.insert(id.clone(), entity);
        Some(id)
    }

    /// Inserts under a well-known id (`"player"`, `"boss"`).
    pub fn insert_named(&mut self, id: impl Into<EntityId>, entity: Entity) {
        self.entities.insert(id.into(), entity);
    }

    /// Removes and returns an entity, maintaining the raider count. Whether
    /// the removal awards `points_on_kill` is the caller's decision.
    pub fn remove(&mut self, id: &str) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        if entity.kind.is_raider() {
            self.raider_count -= 1;
        }
        Some(entity)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 0;
        self.raider_count = 0;
        self.raider_spawn_ready_at_ms = 0;
        self.next_heal_score = buff::HEAL_SCORE_INTERVAL;
        self.next_rapid_fire_score = buff::RAPID_FIRE_SCORE_INTERVAL;
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.get("player")
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.get_mut("player")
    }

    pub fn boss(&self) -> Option<&Entity> {
        self.entities.get("boss")
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Snapshot of all ids in a stable order: shorter ids first, then
    /// lexical. Numeric counter ids therefore come out in spawn order, and
    /// the systems that mutate the store mid-iteration walk the same
    /// sequence every run.
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().cloned().collect();
        ids.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        ids
    }

    pub fn raider_count(&self) -> usize {
        self.raider_count
    }

    /// Sets the raider spawn cooldown applied on the next accepted spawn
    /// (stage tuning).
    pub fn set_raider_spawn_cooldown(&mut self, cooldown_ms: u64) {
        self.raider_spawn_cooldown_ms = cooldown_ms;
    }

    pub fn raider_spawn_ready(&self, now_ms: u64) -> bool {
        now_ms >= self.raider_spawn_ready_at_ms
    }

    /// True once the score crosses the next heal threshold; crossing
    /// consumes it and arms the following one.
    pub fn heal_buff_due(&mut self, score: u32) -> bool {
        if score > self.next_heal_score {
            self.next_heal_score += buff::HEAL_SCORE_INTERVAL;
            return true;
        }
        false
    }

    /// True once the score crosses the next rapid-fire threshold; crossing
    /// consumes it and arms the following one.
    pub fn rapid_fire_buff_due(&mut self, score: u32) -> bool {
        if score > self.next_rapid_fire_score {
            self.next_rapid_fire_score += buff::RAPID_FIRE_SCORE_INTERVAL;
            return true;
        }
        false
    }

    /// Player hit points, or 0 when the player is gone.
    pub fn player_hit_points(&self) -> i32 {
        self.player().map_or(0, |p| p.hit_points)
    }

    /// True while the player's post-hit grace window is live.
    pub fn is_player_invulnerable(&self, now_ms: u64) -> bool {
        self.player().is_some_and(|p| now_ms < p.vulnerable_at_ms)
    }

    /// Boss health as a whole percentage, or 0 when no boss is up.
    pub fn boss_health_percent(&self) -> i32 {
        self.boss().map_or(0, |b| {
            (f64::from(b.hit_points) / f64::from(boss::MAX_HIT_POINTS) * 100.0) as i32
        })
    }
}

impl Default for Entities {
    fn default() -> Self {
        Self::new()
    }
}
