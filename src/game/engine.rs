//! The simulation engine: owns the clock, the store, the stage machine and
//! the seeded rng, and runs the per-frame pipeline over them.
//!
//! One frame is: advance the stage timer, move everything by the frame's
//! tick count, resolve collisions, then spawn and fire. A frame that has to
//! catch up several ticks folds them into the movement step; the other
//! passes run once, exactly as a single very late frame would play out.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::game::clock::TickClock;
use crate::game::constants::tick;
use crate::game::events::GameEvent;
use crate::game::input::{GameKey, KeySet};
use crate::game::perf::FrameMonitor;
use crate::game::stage::{Stage, StageState};
use crate::game::state::{Entities, Entity};
use crate::game::systems::{collision, movement, spawning, weapons};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seed for every random roll the simulation makes. Two engines with the
    /// same seed and the same inputs play out the same game.
    pub seed: u64,
    pub max_catchup_ticks: u32,
    pub resync_threshold: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            max_catchup_ticks: tick::MAX_CATCHUP_TICKS,
            resync_threshold: tick::RESYNC_THRESHOLD,
        }
    }
}

pub struct Engine {
    seed: u64,
    clock: TickClock,
    entities: Entities,
    stage: StageState,
    rng: StdRng,
    running: bool,
    score: u32,
    events: Vec<GameEvent>,
    pub monitor: FrameMonitor,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            seed: config.seed,
            clock: TickClock::new(config.max_catchup_ticks, config.resync_threshold),
            entities: Entities::new(),
            stage: StageState::new(),
            rng: StdRng::seed_from_u64(config.seed),
            running: false,
            score: 0,
            events: Vec::new(),
            monitor: FrameMonitor::new(),
        }
    }

    /// Begins a fresh run: new player, stage one, score zero, rng rewound to
    /// the seed.
    pub fn start(&mut self) {
        info!("Game starting with seed {}", self.seed);
        self.rng = StdRng::seed_from_u64(self.seed);
        self.clock.reset();
        self.stage = StageState::new();
        self.entities.clear();
        self.entities.insert_named("player", Entity::player());
        self.score = 0;
        self.running = true;
        self.events.push(GameEvent::GameStarted);
    }

    /// Applies a key transition. Movement and fire keys drive the player's
    /// flags while it is alive; the start key begins a game when it is not.
    pub fn handle_key(&mut self, key: GameKey, pressed: bool) {
        if let Some(player) = self.entities.player_mut() {
            match key {
                GameKey::Up => player.move_up = pressed,
                GameKey::Down => player.move_down = pressed,
                GameKey::Left => player.move_left = pressed,
                GameKey::Right => player.move_right = pressed,
                GameKey::Fire => player.fire = pressed,
                GameKey::Start => {}
            }
        } else if key == GameKey::Start && pressed {
            self.start();
        }
    }

    /// Applies a whole key set at once. Used by the autopilot, which decides
    /// all five keys per frame.
    pub fn apply_keys(&mut self, keys: &KeySet) {
        for (key, pressed) in keys.entries() {
            self.handle_key(key, pressed);
        }
    }

    /// Advances the simulation to wall-clock `now`. Returns the number of
    /// ticks that were simulated.
    pub fn process_frame(&mut self, now: Instant) -> u32 {
        self.monitor.frame_start();
        let ticks = self.clock.advance(now);
        if ticks > 0 && self.running {
            self.run_frame(ticks);
        }
        self.monitor.frame_end(self.entities.len());
        ticks
    }

    /// Advances by whole ticks without consulting the wall clock, playing
    /// one frame the way a real-time caller that fell exactly this far
    /// behind would. Turbo mode and the benches drive the engine this way.
    pub fn step_ticks(&mut self, ticks: u32) {
        self.clock.advance_by(ticks);
        if self.running {
            self.run_frame(ticks);
        }
    }

    fn run_frame(&mut self, ticks: u32) {
        let now_ms = self.clock.game_time_ms();

        if let Some(stage) = self.stage.update(now_ms) {
            info!("Stage {} begins at {}ms", stage.level(), now_ms);
            self.events.push(GameEvent::StageAdvanced {
                stage: stage.level(),
            });
        }

        movement::update(&mut self.entities, ticks);

        let had_boss = self.entities.boss().is_some();
        let points = collision::update(&mut self.entities, now_ms, &mut self.events);
        if points > 0 {
            self.score += points;
            debug!("Scored {}, total {}", points, self.score);
        }
        if had_boss && self.entities.boss().is_none() && self.stage.on_boss_defeated() {
            info!("Boss defeated, {} points at {}ms", self.score, now_ms);
        }

        if self.entities.player().is_none() {
            self.game_over();
            return;
        }

        spawning::update(
            &mut self.entities,
            &mut self.stage,
            self.score,
            now_ms,
            &mut self.rng,
            &mut self.events,
        );
        weapons::update(&mut self.entities, now_ms, &mut self.events);
    }

    fn game_over(&mut self) {
        info!(
            "Game over: {} points at {}ms",
            self.score,
            self.clock.game_time_ms()
        );
        self.running = false;
        self.entities.clear();
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Stops the run and clears everything back to the pre-start state.
    pub fn reset(&mut self) {
        self.running = false;
        self.clock.reset();
        self.stage = StageState::new();
        self.entities.clear();
        self.score = 0;
        self.events.clear();
    }

    /// Drains the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stage(&self) -> Stage {
        self.stage.stage()
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn game_time_ms(&self) -> u64 {
        self.clock.game_time_ms()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn player_hit_points(&self) -> i32 {
        self.entities.player_hit_points()
    }

    pub fn boss_health_percent(&self) -> i32 {
        self.entities.boss_health_percent()
    }

    pub fn is_player_invulnerable(&self) -> bool {
        self.entities.is_player_invulnerable(self.clock.game_time_ms())
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }
}
