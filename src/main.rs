mod config;
mod game;
mod pilot;
mod util;

use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn, Level};

use crate::config::RunConfig;
use crate::game::engine::{Engine, EngineConfig};
use crate::game::events::GameEvent;
use crate::game::perf::FrameStatus;
use crate::pilot::Pilot;

/// Frames between periodic stats lines in paced mode.
const STATS_INTERVAL_FRAMES: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Blastwave Simulation v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = RunConfig::load_or_default();
    config.validate()?;
    info!(
        "Configuration loaded: {} fps, {}s time limit, turbo={}",
        config.frame_rate, config.time_limit_secs, config.turbo
    );

    let mut engine = Engine::new(EngineConfig {
        seed: config.seed.unwrap_or_else(rand::random),
        ..EngineConfig::default()
    });
    let mut pilot = Pilot::new();
    engine.start();

    let tally = if config.turbo {
        run_turbo(&mut engine, &mut pilot, &config)
    } else {
        run_paced(&mut engine, &mut pilot, &config).await
    };

    let summary = RunSummary::collect(&engine, &tally);
    info!(
        "Run complete: score {} at stage {} after {}ms",
        summary.score, summary.stage, summary.game_time_ms
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Plays in real time: one pilot decision and one engine frame per interval
/// tick, until the run ends, the time limit passes, or Ctrl+C arrives.
async fn run_paced(engine: &mut Engine, pilot: &mut Pilot, config: &RunConfig) -> EventTally {
    let time_limit_ms = config.time_limit_secs * 1000;
    let mut interval = tokio::time::interval(Duration::from_secs(1) / config.frame_rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut tally = EventTally::default();
    let mut frames: u64 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let keys = pilot.decide(engine.entities());
                engine.apply_keys(&keys);
                engine.process_frame(Instant::now());
                tally.absorb(&engine.drain_events());
                frames += 1;

                if frames % STATS_INTERVAL_FRAMES == 0 {
                    info!(
                        "Frame {} | score {} | stage {} | {}",
                        frames,
                        engine.score(),
                        engine.stage().level(),
                        engine.monitor.status_message()
                    );
                    if engine.monitor.status() == FrameStatus::Degraded {
                        warn!("Simulation running over budget: {}", engine.monitor.status_message());
                    }
                }

                if !engine.is_running() {
                    break;
                }
                if engine.game_time_ms() >= time_limit_ms {
                    info!("Time limit reached at {}ms", engine.game_time_ms());
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
    tally
}

/// Steps the simulation as fast as it will go, one tick per frame, with no
/// pacing. The monitor is wrapped by hand so the summary still carries real
/// per-frame costs.
fn run_turbo(engine: &mut Engine, pilot: &mut Pilot, config: &RunConfig) -> EventTally {
    let time_limit_ms = config.time_limit_secs * 1000;
    info!(
        "Turbo run: {}s of game time without pacing",
        config.time_limit_secs
    );

    let mut tally = EventTally::default();
    while engine.is_running() && engine.game_time_ms() < time_limit_ms {
        let keys = pilot.decide(engine.entities());
        engine.apply_keys(&keys);
        engine.monitor.frame_start();
        engine.step_ticks(1);
        engine.monitor.frame_end(engine.entities().len());
        tally.absorb(&engine.drain_events());
    }
    tally
}

/// Running count of the events a run produced.
#[derive(Debug, Default)]
struct EventTally {
    shots_fired: u64,
    raiders_destroyed: u64,
    buffs_collected: u64,
    times_hit: u64,
}

impl EventTally {
    fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShotFired => self.shots_fired += 1,
                GameEvent::RaiderDestroyed { .. } => self.raiders_destroyed += 1,
                GameEvent::BuffCollected { .. } => self.buffs_collected += 1,
                GameEvent::PlayerHit { .. } => self.times_hit += 1,
                _ => {}
            }
        }
    }
}

/// End-of-run report, printed as JSON so harnesses can scrape it.
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    score: u32,
    stage: u8,
    game_time_ms: u64,
    ticks: u64,
    shots_fired: u64,
    raiders_destroyed: u64,
    buffs_collected: u64,
    times_hit: u64,
    avg_frame_us: u64,
    p95_frame_us: u64,
}

impl RunSummary {
    fn collect(engine: &Engine, tally: &EventTally) -> Self {
        Self {
            seed: engine.seed(),
            score: engine.score(),
            stage: engine.stage().level(),
            game_time_ms: engine.game_time_ms(),
            ticks: engine.ticks(),
            shots_fired: tally.shots_fired,
            raiders_destroyed: tally.raiders_destroyed,
            buffs_collected: tally.buffs_collected,
            times_hit: tally.times_hit,
            avg_frame_us: engine.monitor.average_frame_duration().as_micros() as u64,
            p95_frame_us: engine.monitor.p95_frame_duration().as_micros() as u64,
        }
    }
}
