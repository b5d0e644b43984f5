use tracing::warn;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Fixed seed for the simulation rng; `None` rolls a fresh one per run
    pub seed: Option<u64>,
    /// Host frame rate for the real-time loop (the simulation stays at 30Hz)
    pub frame_rate: u32,
    /// Run the simulation as fast as possible instead of in real time
    pub turbo: bool,
    /// Stop the run after this much play time
    pub time_limit_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: 60,
            turbo: false,
            time_limit_secs: 180,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("frame rate must be 1-1000, got {0}")]
    FrameRate(u32),
    #[error("time limit must be at least 1 second")]
    TimeLimit,
}

impl RunConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(seed) = std::env::var("BLASTWAVE_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.seed = Some(parsed);
            } else {
                warn!("Invalid BLASTWAVE_SEED '{}', rolling a random seed", seed);
            }
        }

        if let Ok(rate) = std::env::var("BLASTWAVE_FRAME_RATE") {
            if let Ok(parsed) = rate.parse::<u32>() {
                if parsed > 0 && parsed <= 1000 {
                    config.frame_rate = parsed;
                } else {
                    warn!("BLASTWAVE_FRAME_RATE must be 1-1000, using default");
                }
            } else {
                warn!("Invalid BLASTWAVE_FRAME_RATE '{}', using default", rate);
            }
        }

        if let Ok(turbo) = std::env::var("BLASTWAVE_TURBO") {
            config.turbo = matches!(turbo.as_str(), "1" | "true" | "yes");
        }

        if let Ok(limit) = std::env::var("BLASTWAVE_TIME_LIMIT_SECS") {
            if let Ok(parsed) = limit.parse::<u64>() {
                if parsed > 0 {
                    config.time_limit_secs = parsed;
                } else {
                    warn!("BLASTWAVE_TIME_LIMIT_SECS must be > 0, using default");
                }
            } else {
                warn!("Invalid BLASTWAVE_TIME_LIMIT_SECS '{}', using default", limit);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > 1000 {
            return Err(ConfigError::FrameRate(self.frame_rate));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::TimeLimit);
        }
        Ok(())
    }
}
