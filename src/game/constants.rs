/// Tick scheduling constants - the simulation advances in fixed 1/30 s steps
pub mod tick {
    use std::time::Duration;

    /// Simulation tick rate in Hz
    pub const TICK_RATE: u32 = 30;
    /// Duration of one tick
    pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);
    /// Maximum ticks processed per frame when catching up after a slow frame.
    /// Backlog beyond the cap is discarded so one hitch cannot snowball.
    pub const MAX_CATCHUP_TICKS: u32 = 5;
    /// A single frame gap at or above this resets the accumulator entirely
    /// (process was suspended, debugger, laptop lid)
    pub const RESYNC_THRESHOLD: Duration = Duration::from_secs(1);
}

/// Logical play area. All entity rectangles live in this coordinate space;
/// y grows downward.
pub mod area {
    use crate::util::rect::Rect;

    /// Play area width in logical pixels
    pub const WIDTH: i32 = 960;
    /// Play area height in logical pixels
    pub const HEIGHT: i32 = 540;
    /// The play area as a rectangle, for overlap checks
    pub const BOUNDS: Rect = Rect::new(0, 0, WIDTH, HEIGHT);
}

/// Defaults shared by every entity kind
pub mod entity {
    /// Base speed as a fraction of area width covered per second
    pub const BASE_SPEED: f64 = 0.2;
    /// Speed multiplier applied on top of base speed
    pub const SPEED_MULTI: f64 = 1.0;
    /// Hit points
    pub const HIT_POINTS: i32 = 1;
    /// Damage dealt to the other side on contact/hit
    pub const DAMAGE: i32 = 1;
    /// Gun cooldown in simulation milliseconds
    pub const SHOOT_COOLDOWN_MS: u64 = 1500;
}

/// Player ship constants
pub mod player {
    use super::area;

    /// Sprite width (10% of area width)
    pub const WIDTH: i32 = (area::WIDTH as f64 * 0.1) as i32;
    /// Sprite height (5% of area width)
    pub const HEIGHT: i32 = (area::WIDTH as f64 * 0.05) as i32;
    /// Spawn y: vertical center of the play area
    pub const SPAWN_Y: i32 = (area::HEIGHT as f64 * 0.5) as i32;
    /// Maximum (and starting) hit points
    pub const MAX_HIT_POINTS: i32 = 5;
    /// Gun cooldown in simulation milliseconds
    pub const SHOOT_COOLDOWN_MS: u64 = 400;
    /// Invulnerability window armed after taking a hit
    pub const HURT_GRACE_MS: u64 = 1000;
    /// Highest rapid-fire buff level
    pub const RAPID_FIRE_MAX_LEVEL: u8 = 4;
    /// Horizontal gap between the ship's nose and a fired projectile
    pub const MUZZLE_GAP: i32 = 20;
}

/// Raider (enemy ship) constants
pub mod raider {
    use super::area;

    /// Square sprite edge (10% of area width)
    pub const SIZE: i32 = (area::WIDTH as f64 * 0.1) as i32;
    /// Spawn y range: below the HUD strip, above the bottom 10% of the area
    pub const SPAWN_Y_MIN: i32 = 10;
    pub const SPAWN_Y_MAX: i32 = (area::HEIGHT as f64 * 0.9) as i32;
    /// Projectile speed as a factor of the shooter's base speed
    pub const PROJECTILE_SPEED_FACTOR: f64 = 1.5;
}

/// Boss constants
pub mod boss {
    use super::area;

    /// Sprite width (20% of area width)
    pub const WIDTH: i32 = (area::WIDTH as f64 * 0.2) as i32;
    /// Sprite height (20% of area height)
    pub const HEIGHT: i32 = (area::HEIGHT as f64 * 0.2) as i32;
    /// Maximum (and starting) hit points
    pub const MAX_HIT_POINTS: i32 = 50;
    /// Score awarded for the kill
    pub const POINTS_ON_KILL: u32 = 50_000;
    /// Base speed as a fraction of area width per second
    pub const BASE_SPEED: f64 = 0.25;
    /// Triple-shot cooldown in simulation milliseconds
    pub const SHOOT_COOLDOWN_MS: u64 = 2500;
}

/// Projectile constants
pub mod projectile {
    use super::area;

    /// Sprite width (2% of area width)
    pub const WIDTH: i32 = (area::WIDTH as f64 * 0.02) as i32;
    /// Sprite height (4% of area height)
    pub const HEIGHT: i32 = (area::HEIGHT as f64 * 0.04) as i32;
    /// Player projectile speed multiplier
    pub const PLAYER_SPEED_MULTI: f64 = 2.0;
    /// Player projectile speed multiplier at max rapid-fire level
    pub const PLAYER_SUPER_SPEED_MULTI: f64 = 3.0;
}

/// Buff pickup constants
pub mod buff {
    use super::area;

    /// Square sprite edge (5% of area width)
    pub const SIZE: i32 = (area::WIDTH as f64 * 0.05) as i32;
    /// Spawn y band: within 10% of area height around the vertical midline
    pub const SPAWN_Y_MIN: i32 = area::HEIGHT / 2 - (area::HEIGHT as f64 * 0.1) as i32;
    pub const SPAWN_Y_MAX: i32 = area::HEIGHT / 2 + (area::HEIGHT as f64 * 0.1) as i32;
    /// A heal buff spawns each time the score crosses another multiple of this
    pub const HEAL_SCORE_INTERVAL: u32 = 10_000;
    /// A rapid-fire buff spawns each time the score crosses another multiple of this
    pub const RAPID_FIRE_SCORE_INTERVAL: u32 = 7_500;
}

/// Stage progression constants
pub mod stage {
    /// Time spent in each pre-boss stage before advancing
    pub const STAGE_DURATION_MS: u64 = 30_000;
    /// Raider spawn cooldown floor, used by the endless stage
    pub const MIN_SPAWN_COOLDOWN_MS: u64 = 300;
}
