//! Astro Blast - an asteroid shooter with permanent weapon upgrades
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawning, session state)
//! - `settings`: Play-field and seed configuration
//!
//! Rendering, raw input and frame pacing belong to the host. The host feeds
//! a [`sim::TickInput`] into [`sim::tick`] once per frame and draws the
//! returned [`sim::SessionSnapshot`].

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play-field dimensions
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 1280.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 720.0;
    /// Frame clock the host is expected to drive `tick` at
    pub const DEFAULT_TICK_RATE: u32 = 60;

    /// Ship body (unrotated) - nose points up
    pub const SHIP_WIDTH: f32 = 30.0;
    pub const SHIP_HEIGHT: f32 = 25.0;
    /// Thrust step per tick (pixels)
    pub const SHIP_SPEED: f32 = 5.0;
    /// Heading change per tick while a turn intent is held (degrees)
    pub const SHIP_TURN_RATE: f32 = 5.0;
    pub const SHIP_START_LIVES: u32 = 3;

    /// Bullet speed upgrades: 10 -> 15 -> 16
    pub const BULLET_START_SPEED: f32 = 10.0;
    pub const BULLET_SPEED_STEP: f32 = 5.0;
    pub const BULLET_SPEED_CAP: f32 = 16.0;
    /// Informational volley size upgrades
    pub const BULLET_START_COUNT: u32 = 1;
    pub const BULLET_COUNT_CAP: u32 = 5;
    /// Maximum number of fire-direction offsets
    pub const FIRE_DIRECTION_CAP: usize = 12;
    pub const BULLET_SIZE: f32 = 5.0;

    pub const ASTEROID_SIZE: f32 = 40.0;
    /// Drift speed range (inclusive, pixels per tick)
    pub const ASTEROID_MIN_SPEED: u8 = 1;
    pub const ASTEROID_MAX_SPEED: u8 = 3;
    /// Silhouette outline vertex count and the box they are drawn in
    pub const ASTEROID_OUTLINE_POINTS: usize = 8;
    pub const ASTEROID_OUTLINE_MIN: u8 = 10;
    pub const ASTEROID_OUTLINE_MAX: u8 = 30;

    pub const INITIAL_ASTEROIDS: usize = 5;
    /// Ticks between difficulty-ramp spawns
    pub const SPAWN_RAMP_TICKS: u32 = 400;
    /// Probability that a spawn is a blue (multi-direction) asteroid
    pub const MULTI_CHANCE: f64 = 0.1;
    /// Probability (second draw) that a non-blue spawn is green or red
    pub const SPECIAL_CHANCE: f64 = 0.2;

    /// Minimum wall-clock gap between honored fire commands
    pub const FIRE_COOLDOWN_MS: u64 = 500;
    /// Lives granted by the debug invulnerability command
    pub const INVULNERABLE_LIVES: u32 = 99_999;
}

/// Wrap a heading into [0, 360)
///
/// Not a modulo: anything at or past 360 snaps to 0 and anything negative
/// snaps to 359. Headings only ever move in 5 degree steps, so a single
/// snap is always enough.
#[inline]
pub fn normalize_heading(angle: f32) -> f32 {
    if angle >= 360.0 {
        0.0
    } else if angle < 0.0 {
        359.0
    } else {
        angle
    }
}

/// Per-tick displacement for a heading in degrees (0 = screen up)
#[inline]
pub fn displacement(angle_deg: f32, speed: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(-speed * theta.sin(), -speed * theta.cos())
}

/// Angle in degrees from `from` toward `to`, measured with `atan2(dy, dx)`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}
