//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timestamps passed in by the caller, never read from a clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve};
pub use rect::{Rect, rotated_extent};
pub use snapshot::{BuffLevels, SessionSnapshot};
pub use state::{
    Asteroid, AsteroidVariant, BuffKind, Bullet, GameEvent, GamePhase, GameState, Ship,
};
pub use tick::{TickInput, tick};
