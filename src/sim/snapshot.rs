//! Per-tick view of the session handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::state::{Asteroid, Bullet, GameEvent, GamePhase, GameState, Ship};

/// Current upgrade levels, as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffLevels {
    pub bullet_speed: f32,
    pub bullet_count: u32,
    pub fire_directions: usize,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub lives: u32,
    /// Asteroids shot down this session
    pub destroyed: u32,
    pub buffs: BuffLevels,
    /// Events raised since the previous snapshot
    pub events: Vec<GameEvent>,
}

impl SessionSnapshot {
    /// Copy out the drawable state and drain pending events
    pub fn capture(state: &mut GameState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            ship: state.ship.clone(),
            asteroids: state.asteroids.clone(),
            bullets: state.bullets.clone(),
            lives: state.ship.lives,
            destroyed: state.destroyed,
            buffs: BuffLevels {
                bullet_speed: state.ship.bullet_speed,
                bullet_count: state.ship.bullet_count,
                fire_directions: state.ship.fire_offsets.len(),
            },
            events: std::mem::take(&mut state.events),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&GameEvent::QuitRequested)
    }
}
