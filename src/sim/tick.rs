//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically: control
//! intents, movement, collisions, then the spawn ramp.

use std::time::Duration;

use super::collision;
use super::snapshot::SessionSnapshot;
use super::spawn;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Rotate counter-clockwise (+5 degrees)
    pub turn_left: bool,
    /// Rotate clockwise (-5 degrees)
    pub turn_right: bool,
    /// Move forward along the heading
    pub thrust: bool,
    /// Fire a volley (rate-limited)
    pub fire: bool,
    /// Start over (only honored on the game-over screen)
    pub restart: bool,
    /// Ask the host to exit
    pub quit: bool,
    /// Near-infinite lives (debug/testing, needs the `debug-commands` feature)
    pub invulnerable: bool,
}

impl GameState {
    /// Fire a volley if the rate limit allows it
    ///
    /// Honored only when at least `FIRE_COOLDOWN_MS` passed since the last
    /// honored command; otherwise the command is dropped, not queued. The
    /// new bullets join the session and are also returned.
    pub fn apply_fire_intent(&mut self, now: Duration) -> Vec<Bullet> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let cooldown = Duration::from_millis(FIRE_COOLDOWN_MS);
        if let Some(last) = self.last_fire {
            if now.saturating_sub(last) < cooldown {
                log::trace!("Fire dropped: {:?} since last volley", now.saturating_sub(last));
                return Vec::new();
            }
        }
        self.last_fire = Some(now);

        let mut volley = self.ship.shoot();
        for bullet in &mut volley {
            bullet.id = self.next_entity_id();
        }
        log::trace!("Volley of {} at {:?}", volley.len(), now);
        self.events.push(GameEvent::VolleyFired {
            bullets: volley.len(),
        });
        self.bullets.extend(volley.iter().cloned());
        volley
    }
}

/// Advance the session by one frame and return what the host should draw
///
/// `now` is the host's monotonic clock, used only for fire-rate limiting.
pub fn tick(state: &mut GameState, input: &TickInput, now: Duration) -> SessionSnapshot {
    if input.quit {
        state.events.push(GameEvent::QuitRequested);
    }

    // Frozen until the player restarts
    if state.phase == GamePhase::GameOver {
        if input.restart && !input.quit {
            state.restart();
        }
        return SessionSnapshot::capture(state);
    }

    state.time_ticks += 1;

    if input.invulnerable {
        if cfg!(feature = "debug-commands") {
            log::debug!("Invulnerability enabled");
            state.ship.lives = INVULNERABLE_LIVES;
        } else {
            log::trace!("Invulnerability ignored without the debug-commands feature");
        }
    }

    if input.fire {
        state.apply_fire_intent(now);
    }

    // Movement
    let field = state.field();
    state.ship.update(input, &field);
    for asteroid in &mut state.asteroids {
        asteroid.update(&field);
    }
    for bullet in &mut state.bullets {
        bullet.update();
    }
    state.bullets.retain(|b| b.in_field(&field));

    let report = collision::resolve(state);
    if !report.is_empty() {
        log::debug!(
            "Tick {}: {} asteroid(s) shot, {} ship hit(s)",
            state.time_ticks,
            report.destroyed.len(),
            report.ship_hits
        );
    }

    if state.phase == GamePhase::Playing {
        spawn::advance_ramp(state);
    }

    SessionSnapshot::capture(state)
}
