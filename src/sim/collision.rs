//! Collision detection and resolution
//!
//! Runs once per tick after movement. Bullets are resolved before the ship,
//! so an asteroid shot down this tick can no longer cost a life.

use super::spawn::spawn_asteroid;
use super::state::{AsteroidVariant, GameEvent, GamePhase, GameState};

/// What collision resolution did during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Variants of the asteroids shot down, in resolution order
    pub destroyed: Vec<AsteroidVariant>,
    /// Asteroids that rammed the ship
    pub ship_hits: usize,
}

impl CollisionReport {
    /// Nothing collided this tick
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty() && self.ship_hits == 0
    }
}

/// Resolve every bullet against the asteroid field
///
/// Each bullet takes out at most one asteroid: the first one it overlaps.
/// Replacements join the field immediately, so a later bullet in the same
/// tick can hit one.
pub fn resolve_bullet_hits(state: &mut GameState) -> Vec<AsteroidVariant> {
    let mut destroyed = Vec::new();
    let mut i = 0;
    while i < state.bullets.len() {
        let hit_box = state.bullets[i].bounds();
        let Some(j) = state
            .asteroids
            .iter()
            .position(|a| a.bounds().intersects(&hit_box))
        else {
            i += 1;
            continue;
        };

        state.bullets.remove(i);
        let asteroid = state.asteroids.remove(j);
        state.destroyed += 1;
        state.events.push(GameEvent::AsteroidDestroyed {
            variant: asteroid.variant,
        });

        if let Some(kind) = asteroid.variant.buff() {
            if state.ship.apply_buff(kind) {
                log::debug!(
                    "Buff {:?} applied from {} asteroid",
                    kind,
                    asteroid.variant.as_str()
                );
                state.events.push(GameEvent::BuffApplied { kind });
            }
        }

        spawn_asteroid(state);
        destroyed.push(asteroid.variant);
    }
    destroyed
}

/// Resolve the ship against the asteroid field
///
/// Every overlapping asteroid is destroyed and replaced, but the ship loses
/// at most one life per tick. Returns the number of asteroids that hit.
pub fn resolve_ship_hits(state: &mut GameState) -> usize {
    let ship_box = state.ship.bounds();
    let before = state.asteroids.len();
    state.asteroids.retain(|a| !a.bounds().intersects(&ship_box));
    let hits = before - state.asteroids.len();
    if hits == 0 {
        return 0;
    }

    for _ in 0..hits {
        spawn_asteroid(state);
    }
    state.ship.lose_life();
    log::debug!(
        "Ship hit by {} asteroid(s), {} lives left",
        hits,
        state.ship.lives
    );
    state.events.push(GameEvent::ShipHit {
        lives: state.ship.lives,
    });
    hits
}

/// Full resolution pass, including the Playing -> GameOver transition
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let destroyed = resolve_bullet_hits(state);
    let ship_hits = resolve_ship_hits(state);

    if state.ship.lives == 0 && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: {} asteroids destroyed",
            state.time_ticks,
            state.destroyed
        );
        state.events.push(GameEvent::GameOver {
            destroyed: state.destroyed,
        });
    }

    CollisionReport {
        destroyed,
        ship_hits,
    }
}
