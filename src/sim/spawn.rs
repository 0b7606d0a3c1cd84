//! Asteroid spawning: initial population, replacements and the timed ramp

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, AsteroidVariant, GameEvent, GameState};
use crate::angle_to;
use crate::consts::*;

/// Pick a variant with two independent draws
///
/// The first draw decides blue; only if that misses does a second draw
/// decide between green/red and plain.
pub fn choose_variant(rng: &mut impl Rng) -> AsteroidVariant {
    if rng.random::<f64>() < MULTI_CHANCE {
        AsteroidVariant::Multi
    } else if rng.random::<f64>() < SPECIAL_CHANCE {
        if rng.random_bool(0.5) {
            AsteroidVariant::Speed
        } else {
            AsteroidVariant::Count
        }
    } else {
        AsteroidVariant::Plain
    }
}

/// Random outline points around the body center
fn random_outline(rng: &mut impl Rng) -> [Vec2; ASTEROID_OUTLINE_POINTS] {
    let half = ASTEROID_SIZE / 2.0;
    std::array::from_fn(|_| {
        let x = rng.random_range(ASTEROID_OUTLINE_MIN..=ASTEROID_OUTLINE_MAX);
        let y = rng.random_range(ASTEROID_OUTLINE_MIN..=ASTEROID_OUTLINE_MAX);
        Vec2::new(f32::from(x) - half, f32::from(y) - half)
    })
}

/// Spawn one asteroid at a random spot, aimed at the ship's current position
pub fn spawn_asteroid(state: &mut GameState) -> AsteroidVariant {
    let variant = choose_variant(&mut state.rng);
    let pos = Vec2::new(
        state.rng.random_range(0.0..=state.settings.playfield_width),
        state.rng.random_range(0.0..=state.settings.playfield_height),
    );
    let speed = state.rng.random_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED);
    let outline = random_outline(&mut state.rng);
    let drift_angle = angle_to(pos, state.ship.pos);

    let id = state.next_entity_id();
    state.asteroids.push(Asteroid {
        id,
        pos,
        drift_angle,
        speed,
        variant,
        outline,
    });
    state.events.push(GameEvent::AsteroidSpawned { variant });
    variant
}

/// Fill the field with the starting asteroids
pub fn populate(state: &mut GameState) {
    for _ in 0..INITIAL_ASTEROIDS {
        spawn_asteroid(state);
    }
}

/// Advance the difficulty ramp by one tick. Returns true if it spawned.
pub fn advance_ramp(state: &mut GameState) -> bool {
    state.spawn_timer += 1;
    if state.spawn_timer < SPAWN_RAMP_TICKS {
        return false;
    }
    state.spawn_timer = 0;
    let variant = spawn_asteroid(state);
    log::debug!(
        "Ramp spawn ({}) at tick {}, {} asteroids live",
        variant.as_str(),
        state.time_ticks,
        state.asteroids.len()
    );
    true
}
