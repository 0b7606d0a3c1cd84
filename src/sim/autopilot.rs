//! Demo-mode pilot
//!
//! Produces the same intents a player would, so headless runs and attract
//! screens exercise the real control surface.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::SHIP_TURN_RATE;

/// An asteroid closer than this is a threat worth running from
const DANGER_DISTANCE: f32 = 90.0;
/// Fire when the target is within this many degrees of the heading
const FIRE_CONE: f32 = 10.0;

/// Heading (degrees, 0 = up) that makes thrust move along `dir`
fn heading_toward(dir: Vec2) -> f32 {
    let h = (-dir.x).atan2(-dir.y).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

/// Signed difference `to - from`, wrapped into (-180, 180]
fn angle_diff(from: f32, to: f32) -> f32 {
    let mut d = (to - from) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Pick intents for the next tick
pub fn drive(state: &GameState) -> TickInput {
    if state.is_game_over() {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let ship = state.ship.pos;
    let Some(target) = state
        .asteroids
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(ship)
                .partial_cmp(&b.pos.distance_squared(ship))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return TickInput::default();
    };

    let diff = angle_diff(state.ship.heading, heading_toward(target.pos - ship));
    let close = target.pos.distance(ship) < DANGER_DISTANCE;

    TickInput {
        turn_left: diff >= SHIP_TURN_RATE / 2.0,
        turn_right: diff <= -SHIP_TURN_RATE / 2.0,
        // Only thrust while facing away, i.e. backing off
        thrust: close && diff.abs() > 120.0,
        fire: diff.abs() < FIRE_CONE,
        ..Default::default()
    }
}
