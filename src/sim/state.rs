//! Game state and core simulation types
//!
//! Everything needed to resume a session lives here, RNG included.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, rotated_extent};
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::{Settings, SettingsError};
use crate::{displacement, normalize_heading};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; frozen until restart or quit
    GameOver,
}

/// Permanent ship upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    /// Faster bullets
    Speed,
    /// Larger volley counter (informational)
    Count,
    /// More fire directions
    MultiDirection,
}

/// Asteroid variants. Every variant but `Plain` grants a buff when shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AsteroidVariant {
    #[default]
    Plain,
    /// Green
    Speed,
    /// Red
    Count,
    /// Blue
    Multi,
}

impl AsteroidVariant {
    /// Buff granted when an asteroid of this variant is shot down
    pub fn buff(self) -> Option<BuffKind> {
        match self {
            AsteroidVariant::Plain => None,
            AsteroidVariant::Speed => Some(BuffKind::Speed),
            AsteroidVariant::Count => Some(BuffKind::Count),
            AsteroidVariant::Multi => Some(BuffKind::MultiDirection),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidVariant::Plain => "plain",
            AsteroidVariant::Speed => "green",
            AsteroidVariant::Count => "red",
            AsteroidVariant::Multi => "blue",
        }
    }
}

/// Things that happened during a tick, for sounds and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    VolleyFired { bullets: usize },
    AsteroidDestroyed { variant: AsteroidVariant },
    BuffApplied { kind: BuffKind },
    AsteroidSpawned { variant: AsteroidVariant },
    ShipHit { lives: u32 },
    GameOver { destroyed: u32 },
    Restarted,
    QuitRequested,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Center position
    pub pos: Vec2,
    /// Facing angle in degrees, [0, 360), 0 = up
    pub heading: f32,
    /// Thrust step per tick
    pub speed: f32,
    pub lives: u32,
    pub bullet_speed: f32,
    /// Shown on the HUD; volleys are driven by `fire_offsets` alone
    pub bullet_count: u32,
    /// Angular offsets from the heading, one bullet each per volley
    pub fire_offsets: Vec<f32>,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            speed: SHIP_SPEED,
            lives: SHIP_START_LIVES,
            bullet_speed: BULLET_START_SPEED,
            bullet_count: BULLET_START_COUNT,
            fire_offsets: vec![0.0],
        }
    }

    /// Bounding box for the current heading
    pub fn bounds(&self) -> Rect {
        let size = rotated_extent(Vec2::new(SHIP_WIDTH, SHIP_HEIGHT), self.heading);
        Rect::from_center(self.pos, size)
    }

    /// Apply turn and thrust intents, then keep the ship inside the field
    ///
    /// The clamp runs after rotation since a new heading changes the box.
    pub fn update(&mut self, input: &TickInput, field: &Rect) {
        if input.turn_left {
            self.heading += SHIP_TURN_RATE;
        }
        if input.turn_right {
            self.heading -= SHIP_TURN_RATE;
        }
        if input.thrust {
            self.pos += displacement(self.heading, self.speed);
        }
        self.heading = normalize_heading(self.heading);
        self.pos = self.bounds().clamp_within(field).center();
    }

    /// One bullet per fire offset, launched from the nose
    ///
    /// Ids are left at 0 for the session to assign.
    pub fn shoot(&self) -> Vec<Bullet> {
        let half_height = self.bounds().size().y / 2.0;
        self.fire_offsets
            .iter()
            .map(|offset| {
                let angle = self.heading + offset;
                let nose = self.pos + displacement(angle, half_height);
                Bullet::new(0, nose, angle, self.bullet_speed)
            })
            .collect()
    }

    /// Apply a permanent upgrade. Returns false when already at the cap.
    pub fn apply_buff(&mut self, kind: BuffKind) -> bool {
        match kind {
            BuffKind::Speed => {
                if self.bullet_speed < BULLET_SPEED_CAP {
                    self.bullet_speed =
                        (self.bullet_speed + BULLET_SPEED_STEP).min(BULLET_SPEED_CAP);
                    true
                } else {
                    false
                }
            }
            BuffKind::Count => {
                if self.bullet_count < BULLET_COUNT_CAP {
                    self.bullet_count += 1;
                    true
                } else {
                    false
                }
            }
            BuffKind::MultiDirection => {
                let n = self.fire_offsets.len();
                let grew = if n < 2 {
                    self.fire_offsets.push(180.0);
                    true
                } else if n < FIRE_DIRECTION_CAP {
                    let step = 360.0 / (n as f32 * 2.0);
                    let spread = n as f32 * step;
                    self.fire_offsets.extend([spread, -spread]);
                    true
                } else {
                    false
                };
                debug_assert!(self.fire_offsets.len() <= FIRE_DIRECTION_CAP);
                self.fire_offsets.truncate(FIRE_DIRECTION_CAP);
                grew
            }
        }
    }

    /// Lose one life. Never goes below zero.
    pub fn lose_life(&mut self) {
        debug_assert!(self.lives > 0, "ship hit with no lives left");
        self.lives = self.lives.saturating_sub(1);
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Travel direction in degrees, fixed at spawn
    pub drift_angle: f32,
    /// Pixels per tick
    pub speed: u8,
    pub variant: AsteroidVariant,
    /// Outline points relative to the center (visual only)
    pub outline: [Vec2; ASTEROID_OUTLINE_POINTS],
}

impl Asteroid {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(ASTEROID_SIZE))
    }

    /// Drift, wrapping to the opposite edge once fully off the field
    pub fn update(&mut self, field: &Rect) {
        self.pos += displacement(self.drift_angle, f32::from(self.speed));

        let half = ASTEROID_SIZE / 2.0;
        let b = self.bounds();
        if b.right() < field.left() {
            self.pos.x = field.right() + half;
        } else if b.left() > field.right() {
            self.pos.x = field.left() - half;
        }
        if b.bottom() < field.top() {
            self.pos.y = field.bottom() + half;
        } else if b.top() > field.bottom() {
            self.pos.y = field.top() - half;
        }
    }
}

/// A projectile. Flies straight and is discarded at the field edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Firing angle in degrees
    pub angle: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { id, pos, angle, speed }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(BULLET_SIZE))
    }

    pub fn update(&mut self) {
        self.pos += displacement(self.angle, self.speed);
    }

    /// False once any part of the bullet has left the field
    pub fn in_field(&self, field: &Rect) -> bool {
        field.contains(&self.bounds())
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Validated configuration
    pub settings: Settings,
    /// Session RNG; every random draw goes through it
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Live asteroids (spawn order)
    pub asteroids: Vec<Asteroid>,
    /// Live bullets (fire order)
    pub bullets: Vec<Bullet>,
    /// Asteroids shot down this session
    pub destroyed: u32,
    /// Ticks since the last difficulty-ramp spawn
    pub spawn_timer: u32,
    /// Timestamp of the last honored fire command
    pub last_fire: Option<Duration>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last snapshot
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a session: ship at the center, initial asteroid population
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let rng = Pcg32::seed_from_u64(settings.seed);
        log::info!(
            "New session: {}x{} seed={}",
            settings.playfield_width,
            settings.playfield_height,
            settings.seed
        );
        Ok(Self::build(settings, rng))
    }

    fn build(settings: Settings, rng: Pcg32) -> Self {
        let center = Vec2::new(settings.playfield_width, settings.playfield_height) / 2.0;
        let mut state = Self {
            settings,
            rng,
            phase: GamePhase::Playing,
            ship: Ship::new(center),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            destroyed: 0,
            spawn_timer: 0,
            last_fire: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        super::spawn::populate(&mut state);
        // Initial population is not news to the presentation layer
        state.events.clear();
        state
    }

    /// A fresh session with the same settings
    ///
    /// The RNG stream carries on, so consecutive games differ but a whole
    /// run stays reproducible from the session seed.
    pub fn restarted(&self) -> Self {
        let mut state = Self::build(self.settings.clone(), self.rng.clone());
        state.events.push(GameEvent::Restarted);
        state
    }

    /// Replace this session with a fresh one
    pub fn restart(&mut self) {
        log::info!(
            "Restarting session after {} ticks ({} asteroids destroyed)",
            self.time_ticks,
            self.destroyed
        );
        *self = self.restarted();
    }

    /// Play-field bounds
    pub fn field(&self) -> Rect {
        Rect::playfield(self.settings.playfield_width, self.settings.playfield_height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Rect {
        Rect::playfield(1280.0, 720.0)
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(Settings::with_seed(1)).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS);
        assert!(state.bullets.is_empty());
        assert_eq!(state.ship.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.ship.lives, 3);
        assert_eq!(state.ship.fire_offsets, vec![0.0]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_playfield() {
        let settings = Settings {
            playfield_width: -1.0,
            ..Settings::default()
        };
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_speed_buff_caps_at_sixteen() {
        let mut ship = Ship::new(Vec2::ZERO);
        assert!(ship.apply_buff(BuffKind::Speed));
        assert_eq!(ship.bullet_speed, 15.0);
        assert!(ship.apply_buff(BuffKind::Speed));
        assert_eq!(ship.bullet_speed, 16.0);
        for _ in 0..8 {
            assert!(!ship.apply_buff(BuffKind::Speed));
        }
        assert_eq!(ship.bullet_speed, 16.0);
    }

    #[test]
    fn test_count_buff_caps_at_five() {
        let mut ship = Ship::new(Vec2::ZERO);
        for _ in 0..10 {
            ship.apply_buff(BuffKind::Count);
        }
        assert_eq!(ship.bullet_count, 5);
    }

    #[test]
    fn test_multi_direction_growth() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.apply_buff(BuffKind::MultiDirection);
        assert_eq!(ship.fire_offsets, vec![0.0, 180.0]);

        ship.apply_buff(BuffKind::MultiDirection);
        assert_eq!(ship.fire_offsets.len(), 4);

        let sizes: Vec<usize> = (0..10)
            .map(|_| {
                ship.apply_buff(BuffKind::MultiDirection);
                ship.fire_offsets.len()
            })
            .collect();
        assert_eq!(&sizes[..4], &[6, 8, 10, 12]);
        assert!(sizes.iter().all(|&n| n <= FIRE_DIRECTION_CAP));
        assert!(!ship.apply_buff(BuffKind::MultiDirection));
    }

    #[test]
    fn test_buff_dispatch() {
        assert_eq!(AsteroidVariant::Plain.buff(), None);
        assert_eq!(AsteroidVariant::Speed.buff(), Some(BuffKind::Speed));
        assert_eq!(AsteroidVariant::Count.buff(), Some(BuffKind::Count));
        assert_eq!(AsteroidVariant::Multi.buff(), Some(BuffKind::MultiDirection));
    }

    #[test]
    fn test_ship_turn_wraps_heading() {
        let mut ship = Ship::new(Vec2::new(640.0, 360.0));
        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        ship.update(&right, &field());
        assert_eq!(ship.heading, 359.0);

        let mut ship = Ship::new(Vec2::new(640.0, 360.0));
        ship.heading = 355.0;
        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        ship.update(&left, &field());
        assert_eq!(ship.heading, 0.0);
    }

    #[test]
    fn test_ship_thrust_moves_up_and_clamps() {
        let mut ship = Ship::new(Vec2::new(640.0, 360.0));
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        ship.update(&thrust, &field());
        assert!((ship.pos.y - 355.0).abs() < 1e-3);

        ship.pos = Vec2::new(640.0, 14.0);
        ship.update(&thrust, &field());
        assert!(ship.bounds().top() >= -1e-3);
        assert!((ship.bounds().top()).abs() < 1e-3);
    }

    #[test]
    fn test_shoot_from_nose() {
        let ship = Ship::new(Vec2::new(100.0, 100.0));
        let volley = ship.shoot();
        assert_eq!(volley.len(), 1);
        assert!((volley[0].pos - Vec2::new(100.0, 87.5)).length() < 1e-3);
        assert_eq!(volley[0].angle, 0.0);
        assert_eq!(volley[0].speed, BULLET_START_SPEED);
    }

    #[test]
    fn test_shoot_ignores_bullet_count() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        for _ in 0..4 {
            ship.apply_buff(BuffKind::Count);
        }
        ship.apply_buff(BuffKind::MultiDirection);
        assert_eq!(ship.shoot().len(), 2);
    }

    #[test]
    fn test_asteroid_wraps_left_to_right() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::new(-19.5, 300.0),
            drift_angle: 90.0,
            speed: 1,
            variant: AsteroidVariant::Plain,
            outline: [Vec2::ZERO; ASTEROID_OUTLINE_POINTS],
        };
        asteroid.update(&field());
        assert!((asteroid.bounds().left() - 1280.0).abs() < 1e-3);
        assert!((asteroid.pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_wraps_bottom_to_top() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::new(500.0, 739.0),
            drift_angle: 180.0,
            speed: 2,
            variant: AsteroidVariant::Plain,
            outline: [Vec2::ZERO; ASTEROID_OUTLINE_POINTS],
        };
        asteroid.update(&field());
        assert!((asteroid.bounds().bottom()).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_wraps_right_to_left() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::new(1299.5, 300.0),
            drift_angle: 270.0,
            speed: 1,
            variant: AsteroidVariant::Plain,
            outline: [Vec2::ZERO; ASTEROID_OUTLINE_POINTS],
        };
        asteroid.update(&field());
        assert!(asteroid.bounds().right().abs() < 1e-3);
        assert!((asteroid.pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_wraps_top_to_bottom() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::new(500.0, -19.0),
            drift_angle: 0.0,
            speed: 2,
            variant: AsteroidVariant::Plain,
            outline: [Vec2::ZERO; ASTEROID_OUTLINE_POINTS],
        };
        asteroid.update(&field());
        assert!((asteroid.bounds().top() - 720.0).abs() < 1e-3);
        assert!((asteroid.pos.x - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_partially_off_does_not_wrap() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::new(5.0, 300.0),
            drift_angle: 90.0,
            speed: 3,
            variant: AsteroidVariant::Plain,
            outline: [Vec2::ZERO; ASTEROID_OUTLINE_POINTS],
        };
        asteroid.update(&field());
        assert!((asteroid.pos.x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_bullet_leaves_field() {
        let mut bullet = Bullet::new(1, Vec2::new(100.0, 8.0), 0.0, 10.0);
        assert!(bullet.in_field(&field()));
        bullet.update();
        assert!(!bullet.in_field(&field()));
    }

    #[test]
    fn test_restarted_is_fresh() {
        let mut state = GameState::new(Settings::with_seed(5)).unwrap();
        state.destroyed = 12;
        state.ship.lives = 0;
        state.phase = GamePhase::GameOver;
        state.bullets.push(Bullet::new(99, Vec2::splat(50.0), 0.0, 10.0));
        state.last_fire = Some(Duration::from_millis(300));

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.lives, 3);
        assert_eq!(state.destroyed, 0);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS);
        assert!(state.bullets.is_empty());
        assert_eq!(state.last_fire, None);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = GameState::new(Settings::with_seed(3)).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.asteroids.len(), state.asteroids.len());
        assert_eq!(restored.ship.pos, state.ship.pos);
    }
}
