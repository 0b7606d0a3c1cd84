//! Astro Blast headless runner
//!
//! Drives the simulation with the demo pilot at a simulated frame clock and
//! prints the final snapshot as JSON. Usage:
//!
//! ```text
//! astro-blast [settings.json]
//! ```
//!
//! `ASTRO_BLAST_TICKS` sets how many frames to run (default 3600).

use std::error::Error;
use std::time::Duration;

use astro_blast::Settings;
use astro_blast::sim::{GameEvent, GameState, autopilot, tick};

const DEFAULT_TICKS: u32 = 3600;

fn tick_budget() -> u32 {
    std::env::var("ASTRO_BLAST_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TICKS)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let frame = Duration::from_secs(1) / settings.tick_rate;
    let ticks = tick_budget();
    log::info!("Astro Blast (headless) running {} ticks", ticks);

    let mut state = GameState::new(settings)?;
    let mut games = 1u32;
    let mut last = None;

    for n in 0..ticks {
        let input = autopilot::drive(&state);
        let snapshot = tick(&mut state, &input, frame * n);

        for event in &snapshot.events {
            match event {
                GameEvent::GameOver { destroyed } => {
                    log::info!("Game {} over: {} asteroids destroyed", games, destroyed);
                }
                GameEvent::Restarted => games += 1,
                GameEvent::BuffApplied { kind } => log::debug!("Buff {:?}", kind),
                _ => {}
            }
        }

        let quit = snapshot.quit_requested();
        last = Some(snapshot);
        if quit {
            break;
        }
    }

    if let Some(snapshot) = last {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
