//! Twin Arena headless host
//!
//! Drives the simulation with the autopilot through a fixed-step clock and
//! dumps the final frame as JSON.
//!
//! Usage: `twin-arena [settings.json] [seed] [frames]`

use twin_arena::Settings;
use twin_arena::sim::{FixedStep, GameState, TickInput, tick};

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_FRAMES: u32 = 60 * 60;
/// Host frame time; the clock converts it into sim ticks
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("Twin Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = GameState::from_settings(seed, &settings);
    let mut clock = FixedStep::new(settings.tick_dt());
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    log::info!(
        "Seed {:#x}, arena {}x{}, {} Hz, {} frames",
        seed,
        settings.resolution.0,
        settings.resolution.1,
        settings.framerate,
        frames
    );

    for _ in 0..frames {
        for _ in 0..clock.advance(FRAME_TIME) {
            tick(&mut state, &input);
        }
        if state.is_over() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks: wave {}, score {}, graze level {}, {:?}",
        state.time_ticks,
        state.wave(),
        state.score(),
        state.graze.level,
        state.phase
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
