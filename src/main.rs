//! Lane Dodge headless runner
//!
//! Drives the simulation at a fixed 60 Hz with the autopilot at the wheel
//! and reports how far it got. Usage:
//! `lane-dodge [seed] [seconds] [classic] [lanes|continuous]`.
//! The browser build is driven from JS through `lane_dodge::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dodge::consts::SIM_DT;
    use lane_dodge::sim::{GameEvent, GameState, TickInput, tick};
    use lane_dodge::{BestScore, GameConfig, Placement};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse::<u64>().ok());
    let seconds = args.get(1).and_then(|s| s.parse::<f32>().ok()).unwrap_or(120.0);
    let classic = args.iter().any(|a| a == "classic");

    let mut config = if classic {
        GameConfig::classic()
    } else {
        GameConfig::default()
    };
    config.seed = seed;
    if let Some(placement) = args.iter().skip(2).find_map(|a| Placement::from_str(a)) {
        config.placement = placement;
    }
    log::info!("Placement: {}", config.placement.as_str());
    match config.to_json() {
        Ok(json) => log::debug!("Config: {json}"),
        Err(err) => log::warn!("Could not serialize config: {err}"),
    }

    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    };

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let max_ticks = (seconds / SIM_DT).ceil() as u64;
    let mut spawned = 0u32;

    for _ in 0..max_ticks {
        let result = tick(&mut state, &input, SIM_DT);
        spawned += result.spawn_events.len() as u32;
        for event in &result.events {
            if let GameEvent::SpeedIncreased { speed_multiplier } = event {
                log::debug!("t={:.1}s speed x{:.2}", state.elapsed_ms / 1000.0, speed_multiplier);
            }
        }
        if result.game_over {
            break;
        }
    }

    let mut best = BestScore::load();
    best.record(state.score);
    best.save();

    let outcome = if state.is_game_over() { "crashed" } else { "survived" };
    println!(
        "seed {}: {} after {:.1}s, score {}, {} dodges of {} obstacles, level {}, speed x{:.2}",
        state.spawner.seed,
        outcome,
        state.elapsed_ms / 1000.0,
        state.score,
        state.dodge_count(),
        spawned,
        state.difficulty.level(),
        state.speed_multiplier()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}
