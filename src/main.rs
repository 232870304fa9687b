//! Neon Waves headless runner
//!
//! Plays a seeded autopilot session and prints the final snapshot as JSON.
//!
//! ```text
//! neon-waves [--seed N] [--ticks N] [--config balance.json]
//! ```
//!
//! Set `RUST_LOG=debug` to follow every hit and pickup.

use std::time::{SystemTime, UNIX_EPOCH};

use neon_waves::sim::{GameState, Snapshot, TickInput, tick};
use neon_waves::{SimConfig, SimError, SimResult};

/// Ten minutes of play at 60 ticks per second
const DEFAULT_TICKS: u64 = 36_000;

struct Args {
    seed: u64,
    ticks: u64,
    config: Option<String>,
}

fn parse_args() -> SimResult<Args> {
    let mut args = Args {
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        ticks: DEFAULT_TICKS,
        config: None,
    };

    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let value = it.next();
        match (flag.as_str(), value) {
            ("--seed", Some(v)) => args.seed = parse_number("--seed", &v)?,
            ("--ticks", Some(v)) => args.ticks = parse_number("--ticks", &v)?,
            ("--config", Some(v)) => args.config = Some(v),
            (flag, _) => {
                return Err(SimError::InvalidConfig {
                    field: "args",
                    reason: format!("unexpected or incomplete argument '{flag}'"),
                });
            }
        }
    }
    Ok(args)
}

fn parse_number(field: &'static str, value: &str) -> SimResult<u64> {
    value.parse().map_err(|_| SimError::InvalidConfig {
        field,
        reason: format!("'{value}' is not a whole number"),
    })
}

fn run() -> SimResult<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    let mut state = GameState::try_new(args.seed, config)?;
    log::info!("Game initialized with seed: {}", args.seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..args.ticks {
        tick(&mut state, &input);
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks: wave {}, score {}, coins {}",
        state.time_ticks,
        state.wave.number,
        state.score,
        state.coins
    );
    println!("{}", Snapshot::capture(&state).to_json()?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Waves (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
