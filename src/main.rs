//! Headless host for the simulation core
//!
//! Usage: `brick-jumper [config.json] [ticks]`
//!
//! Drives a session at a simulated 60 Hz clock with a simple autopilot and
//! prints the final snapshot as JSON. `RUST_LOG=debug` shows recycling.

use std::process::ExitCode;
use std::time::Duration;

use brick_jumper::consts::TICK_HZ;
use brick_jumper::sim::{Session, SimEvent, horizontal_overlap};
use brick_jumper::{ConfigError, SimConfig};

const DEFAULT_TICKS: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Jumper (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(&path),
        None => Ok(SimConfig::default()),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICKS);

    match config.and_then(|config| run(config, ticks)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: SimConfig, ticks: u64) -> Result<(), ConfigError> {
    let mut session = Session::new(config)?;
    let mut jumps = 0u32;

    for tick in 0..ticks {
        if autopilot_wants_jump(&session) {
            session.on_jump_pressed();
        }

        let now = Duration::from_secs_f64(tick as f64 / TICK_HZ);
        let report = session.advance(now);
        for event in &report.events {
            match event {
                SimEvent::Jumped => jumps += 1,
                SimEvent::Reset {
                    elapsed_secs: Some(secs),
                } => log::info!("Tick {}: run ended at {:.2}s", report.tick, secs),
                SimEvent::Reset { elapsed_secs: None } => {
                    log::info!("Tick {}: fell with the stopwatch stopped", report.tick)
                }
                SimEvent::TimerRestarted => log::info!("Tick {}: stopwatch running", report.tick),
                _ => {}
            }
        }
    }

    log::info!(
        "Finished {} ticks: {} jumps, {} resets, timer {}",
        session.ticks(),
        jumps,
        session.run_state().resets,
        session.elapsed_display()
    );
    if let Some(best) = session.records().best() {
        log::info!("Longest run: {:.2}s", best);
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize snapshot: {e}"),
    }
    Ok(())
}

/// Jump just before the platform underfoot scrolls out from under the actor
fn autopilot_wants_jump(session: &Session) -> bool {
    let actor = session.actor();
    if actor.airborne {
        return false;
    }
    let lead = session.config().scroll_speed * 2.0;
    session
        .platforms()
        .iter()
        .filter(|p| horizontal_overlap(actor, p))
        .any(|p| p.right() - actor.left() <= lead)
}
