//! Run and Gun entry point
//!
//! Headless driver: plays one run with a simple autopilot at a simulated
//! 60 Hz display and prints the final snapshot as JSON.
//!
//! Usage: `run-and-gun [seed] [tuning.json]`

use run_and_gun::Tuning;
use run_and_gun::consts::SIM_DT;
use run_and_gun::sim::{
    Action, FixedStepper, GameEvent, GamePhase, InputSnapshot, Owner, World, WorldSnapshot,
};

/// Stop after this many display frames even if the player survives
const MAX_FRAMES: u32 = 60 * 120;

/// Horizontal distance at which the autopilot hops over incoming fire
const DODGE_DISTANCE: f32 = 60.0;

/// Always run right and shoot; jump over enemy shots that are about to land
fn autopilot(snapshot: &WorldSnapshot) -> InputSnapshot {
    let player = &snapshot.player;
    let incoming = snapshot.projectiles_of(Owner::Enemy).any(|p| {
        let dx = p.pos.x - (player.pos.x + player.size.x / 2.0);
        dx.abs() < DODGE_DISTANCE && p.pos.y >= player.pos.y
    });

    let mut input = InputSnapshot::default()
        .with(Action::MoveRight)
        .with(Action::Fire);
    input.set(Action::Jump, incoming && player.grounded);
    input
}

fn log_events(snapshot: &WorldSnapshot) {
    for event in &snapshot.events {
        match event {
            GameEvent::PlayerShot { .. } | GameEvent::EnemyShot { .. } => {
                log::trace!("{:?}", event)
            }
            _ => log::debug!("tick {}: {:?}", snapshot.time_ticks, event),
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using 42", arg);
            42
        }),
        None => 42,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    log::info!("Run and Gun (headless) starting with seed {}", seed);
    let mut world = World::with_tuning(tuning, seed);
    world.start();

    let mut stepper = FixedStepper::default();
    let mut snapshot = world.snapshot();
    for _ in 0..MAX_FRAMES {
        let input = autopilot(&snapshot);
        if let Some(next) = stepper.advance(&mut world, &input, SIM_DT) {
            log_events(&next);
            snapshot = next;
        }
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Finished: phase {:?}, score {}, level {}, distance {:.0}",
        snapshot.phase,
        snapshot.score,
        snapshot.level,
        snapshot.scroll_offset
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
