//! armada-demo: drives the interaction engine headless through a scripted
//! skirmish and prints the final snapshot as JSON.
//!
//! Usage:
//!   armada-demo [--config settings.json] [--ticks N]
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use armada_core::commands::PlayerCommand;
use armada_core::config::SimConfig;
use armada_core::enums::PopupId;
use armada_core::events::SimEvent;
use armada_core::state::InteractionSnapshot;
use armada_core::types::Ray;
use armada_sim::headless::{ChaseCamera, HeadlessPhysics, HeadlessRaycaster, PopupBoard, SquadronCatalog};
use armada_sim::services::Services;
use armada_sim::SimulationEngine;

const DEFAULT_TICKS: u32 = 600;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let config = match parse_path(&args, "--config") {
        Some(path) => load_config(&path),
        None => SimConfig {
            seed: Some(42),
            ..Default::default()
        },
    };
    let ticks = parse_path(&args, "--ticks")
        .and_then(|p| p.to_str().and_then(|s| s.parse().ok()))
        .unwrap_or(DEFAULT_TICKS);

    let ui = PopupBoard::new();
    let camera = ChaseCamera::new();
    let services = Services {
        raycaster: Box::new(HeadlessRaycaster::new(config.ship_plane_y)),
        ui: Box::new(ui.clone()),
        squadrons: Box::new(SquadronCatalog::new(&config.squadrons)),
        physics: Box::new(HeadlessPhysics),
        camera: Box::new(camera.clone()),
    };
    let mut engine = match SimulationEngine::new(config, services) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let snapshot = run_skirmish(&mut engine, &ui, ticks);
    info!(
        camera = ?camera.target(),
        ship_control_open = ui.is_open(PopupId::ShipControl),
        ships = snapshot.ships.len(),
        debris = snapshot.debris_count,
        "skirmish finished"
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "armada-demo: ARMADA headless interaction demo\n\
         \n\
           --config <path>  JSON engine settings (missing fields use defaults)\n\
           --ticks <N>      Max ticks to run the engagement (default: {DEFAULT_TICKS})\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn load_config(path: &Path) -> SimConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    match SimConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn tap(x: f64, z: f64) -> PlayerCommand {
    PlayerCommand::Tap {
        ray: Ray::straight_down(x, z),
        over_ui: false,
    }
}

fn named(name: &str) -> PlayerCommand {
    PlayerCommand::NamedEvent {
        name: name.to_string(),
    }
}

/// Select a flagship, focus it, launch fighters, close on an AI enemy and
/// sink it.
fn run_skirmish(engine: &mut SimulationEngine, ui: &PopupBoard, ticks: u32) -> InteractionSnapshot {
    let player_team = engine.config().player_team;
    engine.spawn_ship(-19.0, 5.0, player_team, false);
    engine.queue_command(PlayerCommand::SpawnShip {
        x: 30.0,
        z: 5.0,
        team: player_team.wrapping_add(1),
        controlled_by_ai: true,
    });
    engine.tick();

    engine.queue_command(tap(-19.0, 5.0));
    engine.tick();
    engine.queue_command(tap(-19.0, 5.0));
    engine.tick();

    engine.queue_command(named("Ship_LS_Panel"));
    engine.tick();
    ui.press_option(PopupId::LaunchSquadron, 2);
    engine.queue_commands([named("Ship_LS_Launch"), named("Ship_LS_Close")]);
    engine.tick();
    info!(hangar = ?engine.squadron_ids(), "after launch");

    engine.queue_commands([
        named("Ship_CFM_Panel"),
        named("Ship_CFM_OnlyMainGuns"),
        tap(0.0, 5.0),
        tap(30.0, 5.0),
    ]);

    let mut snapshot = engine.tick();
    for _ in 0..ticks {
        let destroyed = snapshot
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::ShipDestroyed { .. }));
        if destroyed {
            return snapshot;
        }
        snapshot = engine.tick();
    }
    warn!(ticks, "enemy survived the engagement");
    snapshot
}
