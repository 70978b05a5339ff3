//! fruitcatch-autoplay: run a headless session with a simple autopilot.
//!
//! Usage:
//!   fruitcatch-autoplay [--seed N] [--config session.json] [--fps N]
//!
//! Prints a JSON summary of the finished run to stdout. Set `RUST_LOG=debug`
//! to see every spawn and catch.

use std::path::{Path, PathBuf};
use std::process;

use fruitcatch_core::config::SessionConfig;
use fruitcatch_core::enums::{GamePhase, ViewKind};
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::state::SessionSnapshot;
use fruitcatch_sim::{HeadlessViews, Session};

/// Upper bound on frames, in case the config asks for a very long run.
const MAX_FRAMES: u64 = 1_000_000;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut config = match parse_path(&args, "--config") {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: failed to load {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };
    if let Some(seed) = parse_value::<u64>(&args, "--seed") {
        config.seed = seed;
    }
    let fps = parse_value::<f64>(&args, "--fps").unwrap_or(60.0);
    if fps.is_nan() || fps <= 0.0 {
        eprintln!("Error: --fps must be positive");
        process::exit(1);
    }

    let half_width = config.catcher_half_width;
    let mut session = match Session::new(config, HeadlessViews::new()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if session.spawn_catcher(half_width).is_none() {
        eprintln!("Error: could not place the catcher");
        process::exit(1);
    }

    let dt = 1.0 / fps;
    let mut tally = Tally::default();
    let mut snapshot = session.tick(dt);
    tally.record(&snapshot);
    while snapshot.phase == GamePhase::Active && snapshot.time.frame < MAX_FRAMES {
        if let Some(x) = autopilot_target(&snapshot) {
            session.move_catcher_to(x);
        }
        snapshot = session.tick(dt);
        tally.record(&snapshot);
    }

    let summary = serde_json::json!({
        "seed": session.config().seed,
        "frames": snapshot.time.frame,
        "elapsed_secs": snapshot.time.elapsed_secs,
        "score": snapshot.score,
        "lives": snapshot.lives,
        "reason": snapshot.game_over_reason,
        "outcome": snapshot.outcome,
        "spawned": tally.spawned,
        "caught": tally.caught,
        "missed": tally.missed,
        "hazard_hits": tally.hazard_hits,
        "hazards_dodged": tally.hazards_dodged,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Chase the lowest fruit still above the catcher, unless a hazard sits
/// right above that spot.
fn autopilot_target(snapshot: &SessionSnapshot) -> Option<f64> {
    let catcher = snapshot.catcher.as_ref()?;
    let floor = catcher.position.y;

    let target = snapshot
        .drops
        .iter()
        .filter(|d| matches!(d.view, ViewKind::Fruit(_)) && d.position.y >= floor)
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y))?;

    let blocked = snapshot.drops.iter().any(|d| {
        d.view == ViewKind::Hazard
            && d.position.y < target.position.y
            && d.position.y >= floor
            && (d.position.x - target.position.x).abs() <= catcher.half_width
    });
    if blocked {
        log::debug!("Skipping fruit at x={:.1}, hazard in the way", target.position.x);
        return None;
    }
    Some(target.position.x)
}

#[derive(Debug, Default)]
struct Tally {
    spawned: u32,
    caught: u32,
    missed: u32,
    hazard_hits: u32,
    hazards_dodged: u32,
}

impl Tally {
    fn record(&mut self, snapshot: &SessionSnapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::DropSpawned { .. } => self.spawned += 1,
                GameEvent::FruitCaught { .. } => self.caught += 1,
                GameEvent::FruitMissed { .. } => self.missed += 1,
                GameEvent::HazardHit { .. } => self.hazard_hits += 1,
                GameEvent::HazardDodged => self.hazards_dodged += 1,
            }
        }
    }
}

fn load_config(path: &Path) -> Result<SessionConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    SessionConfig::from_json(&text).map_err(|e| e.to_string())
}

fn print_usage() {
    eprintln!(
        "fruitcatch-autoplay: play one headless session with an autopilot\n\
         \n\
           --seed <N>       Override the config seed\n\
           --config <path>  Session config JSON (default: built-in)\n\
           --fps <N>        Simulated frame rate (default: 60)\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .map(|pair| PathBuf::from(&pair[1]))
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .and_then(|pair| pair[1].parse().ok())
}
