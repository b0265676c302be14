//! yoyo-sandbox: runs a tether session against an in-memory world and prints
//! one JSON snapshot per tick.
//!
//! Usage:
//!   yoyo-sandbox shear --ticks 80
//!   yoyo-sandbox garden --config yoyo.json --seed 7

use std::path::PathBuf;
use std::process;

use glam::DVec3;

use yoyo_core::items::{Enchantments, ItemStack, YoyoItem, YoyoModifier};
use yoyo_core::types::{BlockCoord, EntityId, OwnerId, Position};
use yoyo_sim::config::SessionConfig;
use yoyo_sim::sandbox::{SandboxBlock, SandboxEntity, SandboxHost};
use yoyo_sim::TetherSession;

const OWNER: OwnerId = OwnerId(1);
const DEFAULT_TICKS: u64 = 120;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout stays pure JSON.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let scenario = match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        name @ ("shear" | "garden" | "attack") => name.to_string(),
        other => {
            eprintln!("Unknown scenario: {other}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match parse_value::<PathBuf>(&args[2..], "--config") {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load config");
                process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };
    if let Some(seed) = parse_value::<u64>(&args[2..], "--seed") {
        config.seed = seed;
    }
    let ticks = parse_value::<u64>(&args[2..], "--ticks").unwrap_or(DEFAULT_TICKS);

    run(&scenario, config, ticks);
}

fn print_usage() {
    eprintln!(
        "yoyo-sandbox: run a yoyo through a scripted world\n\
         \n\
         Scenarios:\n\
         \n\
         shear    Shear a row of sheep with a collecting yoyo\n\
         garden   Tend a field of crops, grass and bushes\n\
         attack   Strike a line of zombies\n\
         \n\
         Options:\n\
         \n\
           --config <path>  Session config JSON (optional)\n\
           --seed <N>       Override the RNG seed\n\
           --ticks <N>      Ticks to simulate (default: 120)\n\
         \n\
         Set LOG_FORMAT=json for structured logs on stderr.\n"
    );
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn build_world(scenario: &str, host: &mut SandboxHost) -> YoyoItem {
    host.add_owner(OWNER, Position::new(0.0, 1.5, 0.0), DVec3::Z);
    let collecting = Enchantments {
        collecting: 1,
        ..Default::default()
    };

    match scenario {
        "shear" => {
            for i in 0..4 {
                let pos = Position::new(0.0, 1.5, 2.0 + i as f64 * 1.5);
                host.add_entity(EntityId(100 + i), SandboxEntity::sheep(pos, 2), 8.0);
            }
            YoyoItem {
                modifiers: vec![YoyoModifier::Shearing],
                enchantments: collecting,
                ..Default::default()
            }
        }
        "garden" => {
            for z in 1..7 {
                let coord = BlockCoord::new(0, 1, z);
                let block = match z % 3 {
                    0 => SandboxBlock::crop(7, 7, vec![ItemStack::new("wheat", 1)]),
                    1 => SandboxBlock::tall_grass(vec![ItemStack::new("grass", 1)]),
                    _ => SandboxBlock::bush(vec![ItemStack::new("stick", 2)]),
                };
                host.world.set_block(coord, block);
            }
            YoyoItem {
                modifiers: vec![YoyoModifier::Gardening],
                enchantments: collecting,
                ..Default::default()
            }
        }
        _ => {
            for i in 0..3 {
                let pos = Position::new(0.0, 1.5, 3.0 + i as f64 * 1.5);
                host.add_entity(EntityId(200 + i), SandboxEntity::zombie(pos), 20.0);
            }
            YoyoItem::default()
        }
    }
}

fn run(scenario: &str, config: SessionConfig, ticks: u64) {
    let mut host = SandboxHost::new();
    let item = build_world(scenario, &mut host);
    let mut session = TetherSession::new(config);

    if let Err(e) = session.try_throw(&mut host, OWNER, item) {
        tracing::error!(error = %e, "throw failed");
        process::exit(1);
    }

    let release_at = ticks / 2;
    for tick in 0..ticks {
        if tick == release_at {
            session.release(OWNER);
        }
        let snapshot = session.tick(&mut host);
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize snapshot");
                process::exit(1);
            }
        }
    }

    let events = session.end_session(&mut host);
    let inventory = host
        .owner(OWNER)
        .map(|owner| owner.inventory_total())
        .unwrap_or(0);
    tracing::info!(
        scenario,
        ticks,
        closing_events = events.len(),
        inventory,
        pickups = host.world.pickup_total(),
        "sandbox run complete"
    );
}
