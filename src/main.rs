//! Headless demo: walk an actor toward a heading, then let it settle.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use strider::sim::{Stage, TimedAnimator, YawBody};
use strider::{init_logging, Command, LocomotionConfig, MoveDirective, StateId};

/// Drive the locomotion state machine against a simulated body
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding the default locomotion tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Total number of ticks to simulate
    #[arg(long, default_value_t = 400)]
    ticks: u64,
    /// Simulated seconds per tick
    #[arg(long, default_value_t = 0.02)]
    dt: f32,
    /// Seed for the idle timer jitter
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// World yaw to walk toward, in degrees
    #[arg(long, default_value_t = 150.0, allow_negative_numbers = true)]
    heading: f32,
    /// Ticks during which the move command is held
    #[arg(long, default_value_t = 200)]
    walk_ticks: u64,
}

fn load_config(path: Option<&PathBuf>) -> Result<LocomotionConfig> {
    path.map_or_else(
        || Ok(LocomotionConfig::default()),
        |file| {
            LocomotionConfig::load(file)
                .with_context(|| format!("loading locomotion config from {}", file.display()))
        },
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let mut stage = Stage::new(
        config,
        YawBody::default(),
        TimedAnimator::default(),
        args.seed,
    );
    let walk = Command::Move(MoveDirective::toward_yaw(args.heading));
    let walk_ticks = args.walk_ticks;

    let mut previous = stage.actor().active_state();
    for tick in 0..args.ticks {
        let command = (tick < walk_ticks).then_some(walk);
        let state = stage.step(args.dt, command);
        if state != previous {
            info!(
                "tick {tick}: {previous} -> {state} (yaw {:.1})",
                stage.actor().body().yaw()
            );
            previous = state;
        }
    }

    let actor = stage.actor();
    info!(
        "after {:.2}s: {} facing {:.1} deg, {} turn(s), {} fidget(s)",
        stage.elapsed(),
        actor.active_state(),
        actor.body().yaw(),
        actor.animator().turns(),
        actor.animator().lingers()
    );
    if actor.active_state() != StateId::Standing {
        info!("actor had not settled; try more --ticks");
    }
    Ok(())
}
