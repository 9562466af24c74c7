//! Letter Invaders entry point
//!
//! Runs the simulation headless under the autopilot and logs a HUD line as
//! it goes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use letter_invaders::Settings;
use letter_invaders::driver::{Autopilot, FrameDriver, HudLog};
use letter_invaders::sim::World;

#[derive(Parser)]
#[command(name = "letter-invaders", about = "Letter Invaders simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation under the autopilot for a fixed number of ticks
    Run {
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// Driver settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Start from a world snapshot (JSON) instead of a fresh world
        #[arg(long = "state")]
        state_file: Option<PathBuf>,
        /// Write the final world snapshot (JSON) here
        #[arg(long)]
        dump: Option<PathBuf>,
        /// Override the autopilot seed
        #[arg(long)]
        autopilot_seed: Option<u64>,
        /// Sleep between ticks at the configured interval
        #[arg(long)]
        realtime: bool,
    },
    /// Write the default driver settings to a file
    InitSettings {
        #[arg(default_value = "settings.json")]
        path: PathBuf,
    },
}

fn load_world(path: &Path) -> Result<World> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading state file: {}", path.display()))?;
    let world: World = serde_json::from_str(&json)
        .with_context(|| format!("parsing state file: {}", path.display()))?;
    world
        .validate()
        .with_context(|| format!("invalid state file: {}", path.display()))?;
    Ok(world)
}

fn dump_world(world: &World, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, world)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Final snapshot written to {}", path.display());
    Ok(())
}

fn run(
    ticks: u64,
    settings_path: Option<&Path>,
    state_file: Option<&Path>,
    dump: Option<&Path>,
    autopilot_seed: Option<u64>,
    realtime: bool,
) -> Result<()> {
    let mut settings = Settings::load_or_default(settings_path);
    if let Some(seed) = autopilot_seed {
        settings.autopilot_seed = seed;
    }
    settings.realtime |= realtime;

    let world = match state_file {
        Some(path) => load_world(path)?,
        None => World::default(),
    };

    log::info!(
        "Running {ticks} ticks (autopilot seed {}, {} ms/tick, realtime {})",
        settings.autopilot_seed,
        settings.tick_interval_ms,
        settings.realtime
    );

    let mut driver = FrameDriver::new(
        world,
        Autopilot::from_settings(&settings),
        HudLog::new(settings.hud_every),
    );
    let pacing = settings.realtime.then(|| settings.tick_interval());
    driver.run(ticks, pacing);

    for (i, entry) in driver.high_scores().entries.iter().enumerate() {
        log::info!(
            "#{:<2} score {:>6} | level {:>3} | tick {}",
            i + 1,
            entry.score,
            entry.level,
            entry.tick
        );
    }

    if let Some(path) = dump {
        dump_world(driver.world(), path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            ticks,
            settings,
            state_file,
            dump,
            autopilot_seed,
            realtime,
        } => run(
            ticks,
            settings.as_deref(),
            state_file.as_deref(),
            dump.as_deref(),
            autopilot_seed,
            realtime,
        ),
        Commands::InitSettings { path } => Settings::default().save(&path),
    }
}
