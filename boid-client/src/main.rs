use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boid_client::{Scenario, Session};
use boid_shared::SettingsUpdate;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flock simulation", long_about = None)]
struct Args {
    /// Number of boids to spawn
    #[arg(short, long, default_value_t = 200)]
    boids: usize,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// JSON settings file applied before the first frame
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON-lines scenario of attraction, settings and reset steps
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write a snapshot every N frames (the last frame is always written)
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Snapshot output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_settings(path: &Path) -> Result<SettingsUpdate> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    SettingsUpdate::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Boid client starting...");
    log::info!("Boids: {}, frames: {}", args.boids, args.frames);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    log::info!("Scenario steps: {}", scenario.len());

    let mut session = Session::new(args.boids, args.seed);
    if let Some(every) = args.snapshot_every {
        session = session.with_snapshot_every(every);
    }
    if let Some(path) = &args.settings {
        load_settings(path)?.apply(session.flock_mut());
    }

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = session
        .run(&scenario, args.frames, &mut sink)
        .context("Simulation error")?;

    log::info!(
        "Finished after {} frames: {} boids, mean speed {:.4}",
        session.frame(),
        stats.boid_count,
        stats.mean_speed
    );

    Ok(())
}
