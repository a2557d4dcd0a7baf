//! Pyro CLI - headless inspection of firework effects

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{play, sample, types, InstanceArgs};
use pyro_show::SimConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pyro")]
#[command(about = "Inspect and sample firework show effects", long_about = None)]
#[command(version)]
struct Cli {
    /// Simulation config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List effect types with their strategy and activity windows
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one instance at one moment
    Sample {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Timeline value to evaluate at, in seconds
        #[arg(long, default_value = "0.5")]
        time: f32,

        /// Camera distance used for brightness compensation
        #[arg(long, default_value = "10")]
        distance: f32,

        /// Print every particle as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Step one instance through a time range at a fixed frame rate
    Play {
        #[command(flatten)]
        instance: InstanceArgs,

        /// First timeline value (defaults to the start of the launch)
        #[arg(long)]
        from: Option<f32>,

        /// Last timeline value (defaults to the end of the tail)
        #[arg(long)]
        to: Option<f32>,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Camera distance used for brightness compensation
        #[arg(long, default_value = "10")]
        distance: f32,
    },
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Types { json } => types::run(&config, json),
        Commands::Sample {
            instance,
            time,
            distance,
            json,
        } => sample::run(sample::SampleArgs {
            config,
            instance,
            time,
            distance,
            json,
        }),
        Commands::Play {
            instance,
            from,
            to,
            fps,
            distance,
        } => play::run(play::PlayArgs {
            config,
            instance,
            from,
            to,
            fps,
            distance,
        }),
    }
}
