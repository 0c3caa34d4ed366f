use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "farm2city",
    version,
    about = "Crop suitability and irrigation planning for small farms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Show current weather (live or fallback)
    Weather,
    /// List soil types and their irrigation regimes
    Soils,
    /// Recommend crops for a soil under current weather
    Recommend {
        /// Soil type (defaults to the configured soil)
        #[arg(short, long)]
        soil: Option<String>,
    },
    /// Generate and save a 7-day irrigation schedule
    Schedule {
        /// Soil type (defaults to the configured soil)
        #[arg(short, long)]
        soil: Option<String>,

        /// Comma-separated crop names
        #[arg(long)]
        crops: Option<String>,

        /// Planted area in hectares
        #[arg(short, long)]
        area: Option<f64>,

        /// Seven comma-separated outlooks, Monday first (sunny, cloudy, rain)
        #[arg(short, long)]
        forecast: Option<String>,
    },
    /// Inspect or update the saved irrigation plan
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },
}

impl Commands {
    /// Whether the command reads the farm config; `init` writes it instead
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Init | Commands::Soils)
    }
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Print the saved plan
    Show,
    /// Mark a day as completed
    Complete {
        /// Day of week (e.g. mon, Tuesday)
        day: String,
    },
    /// Return a completed day to scheduled
    Undo {
        /// Day of week (e.g. mon, Tuesday)
        day: String,
    },
}
