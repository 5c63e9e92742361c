use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wxlog")]
#[command(about = "Fetch, store and summarize hourly temperature readings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Config file path [default: <config dir>/wxlog/config.toml]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "SQLite database path, overrides the config file")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a location and store its hourly temperatures for a date range
    Fetch {
        #[arg(short, long, help = "Location name (case-sensitive)")]
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(short, long, help = "First day, YYYY-MM-DD")]
        start: String,

        #[arg(short, long, help = "Last day (inclusive), YYYY-MM-DD")]
        end: String,
    },

    /// Daily average, min and max temperature for a stored location
    Daily {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(long, help = "Print the chart figure as JSON")]
        json: bool,
    },

    /// Highest and lowest temperature over a date range
    Weekly {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(long, help = "Print the chart figure as JSON")]
        json: bool,
    },

    /// List stored locations
    Locations,
}
