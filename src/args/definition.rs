//! Command-line argument definition.

use clap::Parser;

/// shibuya-view - Shibuya building-model scene viewer with English/Japanese labels
#[derive(Parser, Debug)]
#[command(name = "shibuya-view")]
#[command(version)]
#[command(about = "Shibuya building-model scene viewer with English/Japanese labels", long_about = None)]
pub struct Args {
    /// Translation document to load (file path or http(s) URL)
    #[arg(short, long)]
    pub translations: Option<String>,

    /// Start-up language (en, ja or auto)
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run without a terminal UI (scripted checks)
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many viewport ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,
}
