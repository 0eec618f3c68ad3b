use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use courtd::cli::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "courtd")]
#[command(about = "Court time-slot scheduling engine", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Snapshot file with booking and closure records
    #[arg(long, global = true, default_value = "./snapshot.json")]
    snapshot: PathBuf,

    /// Facility config file (defaults to the built-in facility)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a proposed reservation for conflicts and closures
    Check {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Court number
        #[arg(long)]
        court: u32,
        /// Start time (e.g., "09:30" or "9:30 AM")
        #[arg(long)]
        start: String,
        /// End time
        #[arg(long)]
        end: String,
        /// Booking id to ignore (when editing an existing booking)
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Show the column layout for a date's grid render
    Layout {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Limit to one court
        #[arg(long)]
        court: Option<u32>,
    },
    /// Utilization report for a date or date range
    Report {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// End date for a range report (inclusive)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courtd=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Check {
            date,
            court,
            start,
            end,
            exclude,
        } => {
            cli::run_check(
                &cli.snapshot,
                cli.config.as_deref(),
                &date,
                court,
                &start,
                &end,
                exclude.as_deref(),
                format,
            )?;
        }
        Commands::Layout { date, court } => {
            cli::run_layout(&cli.snapshot, cli.config.as_deref(), &date, court, format)?;
        }
        Commands::Report { date, to } => {
            cli::run_report(
                &cli.snapshot,
                cli.config.as_deref(),
                &date,
                to.as_deref(),
                format,
            )?;
        }
    }

    Ok(())
}
