use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_normalizer::config::AppConfig;
use match_normalizer::normalize::Normalized;
use match_normalizer::storage::{table_row_count, write_tables, OutputTable, StorageConfig};
use match_normalizer::RunSummary;

#[derive(Parser)]
#[command(name = "match-normalizer")]
#[command(about = "Normalize per-player football match statistics into JSONL tables")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the input and write the four JSONL tables
    Normalize {
        /// Directory holding the input file
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Input file name
        #[arg(long)]
        filename: Option<String>,

        /// Output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate the input and derive all tables without writing
    Validate {
        /// Directory holding the input file
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Input file name
        #[arg(long)]
        filename: Option<String>,
    },

    /// Show row counts of existing output tables
    Inspect {
        /// Output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting match-normalizer v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Normalize {
            input_dir,
            filename,
            output_dir,
        } => {
            apply_input_overrides(&mut config, input_dir, filename);
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            config.validate()?;

            let normalized = Normalized::from_path(&config.input_dir, &config.filename)
                .with_context(|| format!("Failed to normalize {}", config.input_path().display()))?;

            let storage = StorageConfig::new(config.output_dir.clone());
            let summary = write_tables(&storage, &normalized).with_context(|| {
                format!("Failed to write tables to {}", config.output_dir.display())
            })?;

            println!("\n=== Normalize Results ===");
            print_summary(&summary);
            println!("\nOutput written to {}", config.output_dir.display());
        }

        Commands::Validate {
            input_dir,
            filename,
        } => {
            apply_input_overrides(&mut config, input_dir, filename);
            config.validate()?;

            let normalized = Normalized::from_path(&config.input_dir, &config.filename)
                .with_context(|| format!("Failed to validate {}", config.input_path().display()))?;

            println!("\n=== Validation Passed ===");
            print_summary(&normalized.summary());
            println!("\n(dry run - no data written to disk)");
        }

        Commands::Inspect { output_dir } => {
            let dir = output_dir.unwrap_or(config.output_dir);
            let storage = StorageConfig::new(dir.clone());

            println!("\n=== Output Tables ({}) ===", dir.display());
            for table in OutputTable::ALL {
                match table_row_count(&storage, table)? {
                    Some(count) => println!("{:<18}{}", table.filename(), count),
                    None => println!("{:<18}(missing)", table.filename()),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn apply_input_overrides(
    config: &mut AppConfig,
    input_dir: Option<PathBuf>,
    filename: Option<String>,
) {
    if let Some(dir) = input_dir {
        config.input_dir = dir;
    }
    if let Some(name) = filename {
        config.filename = name;
    }
}

fn print_summary(summary: &RunSummary) {
    println!("Teams:       {}", summary.teams);
    println!("Matches:     {}", summary.matches);
    println!("Players:     {}", summary.players);
    println!("Statistics:  {}", summary.statistics);
}
