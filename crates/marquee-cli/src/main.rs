use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{AppConfig, DistanceConfig};

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Auto-scrolling terminal list viewer")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Table file to show (shorthand for `run`)
    file: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Configuration file (default: ~/.config/marquee/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
struct Overrides {
    /// Cells per step when positive, rows per step when negative, 0 disables
    #[arg(short = 'd', long, allow_hyphen_values = true)]
    distance: Option<String>,

    /// Milliseconds between scroll steps
    #[arg(short = 's', long)]
    speed: Option<u64>,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    no_header: bool,
}

impl Overrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(distance) = &self.distance {
            config.marquee.distance = DistanceConfig::parse(distance);
        }
        if let Some(speed) = self.speed {
            config.marquee.speed_ms = speed;
        }
        if self.no_header {
            config.list.header.show = false;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a table file as an auto-scrolling list
    Run {
        /// Table file (.json, or tab separated text)
        file: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Log to a file so output does not tear the alternate screen
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    if let Some(Commands::InitConfig { force }) = cli.command {
        return commands::init_config::run(&config_path, force);
    }

    // Load configuration
    let mut config = AppConfig::load_from(&config_path)?;
    init_logging(&config)?;
    tracing::info!(path = %config_path.display(), "Configuration loaded");
    for warning in &config.deprecation_warnings {
        tracing::warn!("{}", warning);
    }

    let (file, overrides) = match cli.command {
        Some(Commands::Run { file, overrides }) => (file, overrides),
        _ => match cli.file {
            Some(file) => (file, cli.overrides),
            None => anyhow::bail!("No table file given.\nUsage: marquee <FILE>"),
        },
    };
    overrides.apply(&mut config);

    commands::run::run(Arc::new(config), &file).await
}
