// studyhall - Single-session study planner
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use studyhall::cli;
use studyhall::config::load_config;
use studyhall::server;

#[derive(Parser)]
#[command(name = "studyhall", version, about = "Plan one study day, then watch it run")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Plan a TOML task file instead of typing tasks in
    Plan {
        /// Task file with [[tasks]] entries
        #[arg(long)]
        tasks: PathBuf,

        /// Narrate the schedule after planning it
        #[arg(long)]
        execute: bool,

        /// Override the configured day start ("HH:MM")
        #[arg(long)]
        day_start: Option<String>,

        /// Override the configured available hours
        #[arg(long)]
        hours: Option<u32>,

        /// Override the per-task pause in milliseconds
        #[arg(long)]
        pause: Option<u64>,
    },
    /// Serve the web form front end
    Serve {
        /// Override the configured bind address ("IP:PORT")
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studyhall=info")),
        )
        .init();

    let args = Cli::parse();
    let mut config = load_config()?;

    match args.command {
        None => cli::run_interactive(&config),
        Some(Command::Plan {
            tasks,
            execute,
            day_start,
            hours,
            pause,
        }) => {
            if let Some(day_start) = day_start {
                config.planner.day_start = day_start;
            }
            if let Some(hours) = hours {
                config.planner.available_hours = hours;
            }
            if let Some(pause) = pause {
                config.executor.pause_ms = pause;
            }
            // Overrides go through the same validation as the file
            config.validate()?;
            cli::run_taskfile(&config, &tasks, execute)
        }
        Some(Command::Serve { bind }) => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            config.validate()?;
            server::serve(config).await
        }
    }
}
