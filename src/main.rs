use std::error::Error;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use framelog::core::config::{self, CliOverrides, FramelogConfig};
use framelog::demo;
use framelog::tui::{CrosstermBackend, InterfaceOptions};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "framelog", about = "Boxed terminal message log with an input line")]
struct Args {
    /// Width of the sender column (0 hides it)
    #[arg(long)]
    sender_width: Option<usize>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand)]
enum Demo {
    /// Evaluate integer arithmetic expressions
    Calculator {
        /// Also post each expression tree as JSON
        #[arg(long)]
        show_tree: bool,
    },
    /// Post a timestamped message at a fixed interval and echo input
    Ticker {
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(loaded) => (loaded, None),
        Err(e) => (FramelogConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        sender_width: args.sender_width,
        log_level: args.log_level.clone(),
        tick_interval_ms: match &args.demo {
            Demo::Ticker { interval_ms } => *interval_ms,
            Demo::Calculator { .. } => None,
        },
    };
    let resolved = config::resolve(&file_config, &cli);

    // File logger only: the UI owns the terminal
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Framelog starting up");
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }

    let backend = Arc::new(CrosstermBackend::new());
    let options = InterfaceOptions::from(&resolved);
    match args.demo {
        Demo::Calculator { show_tree } => demo::run_calculator(backend, options, show_tree)?,
        Demo::Ticker { .. } => demo::run_ticker(
            backend,
            options,
            Duration::from_millis(resolved.tick_interval_ms),
        )?,
    }

    log::info!("Framelog shut down");
    Ok(())
}
