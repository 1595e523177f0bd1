//! nmpilot: A terminal UI for editing nmstate interfaces and bridges

use clap::Parser;
use color_eyre::Result;
use nmpilot_tui::{App, init_audit_logger};
use nmstate_rs::{ClientConfig, MemoryProvider, NmstatectlProvider, StateProvider};
use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// nmpilot: Terminal UI for nmstate interface configuration
#[derive(Parser, Debug)]
#[command(name = "nmpilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.nmpilot/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the nmstatectl binary
    #[arg(long)]
    nmstatectl: Option<String>,

    /// Skip nmstate verification after apply
    #[arg(long)]
    no_verify: bool,

    /// Use an in-memory demo network instead of nmstatectl
    #[arg(long)]
    demo: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: /tmp/nmpilot.log)
    #[arg(long, default_value = "/tmp/nmpilot.log")]
    log_file: String,
}

impl Cli {
    /// Load the config file and apply command line overrides
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_from(path)?,
            None => ClientConfig::load_default()?,
        };

        if let Some(binary) = &self.nmstatectl {
            config.nmstatectl = binary.clone();
        }
        if self.no_verify {
            config.verify = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging to file (not stdout, which would corrupt TUI)
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(true)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    tracing::info!("Starting nmpilot");

    let config = cli.client_config()?;
    init_audit_logger(config.audit);

    let provider: Rc<dyn StateProvider> = if cli.demo {
        tracing::info!("Using in-memory demo network");
        Rc::new(MemoryProvider::demo())
    } else {
        tracing::info!("Using {} (verify: {})", config.nmstatectl, config.verify);
        Rc::new(NmstatectlProvider::from_config(&config))
    };

    let mut app = App::new(provider);
    app.run()?;

    tracing::info!("Goodbye!");
    Ok(())
}
