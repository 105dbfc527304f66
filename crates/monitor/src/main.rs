//! checkhealth - synthetic HTTP endpoint availability monitor

use anyhow::{Context, Result};
use clap::Parser;
use checker::TargetSet;
use config::{ConfigLoader, ConfigValidator, EndpointConfig, Settings, CONFIG_FORMAT_HELP, USAGE};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::ConfigError;

mod app;
mod reporter;
mod scheduler;

use app::Application;

/// Checks HTTP endpoints every 15 seconds and prints the cumulative
/// availability of each domain.
#[derive(Debug, Parser)]
#[command(name = "checkhealth", version, about, after_help = CONFIG_FORMAT_HELP)]
struct Cli {
    /// Path to the endpoint YAML configuration file
    file: PathBuf,

    /// Validate the configuration file and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    let settings = ConfigLoader::load_settings().context("Failed to load settings")?;
    init_logging(&settings)?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    info!("Starting checkhealth v{}", env!("CARGO_PKG_VERSION"));

    let endpoints = ConfigLoader::load(&cli.file).map_err(|e| {
        let help = help_for(&e);
        e.context(format!("Failed to load configuration\n{}", help))
    })?;

    info!(
        "Configuration loaded from: {} ({} endpoints)",
        cli.file.display(),
        endpoints.len()
    );

    let report = ConfigValidator::validate(&endpoints);
    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }

    if cli.check {
        check_targets(&endpoints)?;
        println!("{}", report.summary());
        for issue in &report.warnings {
            println!("warning: {}", issue);
        }
        return Ok(());
    }

    let endpoints = endpoints.iter().map(|e| e.to_endpoint()).collect();
    let mut app = Application::new(endpoints).context("Failed to create application")?;

    // Setup signal handling
    let shutdown = app.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => warn!("Failed to install CTRL+C signal handler: {}", e),
        }
    });

    if let Err(e) = app.run().await {
        tracing::error!("Application error: {:#}", e);
        return Err(e);
    }

    info!("checkhealth shutdown complete");
    Ok(())
}

/// Build the same target set startup would, without checking anything
fn check_targets(endpoints: &[EndpointConfig]) -> Result<()> {
    let endpoints = endpoints.iter().map(|e| e.to_endpoint()).collect();
    TargetSet::build(endpoints).context("Configuration check failed")?;
    Ok(())
}

/// Help text matching the kind of configuration failure
fn help_for(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::FileNotFound { .. }) => USAGE,
        _ => CONFIG_FORMAT_HELP,
    }
}

/// Initialize logging; diagnostics go to stderr so stdout carries only the report
fn init_logging(settings: &Settings) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    tracing::debug!(
        level = %settings.log_level,
        format = %settings.log_format,
        "Logging initialized"
    );

    Ok(())
}
