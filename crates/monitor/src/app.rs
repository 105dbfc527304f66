//! Main application structure and lifecycle management

use crate::{reporter::Reporter, scheduler::Scheduler};
use anyhow::{Context, Result};
use checker::{HealthChecker, TargetSet};
use tokio_util::sync::CancellationToken;
use tracing::info;
use types::Endpoint;

/// Main application that coordinates all components
pub struct Application {
    scheduler: Scheduler<HealthChecker>,
}

impl Application {
    /// Create a new application instance.
    ///
    /// Every endpoint is validated and resolved here; nothing is checked
    /// unless the whole target set builds.
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self> {
        info!("Initializing application components...");

        let targets = TargetSet::build(endpoints).context("Failed to build health check targets")?;

        let checker = HealthChecker::new().context("Failed to create HTTP client")?;

        let scheduler = Scheduler::new(targets, checker, Reporter::stdout());

        info!("Application components initialized successfully");

        Ok(Self { scheduler })
    }

    /// Run until shut down or a fatal error occurs
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting health checks...");
        self.scheduler.run().await.context("Health check scheduler failed")
    }

    /// Handle that stops the application from another task
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.scheduler.shutdown_handle()
    }
}
