//! Periodic check-and-report scheduler

use crate::reporter::Reporter;
use anyhow::Result;
use checker::{evaluate, HealthProbe, TargetSet};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use types::{AvailabilityReport, MonitorError};

/// Time between the starts of two cycles
pub const CHECK_INTERVAL: Duration = Duration::from_secs(15);

/// Latency bound for a single endpoint check
pub const MAX_LATENCY: Duration = Duration::from_millis(500);

/// Drives check cycles over a target set until shut down
pub struct Scheduler<P> {
    targets: TargetSet,
    probe: P,
    reporter: Reporter,
    shutdown: CancellationToken,
    cycles: u64,
}

impl<P: HealthProbe> Scheduler<P> {
    /// Create a new scheduler
    pub fn new(targets: TargetSet, probe: P, reporter: Reporter) -> Self {
        Self {
            targets,
            probe,
            reporter,
            shutdown: CancellationToken::new(),
            cycles: 0,
        }
    }

    /// Token that stops [`Scheduler::run`] once the current cycle finishes
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run cycles on a fixed 15 second tick until shut down.
    ///
    /// The ticker starts once and keeps its own schedule: a cycle that
    /// overruns the interval is followed immediately by the next one, and
    /// missed ticks are dropped rather than replayed.
    pub async fn run(&mut self) -> Result<()> {
        let mut ticker = interval(CHECK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            endpoints = self.targets().endpoints().len(),
            domains = self.targets().registry().len(),
            interval_secs = CHECK_INTERVAL.as_secs(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(cycles = self.cycles, "Scheduler stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            self.run_cycle().await?;
        }
    }

    /// Check every endpoint once, in order, then emit the report.
    ///
    /// A request that cannot be built aborts the cycle: it means an
    /// unvalidated endpoint reached the live loop.
    pub async fn run_cycle(&mut self) -> Result<AvailabilityReport> {
        self.cycles += 1;
        let cycle = self.cycles;
        tracing::debug!(cycle, "Starting check cycle");

        let (endpoints, registry) = self.targets.parts_mut();
        for endpoint in endpoints {
            evaluate(&self.probe, endpoint, registry, MAX_LATENCY)
                .await
                .map_err(|e| {
                    error!(endpoint = %endpoint.name, error = %e, "Failed to create HTTP request");
                    MonitorError::request(&endpoint.name, e)
                })?;
        }

        Ok(self.reporter.emit(cycle, self.targets.registry()))
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::SharedBuffer;
    use async_trait::async_trait;
    use checker::HealthChecker;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;
    use types::{Endpoint, Health, RequestError};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Records when it was called and optionally takes a while to answer
    #[derive(Clone, Default)]
    struct RecordingProbe {
        calls: Arc<Mutex<Vec<Instant>>>,
        delays: Vec<Duration>,
        fail: bool,
    }

    impl RecordingProbe {
        fn offsets_secs(&self, start: Instant) -> Vec<u64> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|at| at.duration_since(start).as_secs())
                .collect()
        }
    }

    #[async_trait]
    impl HealthProbe for RecordingProbe {
        async fn probe(&self, endpoint: &Endpoint, _max_latency: Duration) -> Result<Health, RequestError> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Instant::now());
                calls.len() - 1
            };

            if self.fail {
                return Err(RequestError::InvalidMethod {
                    method: endpoint.method.clone(),
                });
            }
            if let Some(delay) = self.delays.get(call) {
                tokio::time::sleep(*delay).await;
            }
            Ok(Health::Up)
        }
    }

    fn single_target() -> TargetSet {
        TargetSet::build(vec![Endpoint::new("index", "http://example.com/")]).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_every_interval() {
        let probe = RecordingProbe::default();
        let buffer = SharedBuffer::default();
        let mut scheduler = Scheduler::new(single_target(), probe.clone(), Reporter::new(buffer.clone()));

        let start = Instant::now();
        let result = tokio::time::timeout(Duration::from_secs(46), scheduler.run()).await;
        assert!(result.is_err(), "scheduler should still be running");

        assert_eq!(probe.offsets_secs(start), vec![0, 15, 30, 45]);
        assert_eq!(
            buffer.contents().lines().collect::<Vec<_>>(),
            vec!["example.com has 100% availability percentage"; 4]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_cycle_runs_next_immediately_without_catch_up() {
        let probe = RecordingProbe {
            delays: vec![Duration::from_secs(20)],
            ..Default::default()
        };
        let mut scheduler = Scheduler::new(
            single_target(),
            probe.clone(),
            Reporter::new(SharedBuffer::default()),
        );

        let start = Instant::now();
        let _ = tokio::time::timeout(Duration::from_secs(46), scheduler.run()).await;

        assert_eq!(probe.offsets_secs(start), vec![0, 20, 30, 45]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_between_cycles() {
        let probe = RecordingProbe::default();
        let mut scheduler = Scheduler::new(
            single_target(),
            probe.clone(),
            Reporter::new(SharedBuffer::default()),
        );

        let handle = scheduler.shutdown_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(31)).await;
            handle.cancel();
        });

        let start = Instant::now();
        scheduler.run().await.unwrap();
        assert_eq!(probe.offsets_secs(start), vec![0, 15, 30]);
    }

    #[tokio::test]
    async fn test_shutdown_before_start() {
        let probe = RecordingProbe::default();
        let mut scheduler = Scheduler::new(
            single_target(),
            probe.clone(),
            Reporter::new(SharedBuffer::default()),
        );

        scheduler.shutdown_handle().cancel();
        scheduler.run().await.unwrap();
        assert!(probe.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_error_stops_scheduler() {
        let probe = RecordingProbe {
            fail: true,
            ..Default::default()
        };
        let buffer = SharedBuffer::default();
        let mut scheduler = Scheduler::new(single_target(), probe, Reporter::new(buffer.clone()));

        let err = scheduler.run().await.unwrap_err();
        assert!(err.to_string().contains("index"));
        assert_eq!(buffer.contents(), "");
    }

    #[tokio::test]
    async fn test_cycle_aggregates_by_domain() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/careers"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        // Point both hostnames at the mock server
        let addr = *mock_server.address();
        let client = reqwest::Client::builder()
            .resolve("fetch.com", addr)
            .resolve("example.com", addr)
            .no_proxy()
            .build()
            .unwrap();
        let port = addr.port();

        let targets = TargetSet::build(vec![
            Endpoint::new("fetch.com index page", format!("http://fetch.com:{}/", port)),
            Endpoint::new("fetch.com careers page", format!("http://fetch.com:{}/careers", port)),
            Endpoint::new("example.com index page", format!("http://example.com:{}/", port)),
        ])
        .unwrap();

        let buffer = SharedBuffer::default();
        let mut scheduler = Scheduler::new(
            targets,
            HealthChecker::with_client(client),
            Reporter::new(buffer.clone()),
        );

        let report = scheduler.run_cycle().await.unwrap();
        assert_eq!(report.cycle, 1);
        assert_eq!(
            buffer.contents(),
            "fetch.com has 50% availability percentage\n\
             example.com has 100% availability percentage\n"
        );

        let fetch = scheduler.targets().registry().get_by_name("fetch.com").unwrap();
        assert_eq!(fetch.up_count(), 1);
        assert_eq!(fetch.total_count(), 2);
    }

    #[tokio::test]
    async fn test_slow_endpoint_counts_as_down() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
            .mount(&mock_server)
            .await;

        let targets = TargetSet::build(vec![Endpoint::new("slow", mock_server.uri())]).unwrap();
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let buffer = SharedBuffer::default();
        let mut scheduler = Scheduler::new(
            targets,
            HealthChecker::with_client(client),
            Reporter::new(buffer.clone()),
        );

        scheduler.run_cycle().await.unwrap();

        let domain = scheduler.targets().registry().get_by_name("127.0.0.1").unwrap();
        assert_eq!(domain.up_count(), 0);
        assert_eq!(domain.total_count(), 1);
        assert_eq!(buffer.contents(), "127.0.0.1 has 0% availability percentage\n");
    }
}
