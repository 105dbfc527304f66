//! HTTP health checker implementation

use crate::probe::HealthProbe;
use crate::request::build_request;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use types::utils::truncate_for_logging;
use types::{Endpoint, Health, MonitorError, RequestError, Result};

/// User agent sent unless an endpoint overrides it
pub const DEFAULT_USER_AGENT: &str = concat!("checkhealth/", env!("CARGO_PKG_VERSION"));

/// Health checker backed by a pooled HTTP client
#[derive(Debug, Clone)]
pub struct HealthChecker {
    http_client: Client,
}

impl HealthChecker {
    /// Create a new health checker
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| MonitorError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(http_client))
    }

    /// Use a preconfigured client (custom resolvers, proxies)
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Check one endpoint.
    ///
    /// Sending the request and draining the response body share one deadline
    /// of `max_latency`. The status decides the outcome; a drain that fails or
    /// runs out of time is ignored.
    pub async fn check(&self, endpoint: &Endpoint, max_latency: Duration) -> std::result::Result<Health, RequestError> {
        let deadline = Instant::now() + max_latency;
        let request = build_request(endpoint, Some(max_latency))?;

        if let Some(body) = endpoint.effective_body() {
            tracing::trace!(
                endpoint = %endpoint.name,
                body = %truncate_for_logging(body, 64),
                "Sending request body"
            );
        }

        let response = match timeout_at(deadline, self.http_client.execute(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::debug!(endpoint = %endpoint.name, error = %e, "Request failed");
                return Ok(Health::Down);
            }
            Err(_) => {
                tracing::debug!(
                    endpoint = %endpoint.name,
                    max_latency_ms = max_latency.as_millis() as u64,
                    "Request exceeded latency bound"
                );
                return Ok(Health::Down);
            }
        };

        let status = response.status();
        let health = Health::from_status(status.as_u16());

        match timeout_at(deadline, drain(response)).await {
            Ok(Ok(bytes)) => {
                tracing::trace!(endpoint = %endpoint.name, bytes, "Response body drained");
            }
            Ok(Err(e)) => {
                tracing::debug!(endpoint = %endpoint.name, error = %e, "Failed to drain response body");
            }
            Err(_) => {
                tracing::debug!(endpoint = %endpoint.name, "Response body drain cut off by deadline");
            }
        }

        tracing::debug!(
            endpoint = %endpoint.name,
            status = status.as_u16(),
            health = %health,
            "Health check completed"
        );

        Ok(health)
    }
}

/// Read the body to the end so the connection can go back to the pool
async fn drain(mut response: Response) -> reqwest::Result<usize> {
    let mut total = 0;
    while let Some(chunk) = response.chunk().await? {
        total += chunk.len();
    }
    Ok(total)
}

#[async_trait]
impl HealthProbe for HealthChecker {
    async fn probe(&self, endpoint: &Endpoint, max_latency: Duration) -> std::result::Result<Health, RequestError> {
        self.check(endpoint, max_latency).await
    }
}
