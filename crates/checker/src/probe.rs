//! Health probe abstraction and outcome recording

use crate::registry::DomainRegistry;
use async_trait::async_trait;
use std::time::Duration;
use types::{Endpoint, Health, RequestError};

/// Anything that can classify one endpoint as UP or DOWN
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Run a single check bounded by `max_latency`.
    ///
    /// Transport failures are a DOWN result, not an error. An error means the
    /// endpoint's request could not be constructed at all.
    async fn probe(&self, endpoint: &Endpoint, max_latency: Duration) -> Result<Health, RequestError>;
}

/// Probe an endpoint and record the outcome on its domain
pub async fn evaluate<P>(
    probe: &P,
    endpoint: &Endpoint,
    registry: &mut DomainRegistry,
    max_latency: Duration,
) -> Result<Health, RequestError>
where
    P: HealthProbe + ?Sized,
{
    let health = probe.probe(endpoint, max_latency).await?;

    tracing::debug!(
        endpoint = %endpoint.name,
        url = %endpoint.url,
        health = %health,
        "Endpoint checked"
    );

    registry.record(endpoint.domain, health);
    Ok(health)
}
