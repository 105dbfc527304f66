//! Endpoints paired with the registry of their domains

use crate::registry::{resolve_domain, DomainRegistry};
use crate::request::build_request;
use tracing::info;
use types::{Endpoint, MonitorError, Result};

/// Everything the scheduler checks, built once at startup
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    endpoints: Vec<Endpoint>,
    registry: DomainRegistry,
}

impl TargetSet {
    /// Validate every endpoint's request and resolve its domain.
    ///
    /// Any failure aborts construction: a target set is either complete or
    /// not built at all.
    pub fn build(endpoints: Vec<Endpoint>) -> Result<Self> {
        let mut registry = DomainRegistry::new();
        let mut resolved = Vec::with_capacity(endpoints.len());

        for mut endpoint in endpoints {
            build_request(&endpoint, None)
                .map_err(|e| MonitorError::request(&endpoint.name, e))?;

            let domain = resolve_domain(Some(&mut registry), &endpoint.url)
                .map_err(|e| MonitorError::domain(&endpoint.name, e))?;
            endpoint.domain = Some(domain);

            resolved.push(endpoint);
        }

        info!(
            endpoints = resolved.len(),
            domains = registry.len(),
            "Target set built"
        );

        Ok(Self {
            endpoints: resolved,
            registry,
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    /// Endpoints alongside mutable access to their domains
    pub fn parts_mut(&mut self) -> (&[Endpoint], &mut DomainRegistry) {
        (&self.endpoints, &mut self.registry)
    }
}
