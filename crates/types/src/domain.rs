//! Domain availability types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single health check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    /// 2xx response within the latency bound
    Up,
    /// Anything else
    Down,
}

impl Health {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        if (200..=299).contains(&status) {
            Health::Up
        } else {
            Health::Down
        }
    }

    pub fn is_up(self) -> bool {
        self == Health::Up
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Up => write!(f, "UP"),
            Health::Down => write!(f, "DOWN"),
        }
    }
}

/// Stable handle to a domain held by a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainId(pub usize);

/// Cumulative availability counters for one FQDN.
///
/// Counters can only move through [`Domain::record`], which keeps
/// `up_count <= total_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    name: String,
    up_count: u64,
    total_count: u64,
}

impl Domain {
    /// Create a domain with zeroed counters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            up_count: 0,
            total_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn up_count(&self) -> u64 {
        self.up_count
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Record one health check outcome
    pub fn record(&mut self, health: Health) {
        if health.is_up() {
            self.up_count += 1;
        }
        self.total_count += 1;
    }

    /// Cumulative availability since process start
    pub fn availability(&self) -> u8 {
        availability_percentage(self.up_count, self.total_count)
    }
}

/// `round(100 * up / total)` with halves rounded up, or 0 when nothing was checked
pub fn availability_percentage(up: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let up = up.min(total) as u128;
    let total = total as u128;
    ((200 * up + total) / (2 * total)) as u8
}

/// One line of an availability report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainAvailability {
    /// Domain name (FQDN)
    pub domain: String,
    /// Availability percentage in [0, 100]
    pub percentage: u8,
}

impl fmt::Display for DomainAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has {}% availability percentage",
            self.domain, self.percentage
        )
    }
}

/// Availability snapshot emitted at the end of a cycle
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// Report timestamp
    pub generated_at: DateTime<Utc>,
    /// Per-domain lines in registry order
    pub domains: Vec<DomainAvailability>,
}

impl AvailabilityReport {
    pub fn new(cycle: u64, domains: Vec<DomainAvailability>) -> Self {
        Self {
            cycle,
            generated_at: Utc::now(),
            domains,
        }
    }
}
