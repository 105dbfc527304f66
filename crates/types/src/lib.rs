//! Shared types for the checkhealth monitor
//!
//! This crate contains the domain types shared by the configuration loader,
//! the health checker and the scheduler binary.

pub mod domain;
pub mod endpoint;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use domain::{
    availability_percentage, AvailabilityReport, Domain, DomainAvailability, DomainId, Health,
};
pub use endpoint::Endpoint;
pub use error::{ConfigError, DomainError, MonitorError, RequestError, Result};
