//! Health checking for HTTP endpoints
//!
//! This crate builds outbound requests from endpoint declarations, resolves
//! endpoints to their domains, and classifies each check as UP or DOWN.

pub mod client;
pub mod probe;
pub mod registry;
pub mod request;
pub mod targets;

pub use client::*;
pub use probe::*;
pub use registry::*;
pub use request::*;
pub use targets::*;
