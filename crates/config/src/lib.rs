//! Configuration management for the checkhealth monitor
//!
//! This crate handles parsing and validation of the endpoint YAML file and
//! loading of runtime settings from environment variables.

pub mod help;
pub mod loader;
pub mod schema;
pub mod validation;

pub use help::{CONFIG_FORMAT_HELP, USAGE};
pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
