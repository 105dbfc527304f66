//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::Endpoint;

/// One entry of the endpoint file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Free-text description of the endpoint
    pub name: String,
    /// URL of the HTTP endpoint
    pub url: String,
    /// HTTP method (defaults to GET)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Headers added to or overriding the client defaults
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Raw request body, usually JSON-encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl EndpointConfig {
    /// Convert into the runtime endpoint descriptor
    pub fn to_endpoint(&self) -> Endpoint {
        Endpoint {
            name: self.name.clone(),
            url: self.url.clone(),
            method: self.method.clone().unwrap_or_default(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            domain: None,
        }
    }
}

/// Endpoint file contents, in file order
pub type EndpointsConfig = Vec<EndpointConfig>;

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
