//! Monitored endpoint descriptor

use crate::domain::DomainId;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP method used when an endpoint does not declare one
pub const DEFAULT_METHOD: &str = "GET";

/// A single HTTP target to health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Free-text description
    pub name: String,
    /// Target URL
    pub url: String,
    /// HTTP method, empty means GET
    pub method: String,
    /// Headers added to (or overriding) the client defaults
    pub headers: HashMap<String, String>,
    /// Raw request body, sent as-is
    pub body: Option<String>,
    /// Domain this endpoint reports to, set once the target set is built
    #[serde(skip)]
    pub domain: Option<DomainId>,
}

impl Endpoint {
    /// Create a GET endpoint with no headers or body
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: String::new(),
            headers: HashMap::new(),
            body: None,
            domain: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Method to send, falling back to GET
    pub fn effective_method(&self) -> &str {
        if self.method.is_empty() {
            DEFAULT_METHOD
        } else {
            &self.method
        }
    }

    /// Body to send; an empty string means no body at all
    pub fn effective_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}
