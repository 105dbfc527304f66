//! Error types for the checkhealth monitor

use thiserror::Error;

/// Main error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An endpoint whose request cannot be constructed
    #[error("Request construction error for endpoint {endpoint}: {message}")]
    RequestConstruction { endpoint: String, message: String },

    /// An endpoint whose domain cannot be resolved
    #[error("Domain resolution error for endpoint {endpoint}: {message}")]
    DomainResolution { endpoint: String, message: String },

    /// HTTP client setup errors
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors raised while turning an endpoint into an outbound HTTP request.
///
/// These are configuration defects rather than transient faults, so they are
/// never classified as a DOWN result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Method is not a valid HTTP token
    #[error("Invalid HTTP method: {method:?}")]
    InvalidMethod { method: String },

    /// URL cannot be parsed
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Header name is not a valid HTTP header name
    #[error("Invalid header name: {name:?}")]
    InvalidHeaderName { name: String },

    /// Header value contains characters not allowed in HTTP headers
    #[error("Invalid value for header {name:?}")]
    InvalidHeaderValue { name: String },
}

/// Domain resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Empty URL string
    #[error("Cannot resolve domain: provided URL was an empty string")]
    EmptyUrl,

    /// URL parse failure
    #[error("Cannot resolve domain for {url:?}: {reason}")]
    UrlParse { url: String, reason: String },

    /// No registry to resolve against
    #[error("Cannot resolve domain: domain registry is unavailable")]
    RegistryUnavailable,
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err.to_string())
    }
}

impl MonitorError {
    /// Attach the endpoint name to a request construction failure
    pub fn request(endpoint: &str, err: RequestError) -> Self {
        MonitorError::RequestConstruction {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    /// Attach the endpoint name to a domain resolution failure
    pub fn domain(endpoint: &str, err: DomainError) -> Self {
        MonitorError::DomainResolution {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
