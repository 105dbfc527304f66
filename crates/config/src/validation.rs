//! Configuration validation utilities

use crate::schema::{EndpointConfig, Settings};
use std::collections::HashSet;
use types::utils::{extract_hostname, is_http_url};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the endpoint list
    pub fn validate(endpoints: &[EndpointConfig]) -> ValidationReport {
        let mut report = ValidationReport::new();

        if endpoints.is_empty() {
            report.add_warning("endpoints", "No endpoints configured, nothing will be checked");
            return report;
        }

        let mut names = HashSet::new();
        for (index, endpoint) in endpoints.iter().enumerate() {
            if !endpoint.name.is_empty() && !names.insert(endpoint.name.as_str()) {
                report.add_warning(
                    &format!("endpoints[{}].name", index),
                    format!("Duplicate endpoint name: {}", endpoint.name),
                );
            }

            Self::validate_endpoint(index, endpoint, &mut report);
        }

        report
    }

    fn validate_endpoint(index: usize, endpoint: &EndpointConfig, report: &mut ValidationReport) {
        let field = |name: &str| format!("endpoints[{}].{}", index, name);

        if endpoint.name.trim().is_empty() {
            report.add_warning(&field("name"), "Endpoint name is empty");
        }

        if endpoint.url.is_empty() {
            report.add_error(
                &field("url"),
                format!("URL cannot be empty for endpoint {:?}", endpoint.name),
            );
        } else {
            match extract_hostname(&endpoint.url) {
                Ok(host) if host.is_empty() => report.add_warning(
                    &field("url"),
                    format!(
                        "URL {} has no host, its availability will not be reported",
                        endpoint.url
                    ),
                ),
                Ok(_) if !is_http_url(&endpoint.url) => report.add_warning(
                    &field("url"),
                    format!("URL {} is not http(s), checks will always be DOWN", endpoint.url),
                ),
                Ok(_) => {}
                // Unparseable URLs are rejected when the target set is built
                Err(_) => {}
            }
        }

        let method = endpoint
            .method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase();
        let body = endpoint.body.as_deref().unwrap_or_default();

        if !body.is_empty() && (method == "GET" || method == "HEAD") {
            report.add_warning(
                &field("body"),
                format!("Body is set on a {} request for endpoint {:?}", method, endpoint.name),
            );
        }

        let declares_json = endpoint.headers.iter().any(|(name, value)| {
            name.eq_ignore_ascii_case("content-type") && value.contains("application/json")
        });
        if declares_json && !body.is_empty() && serde_json::from_str::<serde_json::Value>(body).is_err() {
            report.add_warning(
                &field("body"),
                format!("Body is declared as JSON but does not parse for endpoint {:?}", endpoint.name),
            );
        }
    }

    /// Validate runtime settings
    pub fn validate_settings(settings: &Settings) -> ValidationReport {
        let mut report = ValidationReport::new();

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&settings.log_level.as_str()) {
            report.add_error(
                "log_level",
                format!("Invalid log level: {}. Valid levels: {:?}", settings.log_level, valid_levels),
            );
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&settings.log_format.as_str()) {
            report.add_error(
                "log_format",
                format!("Invalid log format: {}. Valid formats: {:?}", settings.log_format, valid_formats),
            );
        }

        report
    }
}

/// Outcome of validating endpoints or settings.
///
/// Errors reject the configuration; warnings are logged and checks still run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Single finding tied to a configuration field path such as `endpoints[2].url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(field, message));
    }

    pub fn add_warning(&mut self, field: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line count of errors and warnings
    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}
