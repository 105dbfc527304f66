//! Outbound request construction

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Body, Method, Request, Url};
use std::collections::HashMap;
use std::time::Duration;
use types::{Endpoint, RequestError};

/// Build the request for an endpoint, optionally bound to a deadline
pub fn build_request(endpoint: &Endpoint, deadline: Option<Duration>) -> Result<Request, RequestError> {
    create_request(
        &endpoint.method,
        &endpoint.url,
        endpoint.body.as_deref().unwrap_or_default(),
        &endpoint.headers,
        deadline,
    )
}

/// Create a new HTTP request.
///
/// An empty method means GET and an empty body means no body at all. Each
/// header replaces any existing value with the same name; headers are
/// single-valued.
pub fn create_request(
    method: &str,
    raw_url: &str,
    body: &str,
    headers: &HashMap<String, String>,
    deadline: Option<Duration>,
) -> Result<Request, RequestError> {
    let method = if method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(method.as_bytes()).map_err(|_| RequestError::InvalidMethod {
            method: method.to_string(),
        })?
    };

    let url = Url::parse(raw_url).map_err(|e| RequestError::InvalidUrl {
        url: raw_url.to_string(),
        reason: e.to_string(),
    })?;

    let mut request = Request::new(method, url);

    if !body.is_empty() {
        *request.body_mut() = Some(Body::from(body.to_string()));
    }

    for (field, value) in headers {
        let name = HeaderName::from_bytes(field.as_bytes()).map_err(|_| {
            RequestError::InvalidHeaderName {
                name: field.clone(),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| RequestError::InvalidHeaderValue {
            name: field.clone(),
        })?;
        request.headers_mut().insert(name, value);
    }

    *request.timeout_mut() = deadline;

    Ok(request)
}
