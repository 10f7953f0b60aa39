//! Executing `HttpRequest` values against the network.

use std::fmt;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Perform one HTTP GET and return the status, headers, and body.
///
/// Implementations must not retry and must not turn non-2xx statuses into
/// errors; only failing to obtain a response is an error.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).get(request)
    }
}

/// Blocking transport on a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent, e.g. one with timeouts or a proxy.
    ///
    /// The agent should have `http_status_as_error(false)`, otherwise error
    /// statuses surface as `ApiError::Transport`.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let pairs = request.query.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        let mut response = self
            .agent
            .get(&request.url)
            .query_pairs(pairs)
            .call()
            .inspect_err(|e| warn!(url = %request.url, error = %e, "request failed"))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
