//! Network adapter: an `HttpClient` backed by a URL-loading session.
//!
//! # Design
//! The thing that performs I/O is the `UrlSession` trait. It reports a raw
//! three-way outcome (data, response, error), any combination of which may be
//! missing. `UrlSessionHttpClient` owns the only place where that outcome is
//! normalized into an `HttpClientResult`, so a deterministic session stub can
//! exercise every branch without touching the network.
//!
//! `UreqSession` is the production session. Each data task runs a blocking
//! ureq GET on its own thread and completes from that thread. HTTP error
//! statuses are delivered as responses, never as transport errors; status
//! interpretation belongs to the mapper. Bodies are read in full unless
//! `SessionConfig::max_body_bytes` is set; a body over that limit is never
//! handed on truncated, the task fails with `TransportError::BodyTooLarge`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ureq::ResponseExt;
use url::Url;

use crate::error::TransportError;
use crate::http::{HttpClient, HttpClientResult, HttpCompletion, HttpRequest, HttpResponse};

/// Response reported by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResponse {
    Http(HttpResponse),
    /// A response for a non-HTTP scheme; carries no status code.
    Other { url: Url },
}

/// Raw outcome of a data task. Every field may independently be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTaskOutcome {
    pub data: Option<Vec<u8>>,
    pub response: Option<UrlResponse>,
    pub error: Option<TransportError>,
}

pub type DataTaskCompletion = Box<dyn FnOnce(DataTaskOutcome) + Send + 'static>;

/// Starts a request and reports its raw outcome exactly once.
pub trait UrlSession {
    fn data_task(&self, request: HttpRequest, completion: DataTaskCompletion);
}

impl<T: UrlSession + ?Sized> UrlSession for Arc<T> {
    fn data_task(&self, request: HttpRequest, completion: DataTaskCompletion) {
        (**self).data_task(request, completion)
    }
}

/// `HttpClient` that issues GETs through a `UrlSession`.
#[derive(Debug, Clone)]
pub struct UrlSessionHttpClient<S> {
    session: S,
}

impl<S: UrlSession> UrlSessionHttpClient<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }
}

impl<S: UrlSession> HttpClient for UrlSessionHttpClient<S> {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        self.session.data_task(
            HttpRequest::get(url),
            Box::new(move |outcome| completion(normalize(outcome))),
        );
    }
}

fn normalize(outcome: DataTaskOutcome) -> HttpClientResult {
    let DataTaskOutcome {
        data,
        response,
        error,
    } = outcome;

    match (error, response) {
        (Some(error), _) => Err(error),
        (None, Some(UrlResponse::Http(response))) => Ok((data.unwrap_or_default(), response)),
        (None, _) => Err(TransportError::UnexpectedRepresentation),
    }
}

/// Settings for `UreqSession`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound on the whole exchange, connect through body read.
    pub timeout: Option<Duration>,
    /// Largest body read before the task fails with `BodyTooLarge`.
    /// Defaults to `u64::MAX`, i.e. no limit.
    pub max_body_bytes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            max_body_bytes: u64::MAX,
        }
    }
}

/// Production `UrlSession` built on ureq.
#[derive(Debug, Clone)]
pub struct UreqSession {
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl UreqSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for UreqSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlSession for UreqSession {
    fn data_task(&self, request: HttpRequest, completion: DataTaskCompletion) {
        let agent = self.agent.clone();
        let max_body_bytes = self.max_body_bytes;
        thread::spawn(move || completion(execute(&agent, &request, max_body_bytes)));
    }
}

fn execute(agent: &ureq::Agent, request: &HttpRequest, max_body_bytes: u64) -> DataTaskOutcome {
    tracing::debug!(method = request.method.as_str(), url = %request.url, "Starting data task");

    let mut response = match agent.get(request.url.as_str()).call() {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, url = %request.url, "Request failed");
            return DataTaskOutcome {
                error: Some(TransportError::Request(e.to_string())),
                ..DataTaskOutcome::default()
            };
        }
    };

    let status = response.status().as_u16();
    // Redirects are followed, so report where the body actually came from.
    let url = Url::parse(&response.get_uri().to_string()).unwrap_or_else(|_| request.url.clone());

    match response.body_mut().with_config().limit(max_body_bytes).read_to_vec() {
        Ok(data) => DataTaskOutcome {
            data: Some(data),
            response: Some(UrlResponse::Http(HttpResponse::new(status, &url))),
            error: None,
        },
        Err(ureq::Error::BodyExceedsLimit(limit)) => {
            tracing::warn!(limit, status, %url, "Response body exceeds configured limit");
            DataTaskOutcome {
                error: Some(TransportError::BodyTooLarge { limit }),
                ..DataTaskOutcome::default()
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, status, %url, "Failed to read response body");
            DataTaskOutcome {
                error: Some(TransportError::Request(e.to_string())),
                ..DataTaskOutcome::default()
            }
        }
    }
}
