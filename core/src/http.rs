//! HTTP transport contract between the loader and the network stack.
//!
//! # Design
//! `RemoteFeedLoader` only ever sees the `HttpClient` trait: a single GET
//! whose outcome is delivered once through a boxed completion. The concrete
//! stack (`UrlSessionHttpClient` over `UreqSession`) and test doubles both
//! implement it, and neither needs any process-wide registration.
//!
//! Response metadata is plain owned data so it can be constructed freely in
//! tests and moved across threads.

use std::sync::Arc;

use url::Url;

use crate::error::TransportError;

/// HTTP method for a request. Only GET is ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// A request handed to a `UrlSession`. No headers, no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
}

impl HttpRequest {
    pub fn get(url: &Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.clone(),
        }
    }
}

/// The response metadata the payload mapper needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub url: Url,
}

impl HttpResponse {
    pub fn new(status: u16, url: &Url) -> Self {
        Self {
            status,
            url: url.clone(),
        }
    }
}

/// Outcome of a raw network call: body bytes plus metadata, or a transport error.
pub type HttpClientResult = Result<(Vec<u8>, HttpResponse), TransportError>;

/// Completion handed to `HttpClient::get`.
pub type HttpCompletion = Box<dyn FnOnce(HttpClientResult) + Send + 'static>;

/// Performs a GET and delivers the outcome exactly once.
///
/// Implementations may complete on any thread, but must not call
/// `completion` more than once and must not drop it without calling it.
pub trait HttpClient {
    fn get(&self, url: &Url, completion: HttpCompletion);
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        (**self).get(url, completion)
    }
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        (**self).get(url, completion)
    }
}
