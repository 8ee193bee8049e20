//! Remote feed loading core.
//!
//! # Overview
//! Fetches the remote feed with a single GET and turns the raw transport
//! outcome into a validated list of `FeedItem`s or a flat `LoaderError`.
//!
//! # Design
//! - `RemoteFeedLoader` depends only on the `HttpClient` trait, injected per
//!   loader. There is no global client.
//! - `mapper::map` is a pure function from `(bytes, HttpResponse)` to items.
//! - `UrlSessionHttpClient` adapts any `UrlSession` to `HttpClient`;
//!   `UreqSession` is the production session, and tests substitute stubs.
//! - Completions are boxed `FnOnce` callbacks, delivered at most once, and
//!   never after the owning loader has been dropped.

pub mod error;
pub mod http;
pub mod loader;
pub mod mapper;
pub mod session;
pub mod types;

pub use error::{LoaderError, TransportError};
pub use http::{HttpClient, HttpClientResult, HttpCompletion, HttpMethod, HttpRequest, HttpResponse};
pub use loader::RemoteFeedLoader;
pub use session::{
    DataTaskCompletion, DataTaskOutcome, SessionConfig, UreqSession, UrlResponse, UrlSession,
    UrlSessionHttpClient,
};
pub use types::{FeedItem, FeedLoader, LoadFeedCompletion, LoadFeedResult};
