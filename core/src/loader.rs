//! Remote feed loader: GET the configured URL, map the outcome.
//!
//! # Design
//! `RemoteFeedLoader` holds its URL, its client, and a liveness token. Every
//! completion it hands to the client captures only a `Weak` to that token,
//! so once the loader is dropped, late transport callbacks are swallowed
//! instead of reaching the caller. The loader keeps no per-request state.

use std::sync::{Arc, Weak};

use url::Url;

use crate::error::LoaderError;
use crate::http::{HttpClient, HttpClientResult};
use crate::mapper;
use crate::types::{FeedLoader, LoadFeedCompletion, LoadFeedResult};

/// Loads the feed from a fixed URL through an injected `HttpClient`.
#[derive(Debug)]
pub struct RemoteFeedLoader<C> {
    url: Url,
    client: C,
    alive: Arc<()>,
}

impl<C: HttpClient> RemoteFeedLoader<C> {
    pub fn new(url: Url, client: C) -> Self {
        Self {
            url,
            client,
            alive: Arc::new(()),
        }
    }

    /// Issues one GET and delivers exactly one result, unless the loader is
    /// dropped before the client completes.
    pub fn load<F>(&self, completion: F)
    where
        F: FnOnce(LoadFeedResult) + Send + 'static,
    {
        let alive: Weak<()> = Arc::downgrade(&self.alive);
        tracing::debug!(url = %self.url, "Loading feed");

        self.client.get(
            &self.url,
            Box::new(move |result| {
                let Some(_guard) = alive.upgrade() else {
                    tracing::debug!("Feed loader dropped before completion, discarding result");
                    return;
                };
                completion(map_result(result));
            }),
        );
    }
}

impl<C: HttpClient> FeedLoader for RemoteFeedLoader<C> {
    fn load(&self, completion: LoadFeedCompletion) {
        RemoteFeedLoader::load(self, completion)
    }
}

fn map_result(result: HttpClientResult) -> LoadFeedResult {
    match result {
        Ok((data, response)) => mapper::map(&data, &response),
        Err(e) => {
            tracing::debug!(error = %e, "Feed request failed");
            Err(LoaderError::Connectivity)
        }
    }
}
