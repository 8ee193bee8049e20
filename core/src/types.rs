//! Domain types for the feed.
//!
//! # Design
//! `FeedItem` is the validated domain record. It is intentionally not
//! `Deserialize`: the wire shape (`image` instead of `image_url`, raw strings
//! for ids and links) lives in the mapper, so the domain type cannot be built
//! from unvalidated JSON by accident.

use url::Url;
use uuid::Uuid;

use crate::error::LoaderError;

/// A single entry of the remote feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Url,
}

/// Outcome of one `FeedLoader::load` call.
pub type LoadFeedResult = Result<Vec<FeedItem>, LoaderError>;

/// Completion handed to `FeedLoader::load`. Invoked at most once.
pub type LoadFeedCompletion = Box<dyn FnOnce(LoadFeedResult) + Send + 'static>;

/// Anything that can asynchronously produce the feed.
pub trait FeedLoader {
    fn load(&self, completion: LoadFeedCompletion);
}
