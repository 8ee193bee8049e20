//! Validation of raw feed payloads into `FeedItem`s.
//!
//! # Design
//! A pure function over `(bytes, response)`. The status check precedes any
//! parsing, so a non-200 response is `InvalidData` even when its body would
//! decode. Decoding is all-or-nothing: one bad record rejects the whole
//! payload. Wire DTOs are private to this module; only `FeedItem` escapes.

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::error::LoaderError;
use crate::http::HttpResponse;
use crate::types::FeedItem;

const OK_200: u16 = 200;

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

#[derive(Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(item: RemoteFeedItem) -> Self {
        FeedItem {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image,
        }
    }
}

/// Maps a transport response into feed items, preserving payload order.
pub fn map(data: &[u8], response: &HttpResponse) -> Result<Vec<FeedItem>, LoaderError> {
    if response.status != OK_200 {
        tracing::debug!(status = response.status, url = %response.url, "Rejecting non-200 feed response");
        return Err(LoaderError::InvalidData);
    }

    let root: Root = serde_json::from_slice(data).map_err(|e| {
        tracing::debug!(error = %e, url = %response.url, "Feed payload failed validation");
        LoaderError::InvalidData
    })?;

    Ok(root.items.into_iter().map(FeedItem::from).collect())
}
