use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub image: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeedPayload {
    pub items: Vec<FeedItem>,
}

const FIXTURE_IDS: [&str; 8] = [
    "73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6",
    "BA298A85-6275-48D3-8315-9C8F7C1CD109",
    "5A0D45B3-8E26-4385-8C5D-213E160A5E3C",
    "FF0ECFE2-2879-403F-8DBE-A83B4010B340",
    "DC97EF5E-2CC9-4905-A8AD-3C351C311001",
    "557D87F1-25D3-4D77-82E9-364B2ED9CB30",
    "A83284EF-C2DF-415D-AB73-2A9B8B04950B",
    "F79BD7F8-063F-46E2-8147-A67635C3BB01",
];

/// Upper bound on `/feed/repeat/{count}`.
pub const MAX_REPEAT: usize = 100_000;

fn fixture_id(index: usize) -> Uuid {
    Uuid::parse_str(FIXTURE_IDS[index]).expect("fixture ids are valid UUID literals")
}

/// The fixed eight-item feed served at `/feed`.
///
/// Items 2 and 4 have no description, items 3 and 4 have no location.
pub fn fixture() -> FeedPayload {
    let items = (0..FIXTURE_IDS.len())
        .map(|index| {
            let n = index + 1;
            FeedItem {
                id: fixture_id(index),
                description: (n != 2 && n != 4).then(|| format!("Description {n}")),
                location: (n != 3 && n != 4).then(|| format!("Location {n}")),
                image: format!("https://url-{n}.com"),
            }
        })
        .collect();
    FeedPayload { items }
}

pub fn app() -> Router {
    Router::new()
        .route("/feed", get(feed))
        .route("/feed/empty", get(empty_feed))
        .route("/feed/invalid", get(invalid_feed))
        .route("/feed/repeat/{count}", get(repeated_feed))
        .route("/redirect/feed", get(redirect_to_feed))
        .route("/status/{code}", get(with_status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Mock feed server listening");
    }
    axum::serve(listener, app()).await
}

async fn feed() -> Json<FeedPayload> {
    Json(fixture())
}

async fn empty_feed() -> Json<FeedPayload> {
    Json(FeedPayload::default())
}

async fn invalid_feed() -> &'static str {
    "invalid json"
}

/// The fixture repeated `count` times, for exercising large bodies.
async fn repeated_feed(Path(count): Path<usize>) -> Result<Json<FeedPayload>, StatusCode> {
    if count > MAX_REPEAT {
        return Err(StatusCode::BAD_REQUEST);
    }
    let items = fixture().items;
    let items = std::iter::repeat(items).take(count).flatten().collect();
    Ok(Json(FeedPayload { items }))
}

async fn redirect_to_feed() -> Redirect {
    Redirect::temporary("/feed")
}

async fn with_status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    tracing::debug!(code, %status, "Serving empty feed with status");
    (status, Json(FeedPayload::default()))
}
