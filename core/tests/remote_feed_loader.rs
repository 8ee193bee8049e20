//! Behaviour of `RemoteFeedLoader` against a recording `HttpClient`.
//!
//! # Design
//! `HttpClientSpy` never touches the network. It records every requested URL
//! with its completion in call order, and the test resolves a specific
//! pending call by index, so each case controls exactly when and how the
//! transport answers.

use std::sync::{Arc, Mutex};

use feed_core::{
    FeedItem, FeedLoader, HttpClient, HttpCompletion, HttpResponse, LoadFeedResult, LoaderError,
    RemoteFeedLoader, TransportError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use uuid::Uuid;

#[derive(Default)]
struct HttpClientSpy {
    messages: Mutex<Vec<(Url, Option<HttpCompletion>)>>,
}

impl HttpClient for HttpClientSpy {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        self.messages.lock().unwrap().push((url.clone(), Some(completion)));
    }
}

impl HttpClientSpy {
    fn requested_urls(&self) -> Vec<Url> {
        self.messages.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    fn take(&self, index: usize) -> (Url, HttpCompletion) {
        let mut messages = self.messages.lock().unwrap();
        let (url, completion) = &mut messages[index];
        (url.clone(), completion.take().expect("request already completed"))
    }

    fn complete_with_error(&self, index: usize) {
        self.complete_with_transport_error(TransportError::Request("any error".to_string()), index);
    }

    fn complete_with_transport_error(&self, error: TransportError, index: usize) {
        let (_, completion) = self.take(index);
        completion(Err(error));
    }

    fn complete_with_status(&self, status: u16, data: &[u8], index: usize) {
        let (url, completion) = self.take(index);
        completion(Ok((data.to_vec(), HttpResponse::new(status, &url))));
    }
}

fn any_url() -> Url {
    Url::parse("https://a-given-url.com").unwrap()
}

fn make_sut(url: Url) -> (RemoteFeedLoader<Arc<HttpClientSpy>>, Arc<HttpClientSpy>) {
    let client = Arc::new(HttpClientSpy::default());
    (RemoteFeedLoader::new(url, client.clone()), client)
}

fn make_item(
    id: Uuid,
    description: Option<&str>,
    location: Option<&str>,
    image_url: &str,
) -> (FeedItem, serde_json::Value) {
    let item = FeedItem {
        id,
        description: description.map(str::to_string),
        location: location.map(str::to_string),
        image_url: Url::parse(image_url).unwrap(),
    };

    let mut json = json!({ "id": id.to_string(), "image": image_url });
    if let Some(description) = description {
        json["description"] = json!(description);
    }
    if let Some(location) = location {
        json["location"] = json!(location);
    }
    (item, json)
}

fn items_json(items: Vec<serde_json::Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({ "items": items })).unwrap()
}

fn capture() -> (Arc<Mutex<Vec<LoadFeedResult>>>, impl FnOnce(LoadFeedResult) + Send + 'static) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    (received, move |result| sink.lock().unwrap().push(result))
}

fn expect(
    sut: &RemoteFeedLoader<Arc<HttpClientSpy>>,
    expected: LoadFeedResult,
    action: impl FnOnce(),
) {
    let (received, completion) = capture();
    sut.load(completion);

    action();

    assert_eq!(*received.lock().unwrap(), vec![expected]);
}

#[test]
fn init_does_not_request_data() {
    let (_sut, client) = make_sut(any_url());
    assert!(client.requested_urls().is_empty());
}

#[test]
fn load_requests_data_from_url() {
    let url = Url::parse("https://a-given-url.com/feed").unwrap();
    let (sut, client) = make_sut(url.clone());

    sut.load(|_| {});

    assert_eq!(client.requested_urls(), vec![url]);
}

#[test]
fn load_twice_requests_data_twice() {
    let url = Url::parse("https://a-given-url.com/feed").unwrap();
    let (sut, client) = make_sut(url.clone());

    sut.load(|_| {});
    sut.load(|_| {});

    assert_eq!(client.requested_urls(), vec![url.clone(), url]);
}

#[test]
fn load_n_times_issues_n_requests_in_order() {
    for n in 0..5 {
        let (sut, client) = make_sut(any_url());
        for _ in 0..n {
            sut.load(|_| {});
        }
        assert_eq!(client.requested_urls().len(), n);
    }
}

#[test]
fn nothing_is_delivered_before_the_client_resolves() {
    let (sut, client) = make_sut(any_url());
    let (received, completion) = capture();

    sut.load(completion);
    assert!(received.lock().unwrap().is_empty());

    client.complete_with_status(200, &items_json(vec![]), 0);
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[test]
fn load_delivers_connectivity_error_on_client_error() {
    let (sut, client) = make_sut(any_url());

    expect(&sut, Err(LoaderError::Connectivity), || {
        client.complete_with_error(0)
    });
}

#[test]
fn load_folds_every_transport_error_into_connectivity() {
    let (sut, client) = make_sut(any_url());
    let errors = [
        TransportError::Request("any error".to_string()),
        TransportError::BodyTooLarge { limit: 16 },
        TransportError::UnexpectedRepresentation,
    ];

    for (index, error) in errors.into_iter().enumerate() {
        expect(&sut, Err(LoaderError::Connectivity), || {
            client.complete_with_transport_error(error, index)
        });
    }
}

#[test]
fn load_delivers_invalid_data_on_non_200_response() {
    let (sut, client) = make_sut(any_url());
    let json = items_json(vec![]);

    for (index, status) in [199, 201, 300, 400, 500].into_iter().enumerate() {
        expect(&sut, Err(LoaderError::InvalidData), || {
            client.complete_with_status(status, &json, index)
        });
    }
}

#[test]
fn load_delivers_invalid_data_on_200_with_invalid_json() {
    let (sut, client) = make_sut(any_url());

    expect(&sut, Err(LoaderError::InvalidData), || {
        client.complete_with_status(200, b"invalid json", 0)
    });
}

#[test]
fn load_delivers_no_items_on_200_with_empty_list() {
    let (sut, client) = make_sut(any_url());

    expect(&sut, Ok(Vec::new()), || {
        client.complete_with_status(200, &items_json(vec![]), 0)
    });
}

#[test]
fn load_delivers_items_on_200_with_items() {
    let (sut, client) = make_sut(any_url());

    let (item1, json1) = make_item(Uuid::new_v4(), None, None, "http://a-url.com");
    let (item2, json2) = make_item(
        Uuid::new_v4(),
        Some("a description"),
        Some("a location"),
        "http://another-url.com",
    );

    expect(&sut, Ok(vec![item1, item2]), || {
        client.complete_with_status(200, &items_json(vec![json1, json2]), 0)
    });
}

#[test]
fn completions_are_addressed_by_call_index() {
    let (sut, client) = make_sut(any_url());
    let (first, first_completion) = capture();
    let (second, second_completion) = capture();

    sut.load(first_completion);
    sut.load(second_completion);

    client.complete_with_error(1);
    client.complete_with_status(200, &items_json(vec![]), 0);

    assert_eq!(*first.lock().unwrap(), vec![Ok(Vec::new())]);
    assert_eq!(*second.lock().unwrap(), vec![Err(LoaderError::Connectivity)]);
}

#[test]
fn load_does_not_deliver_after_loader_is_dropped() {
    let (sut, client) = make_sut(any_url());
    let (received, completion) = capture();

    sut.load(completion);
    drop(sut);
    client.complete_with_status(200, &items_json(vec![]), 0);

    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn works_through_the_feed_loader_trait() {
    let (sut, client) = make_sut(any_url());
    let loader: &dyn FeedLoader = &sut;
    let (received, completion) = capture();

    loader.load(Box::new(completion));
    client.complete_with_error(0);

    assert_eq!(*received.lock().unwrap(), vec![Err(LoaderError::Connectivity)]);
}
