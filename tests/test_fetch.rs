use std::cell::RefCell;

use fetch_qs::{Config, Error, FetchResponse, Map, Transport, fetch_typed, map_from_json};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

/// Records every request it is handed and answers with a canned response.
struct MockTransport {
    status: u16,
    body: &'static str,
    seen: RefCell<Vec<http::Request<Vec<u8>>>>,
}

impl MockTransport {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            seen: RefCell::new(Vec::new()),
        }
    }

    fn last(&self) -> http::Request<Vec<u8>> {
        self.seen.borrow_mut().pop().expect("a request was sent")
    }
}

#[derive(Debug)]
enum TransportError {
    Offline,
    Prepare(Error),
}

impl From<Error> for TransportError {
    fn from(e: Error) -> Self {
        Self::Prepare(e)
    }
}

impl Transport for MockTransport {
    type Error = TransportError;

    async fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> Result<http::Response<Vec<u8>>, TransportError> {
        self.seen.borrow_mut().push(request);
        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.as_bytes().to_vec())
            .expect("valid response"))
    }
}

#[derive(Debug, PartialEq, Deserialize)]
struct Items {
    total: u32,
}

#[derive(Debug, PartialEq, Deserialize)]
struct ApiError {
    message: String,
}

fn options(value: serde_json::Value) -> Map {
    map_from_json(value)
}

#[tokio::test]
async fn query_is_appended_to_url() {
    let transport = MockTransport::new(200, r#"{"total":2}"#);
    let response: FetchResponse<Items, ApiError> = fetch_typed(
        &transport,
        "https://example.com/items",
        [options(json!({ "query": { "page": 2, "tag": ["a", "b"], "skip": null } }))],
    )
    .await
    .unwrap();

    assert_eq!(response.json().unwrap(), Items { total: 2 });
    let request = transport.last();
    assert_eq!(request.method(), http::Method::GET);
    assert_eq!(request.uri().to_string(), "https://example.com/items?page=2&tag=a&tag=b");
}

#[tokio::test]
async fn empty_query_leaves_url_alone() {
    let transport = MockTransport::new(200, "{}");
    let _: FetchResponse<serde_json::Value> =
        fetch_typed(&transport, "https://example.com/items", [options(json!({ "query": {} }))])
            .await
            .unwrap();
    assert_eq!(transport.last().uri().to_string(), "https://example.com/items");
}

#[tokio::test]
async fn query_with_question_mark_in_url_is_rejected() {
    let transport = MockTransport::new(200, "{}");
    let err = fetch_typed::<serde_json::Value, serde_json::Value, _, _>(
        &transport,
        "https://example.com/items?page=1",
        [options(json!({ "query": { "page": 2 } }))],
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Prepare(Error::QueryConflict { ref url }) if url == "https://example.com/items?page=1"
    ));
    assert!(transport.seen.borrow().is_empty(), "transport must not be called");
}

#[tokio::test]
async fn question_mark_without_query_is_fine() {
    let transport = MockTransport::new(200, "{}");
    let _: FetchResponse<serde_json::Value> =
        fetch_typed(&transport, "https://example.com/items?page=1", [])
            .await
            .unwrap();
    assert_eq!(transport.last().uri().to_string(), "https://example.com/items?page=1");
}

#[tokio::test]
async fn json_becomes_the_body() {
    let transport = MockTransport::new(201, r#"{"total":1}"#);
    let response: FetchResponse<Items> = fetch_typed(
        &transport,
        "https://example.com/items",
        [options(json!({ "method": "POST", "json": { "name": "Acme", "ids": [1, 2] } }))],
    )
    .await
    .unwrap();

    assert_eq!(response.status(), http::StatusCode::CREATED);
    let request = transport.last();
    assert_eq!(request.method(), http::Method::POST);
    assert_eq!(
        String::from_utf8(request.into_body()).unwrap(),
        r#"{"name":"Acme","ids":[1,2]}"#
    );
}

#[tokio::test]
async fn fragments_are_merged_earliest_first() {
    let transport = MockTransport::new(200, "{}");
    let config = Config::new().default_option("headers", json!({ "accept": "application/json" }));
    let _: FetchResponse<serde_json::Value> = config
        .fetch(
            &transport,
            "https://example.com/",
            [
                options(json!({ "headers": { "x-request-id": "abc" } })),
                options(json!({ "method": "PUT", "headers": { "x-request-id": "def", "x-n": 1 } })),
            ],
        )
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method(), http::Method::PUT);
    assert_eq!(request.headers()["x-request-id"], "abc");
    assert_eq!(request.headers()["x-n"], "1");
    assert_eq!(request.headers()["accept"], "application/json");
}

#[tokio::test]
async fn typed_error_payload() {
    let transport = MockTransport::new(404, r#"{"message":"not found"}"#);
    let response: FetchResponse<Items, ApiError> =
        fetch_typed(&transport, "https://example.com/items/9", [])
            .await
            .unwrap();

    assert!(!response.is_success());
    assert_eq!(
        response.into_result().unwrap(),
        Err(ApiError {
            message: "not found".to_owned()
        })
    );
}

#[tokio::test]
async fn transport_errors_are_not_wrapped() {
    let offline = |_: http::Request<Vec<u8>>| async {
        Err::<http::Response<Vec<u8>>, _>(TransportError::Offline)
    };
    let err = fetch_typed::<Items, ApiError, _, _>(&offline, "https://example.com/", [])
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Offline));
}

#[test]
fn invalid_option_shapes_are_reported() {
    let config = Config::new();

    let err = config
        .prepare("https://example.com/", [options(json!({ "method": 5 }))])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { key: "method", .. }));

    let err = config
        .prepare("https://example.com/", [options(json!({ "headers": "nope" }))])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { key: "headers", .. }));

    let err = config
        .prepare("https://example.com/", [options(json!({ "body": [1] }))])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { key: "body", .. }));

    let err = config
        .prepare("https://example.com/", [options(json!({ "method": "BAD METHOD" }))])
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn non_map_query_is_ignored() {
    let request = Config::new()
        .prepare("https://example.com/?a=1", [options(json!({ "query": "b=2" }))])
        .unwrap();
    assert_eq!(request.uri().to_string(), "https://example.com/?a=1");
}

#[test]
fn build_options_falls_back_to_config_defaults() {
    let config = Config::new();
    assert_eq!(config.build_options([]), options(json!({ "method": "GET" })));
    assert_eq!(
        config.build_options([options(json!({ "method": null, "cache": "no-store" }))]),
        options(json!({ "method": "GET", "cache": "no-store" }))
    );
}

#[test]
fn conflict_error_message() {
    let err = Config::new()
        .prepare("https://example.com/?a", [options(json!({ "query": {} }))])
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"cannot fetch with both query options and a url that contains a '?' (https://example.com/?a); use the query option alone"
    );
}

#[test]
fn with_defaults_replaces_the_method_default() {
    let config = Config::new().with_defaults(options(json!({ "method": "POST", "cache": "no-store" })));
    let keys: Vec<&str> = config.defaults().keys().map(String::as_str).collect();
    assert_eq!(keys, ["method", "cache"]);
    assert_eq!(config.defaults()["method"].as_str(), Some("POST"));

    let request = config.prepare("https://example.com/", []).unwrap();
    assert_eq!(request.method(), http::Method::POST);

    let bare = Config::new().with_defaults(Map::new());
    assert!(bare.defaults().is_empty());
    assert_eq!(bare.build_options([]), Map::new());
}

#[tokio::test]
async fn raw_response_accessors() {
    let transport = |_: http::Request<Vec<u8>>| async {
        Ok::<_, Error>(
            http::Response::builder()
                .status(200)
                .header("x-total", "2")
                .body(b"ok \xFF".to_vec())
                .expect("valid response"),
        )
    };
    let response: FetchResponse<serde_json::Value> =
        fetch_typed(&transport, "https://example.com/", []).await.unwrap();

    assert_eq!(response.headers()["x-total"], "2");
    assert_eq!(response.body(), b"ok \xFF");
    assert_eq!(response.text(), "ok \u{FFFD}");
    assert!(response.json().is_err());

    let inner = response.into_inner();
    assert_eq!(inner.status(), http::StatusCode::OK);
    assert_eq!(inner.into_body(), b"ok \xFF".to_vec());
}
