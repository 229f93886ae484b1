//! Outbound requests and response writers exercised over real HTTP.
//!
//! Starts an axum server on a random port whose handlers are written with
//! this crate's response helpers, then calls it with `send_request`.

use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, Response, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use easy_http_log::helpers::{decode_body, Decoded};
use easy_http_log::request::{send_request, RequestError, NO_BODY};
use easy_http_log::response::{respond, respond_basic, ResponseObject};
use serde_json::{json, Value};

async fn echo(headers: HeaderMap, RawQuery(query): RawQuery, body: Bytes) -> Response<Body> {
    let token = headers
        .get("x-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let echoed = json!({
        "query": query,
        "token": token,
        "body": String::from_utf8_lossy(&body),
    });

    let mut response = Response::new(Vec::new());
    respond(&mut response, StatusCode::OK, Some(&echoed), &[("content-type", "application/json")])
        .unwrap();
    response.map(Body::from)
}

async fn basic(Path(code): Path<u16>) -> Response<Body> {
    let mut response = Response::new(Vec::new());
    respond_basic(&mut response, StatusCode::from_u16(code).unwrap());
    response.map(Body::from)
}

async fn object() -> Response<Body> {
    let mut response = Response::new(Vec::new());
    let body = ResponseObject {
        error: true,
        message: "quota exceeded".into(),
        function: "object".into(),
    };
    respond(&mut response, StatusCode::TOO_MANY_REQUESTS, Some(&body), &[]).unwrap();
    response.map(Body::from)
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/echo", post(echo))
        .route("/basic/{code}", get(basic))
        .route("/object", get(object));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn post_sends_payload_headers_and_params() {
    let addr = spawn_server().await;
    let payload = json!({"name": "widget", "qty": 3});

    let response = send_request(
        "http://127.0.0.1/",
        &addr.port().to_string(),
        "POST",
        "echo",
        &[("x-token", "secret")],
        &[("tag", "a"), ("tag", "b")],
        Some(&payload),
    )
    .await
    .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_text, "200 OK");

    let echoed: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(echoed["token"], "secret");
    assert_eq!(echoed["query"], "tag=a&tag=b");
    assert_eq!(echoed["body"], serde_json::to_string(&payload).unwrap());
}

#[tokio::test]
async fn request_without_payload_sends_empty_body() {
    let addr = spawn_server().await;

    let response = send_request(
        "http://127.0.0.1",
        &addr.port().to_string(),
        "POST",
        "/echo",
        &[],
        &[],
        NO_BODY,
    )
    .await
    .unwrap();

    let echoed: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(echoed["body"], "");
    assert_eq!(echoed["query"], Value::Null);
}

#[tokio::test]
async fn basic_responses_carry_canned_message() {
    let addr = spawn_server().await;
    let port = addr.port().to_string();

    let response = send_request("http://127.0.0.1", &port, "GET", "basic/404", &[], &[], NO_BODY)
        .await
        .unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "404 Not Found");

    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["message"], "resource missing");
    assert!(body["timestamp"].is_string());

    let response = send_request("http://127.0.0.1", &port, "GET", "basic/418", &[], &[], NO_BODY)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn response_object_round_trips_through_decode_body() {
    let addr = spawn_server().await;

    let response = send_request(
        "http://127.0.0.1",
        &addr.port().to_string(),
        "GET",
        "object",
        &[],
        &[],
        NO_BODY,
    )
    .await
    .unwrap();
    assert_eq!(response.status, 429);

    let decoded: Decoded<ResponseObject> = decode_body(response.body.as_slice()).unwrap();
    assert!(decoded.value.error);
    assert_eq!(decoded.value.message, "quota exceeded");
    assert_eq!(decoded.raw, response.body);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    drop(listener);

    let err = send_request("http://127.0.0.1", &port, "GET", "nothing", &[], &[], NO_BODY)
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));
}
