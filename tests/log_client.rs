use std::sync::Arc;

use easy_http_log::call_site;
use easy_http_log::client::{LogClient, LogClientConfig};
use easy_http_log::memory_sink::MemorySink;
use easy_http_log::metadata::make_metadata;
use easy_http_log::record::LogEntry;
use serde_json::json;

fn client(sink: &MemorySink) -> LogClient {
    let config = LogClientConfig {
        echo_stdout: false,
        ..LogClientConfig::default()
    };
    LogClient::with_sink_and_config(Arc::new(sink.clone()), "inventory", config)
}

#[tokio::test]
async fn location_points_at_the_calling_line() {
    let sink = MemorySink::new();
    let client = client(&sink);

    let expected_line = line!() + 1;
    client.write_log("restocked", None).await.unwrap();

    let entries = sink.entries().await;
    assert_eq!(
        entries[0].location(),
        format!("tests/log_client.rs line {}", expected_line)
    );
}

#[tokio::test]
async fn request_metadata_is_stored_with_error() {
    let sink = MemorySink::new();
    let client = client(&sink);
    let request = http::Request::builder()
        .method("DELETE")
        .uri("/items/9")
        .header("host", "inventory.local")
        .body(())
        .unwrap();
    let metadata = make_metadata(&request, Some("127.0.0.1:4000".parse().unwrap()));

    client
        .write_error(&"item is reserved", Some(metadata.clone().into()))
        .await
        .unwrap();

    let entries = sink.entries().await;
    assert_eq!(entries.len(), 1);
    let document = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(document["error"], "item is reserved");
    assert_eq!(document["metaData"]["request"]["requestMethod"], "DELETE");
    assert_eq!(document["metaData"]["request"]["requestHost"], "inventory.local");
    assert_eq!(document["metaData"], json!(metadata));
}

#[tokio::test]
async fn entries_keep_call_order() {
    let sink = MemorySink::new();
    let client = client(&sink);

    client.write_log_at(call_site!(), "first", None).await.unwrap();
    client.write_error_at(call_site!(), "second", None).await.unwrap();

    let entries = sink.entries().await;
    assert!(matches!(entries[0], LogEntry::Log(_)));
    assert!(matches!(entries[1], LogEntry::Error(_)));
    assert_eq!(entries[1].text(), "second");
    assert!(entries[0].location().starts_with("log_client line "));
}
