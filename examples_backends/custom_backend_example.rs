use std::sync::Arc;

use async_trait::async_trait;
use easy_http_log::{
    client::LogClient,
    init::init_tracing,
    record::LogEntry,
    sink::LogSink,
};
use serde_json::json;

/// Example of plugging in a completely custom document store by
/// implementing the `LogSink` trait directly. Imagine this talks to some
/// proprietary DB for which this crate does not provide a built-in sink.
struct MyCustomDbSink;

#[async_trait]
impl LogSink for MyCustomDbSink {
    async fn insert(&self, entry: &LogEntry) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Here you would call your own client library for the target DB.
        // For the sake of example we just print the document.
        println!("[my-custom-db] {}", serde_json::to_string(entry)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let client = LogClient::with_sink(Arc::new(MyCustomDbSink), "orders");

    let mut metadata = serde_json::Map::new();
    metadata.insert("order_id".into(), json!(123));
    client.write_log("order accepted", Some(metadata)).await?;

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway timed out");
    client.write_error(&err, Some(json!({"order_id": 123, "attempt": 1}))).await?;

    client.close().await?;
    Ok(())
}
