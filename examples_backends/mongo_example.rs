use easy_http_log::client::LogClient;
use easy_http_log::init::init_tracing;
use easy_http_log::metadata::make_metadata;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1) Point this URL to your MongoDB instance.
    //    You can also pass it via the `MONGO_URL` env var.
    let mongo_url = std::env::var("MONGO_URL")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    // 2) Documents land in database `Logs`, collection `auth`.
    let client = LogClient::connect(&mongo_url, "auth").await?;

    client.write_log("service started", None).await?;

    let request = http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("host", "auth.internal")
        .body(())?;
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "invalid password");
    client
        .write_error(&err, Some(make_metadata(&request, None).into()))
        .await?;

    // 3) The client owns the connection it opened.
    client.close().await?;
    Ok(())
}
