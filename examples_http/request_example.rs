use easy_http_log::request::{send_request, NO_BODY};
use easy_http_log::init::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let response = send_request(
        "https://httpbin.org",
        "",
        "GET",
        "get",
        &[("accept", "application/json")],
        &[("page", "1"), ("page", "2")],
        NO_BODY,
    )
    .await?;

    println!("{}", response.status_text);
    println!("{}", String::from_utf8_lossy(&response.body));
    Ok(())
}
