use http::header::HOST;
use http::Request;
use serde_json::{Map, Value};
use std::net::SocketAddr;

/// Describe an inbound request as log metadata.
///
/// Returns `{"request": {...}}` holding the method, headers (name to list of
/// values), full URL, request URI, remote address and host. `remote_addr` is
/// taken as an argument because `http::Request` does not carry the peer
/// address; pass `None` when it is unknown.
pub fn make_metadata<B>(request: &Request<B>, remote_addr: Option<SocketAddr>) -> Map<String, Value> {
    let mut headers = Map::new();
    for name in request.headers().keys() {
        let values = request
            .headers()
            .get_all(name)
            .iter()
            .map(|v| Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        headers.insert(name.as_str().to_string(), Value::Array(values));
    }

    let uri = request.uri();
    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let request_uri = uri
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| "/".to_string());

    let mut fields = Map::new();
    fields.insert("requestMethod".into(), Value::from(request.method().as_str()));
    fields.insert("requestHeader".into(), Value::Object(headers));
    fields.insert("requestURL".into(), Value::from(uri.to_string()));
    fields.insert("requestURI".into(), Value::from(request_uri));
    fields.insert(
        "requestRemoteAddr".into(),
        Value::from(remote_addr.map(|a| a.to_string()).unwrap_or_default()),
    );
    fields.insert("requestHost".into(), Value::from(host));

    let mut metadata = Map::new();
    metadata.insert("request".into(), Value::Object(fields));
    metadata
}
