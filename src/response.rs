use chrono::{DateTime, Utc};
use http::header::{HeaderName, HeaderValue};
use http::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A neat little envelope for simple responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub error: bool,
    pub message: String,
    pub function: String,
}

/// Destination a handler writes its response into.
pub trait ResponseSink {
    /// Set a header, replacing any existing value with the same name.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);
    fn write_status(&mut self, status: StatusCode);
    fn write_body(&mut self, body: &[u8]);
}

impl ResponseSink for Response<Vec<u8>> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, body: &[u8]) {
        self.body_mut().extend_from_slice(body);
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ResponseError {
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid response header: {0}")]
    InvalidHeader(String),
}

/// Write `status`, `headers` and `body` encoded as JSON.
///
/// Nothing reaches the sink unless the body serializes and every header is
/// valid, so a failed call leaves the sink as it was.
pub fn respond<S, T>(
    sink: &mut S,
    status: StatusCode,
    body: Option<&T>,
    headers: &[(&str, &str)],
) -> Result<(), ResponseError>
where
    S: ResponseSink + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = body.map(serde_json::to_vec).transpose()?;

    let mut parsed = Vec::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ResponseError::InvalidHeader(format!("{}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ResponseError::InvalidHeader(format!("{}: {}", name, e)))?;
        parsed.push((header_name, header_value));
    }

    for (name, value) in parsed {
        sink.set_header(name, value);
    }
    sink.write_status(status);
    if let Some(bytes) = encoded {
        sink.write_body(&bytes);
    }
    Ok(())
}

/// Canned message for the status codes [`respond_basic`] knows about.
pub fn canned_message(status: StatusCode) -> Option<&'static str> {
    match status.as_u16() {
        200 => Some("ok"),
        201 => Some("created"),
        400 => Some("bad request"),
        401 => Some("unauthorized"),
        403 => Some("forbidden"),
        404 => Some("resource missing"),
        405 => Some("method not allowed"),
        500 => Some("internal server error"),
        _ => None,
    }
}

#[derive(Serialize)]
struct BasicBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    timestamp: DateTime<Utc>,
}

/// Write `status` with `{"message": <canned>, "timestamp": <now>}`.
///
/// Codes without a canned message get only the timestamp. An encoding
/// failure is logged and the status is written with an empty body.
pub fn respond_basic<S: ResponseSink + ?Sized>(sink: &mut S, status: StatusCode) {
    let body = BasicBody {
        message: canned_message(status),
        timestamp: Utc::now(),
    };

    let encoded = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, status = status.as_u16(), "failed to encode basic response");
            Vec::new()
        }
    };

    sink.write_status(status);
    sink.write_body(&encoded);
}
