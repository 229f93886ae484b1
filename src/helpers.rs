use chrono::Datelike;
use serde::de::DeserializeOwned;
use std::io::Read;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Push `value` onto `values` unless an equal string is already there.
pub fn append_string_no_duplicates(mut values: Vec<String>, value: &str) -> Vec<String> {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
    values
}

/// Append to `target` every element of `source` it does not contain yet,
/// then return `target`.
///
/// Each element is checked against `target` as it grows, so repeats inside
/// `source` are added once. Duplicates already inside `target` are kept.
pub fn append_string_slice_no_duplicates(source: &[String], mut target: Vec<String>) -> Vec<String> {
    for value in source {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
    target
}

/// Format a date as `YYYY-MM-DD`, zero-padding month and day.
pub fn date_string<D: Datelike>(date: &D) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// A decoded body together with the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub raw: Vec<u8>,
    pub value: T,
}

/// Failure from [`decode_body`]; the bytes read so far are always kept.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("failed to read body: {source}")]
    Read { raw: Vec<u8>, source: std::io::Error },

    #[error("failed to decode body as JSON: {source}")]
    Json { raw: Vec<u8>, source: serde_json::Error },
}

impl DecodeError {
    pub fn raw(&self) -> &[u8] {
        match self {
            DecodeError::Read { raw, .. } | DecodeError::Json { raw, .. } => raw,
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        match self {
            DecodeError::Read { raw, .. } | DecodeError::Json { raw, .. } => raw,
        }
    }
}

fn decode_raw<T: DeserializeOwned>(raw: Vec<u8>) -> Result<Decoded<T>, DecodeError> {
    match serde_json::from_slice(&raw) {
        Ok(value) => Ok(Decoded { raw, value }),
        Err(source) => Err(DecodeError::Json { raw, source }),
    }
}

/// Read `reader` to the end and decode it as JSON.
pub fn decode_body<R: Read, T: DeserializeOwned>(mut reader: R) -> Result<Decoded<T>, DecodeError> {
    let mut raw = Vec::new();
    if let Err(source) = reader.read_to_end(&mut raw) {
        return Err(DecodeError::Read { raw, source });
    }
    decode_raw(raw)
}

/// Async counterpart of [`decode_body`].
pub async fn decode_body_async<R, T>(mut reader: R) -> Result<Decoded<T>, DecodeError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut raw = Vec::new();
    if let Err(source) = reader.read_to_end(&mut raw).await {
        return Err(DecodeError::Read { raw, source });
    }
    decode_raw(raw)
}
