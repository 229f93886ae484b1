use crate::record::LogEntry;
use async_trait::async_trait;
use std::error::Error;

/// Document store that [`LogClient`](crate::client::LogClient) writes into.
///
/// Every call to `insert` stores exactly one document. Implementations do
/// not batch, buffer or retry; a failed insert is reported straight back to
/// the caller of `write_log` / `write_error`.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Insert a single entry.
    ///
    /// **Returns**
    /// - `Ok(())` once the backend acknowledged the document.
    /// - `Err(..)` if the backend failed (network error, encoding error,
    ///   write rejected, etc.).
    async fn insert(&self, entry: &LogEntry) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Release resources owned by the sink.
    ///
    /// Default implementation is a no-op.
    async fn close(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
