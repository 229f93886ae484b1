use crate::record::LogEntry;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;

/// A sink that simply drops all entries.
///
/// Useful when only the console echo is wanted, and for unit tests that
/// don't care about persistence.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn insert(&self, _entry: &LogEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
