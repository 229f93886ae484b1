use crate::{record::LogEntry, sink::LogSink};
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sink keeping every inserted entry in memory, in insertion order.
///
/// Clones share the same storage, so a test can hand one clone to a
/// [`LogClient`](crate::client::LogClient) and inspect the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn insert(&self, entry: &LogEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}
