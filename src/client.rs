use crate::record::{CallSite, ErrorLogRecord, LogEntry, LogRecord};
use crate::sink::LogSink;
use chrono::Utc;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "mongodb")]
use crate::mongo::MongoSink;

/// Database every service writes its log collection into.
pub const LOG_DATABASE: &str = "Logs";

/// Settings shared by every [`LogClient`] constructor.
///
/// **Fields**
/// - `database`: database holding the per-service collections. Only used by
///   the MongoDB constructors.
/// - `echo_stdout`: if `true`, each successfully stored entry is mirrored to
///   stdout as `<date> | <kind> | <location> | <text> | <metadata>`.
#[derive(Clone, Debug)]
pub struct LogClientConfig {
    pub database: String,
    pub echo_stdout: bool,
}

impl Default for LogClientConfig {
    fn default() -> Self {
        Self {
            database: LOG_DATABASE.to_string(),
            echo_stdout: true,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LogClientError {
    #[cfg(feature = "mongodb")]
    #[error("failed to connect to log store: {0}")]
    Connect(#[from] mongodb::error::Error),

    #[error("failed to insert log entry: {0}")]
    Insert(Box<dyn Error + Send + Sync>),

    #[error("failed to close log store: {0}")]
    Close(Box<dyn Error + Send + Sync>),
}

/// Writes logs and errors for one service, one document per call.
///
/// The client holds its sink for as long as it lives; call
/// [`LogClient::close`] to release it explicitly.
pub struct LogClient {
    sink: Arc<dyn LogSink>,
    service_name: String,
    config: LogClientConfig,
}

impl LogClient {
    pub fn with_sink(sink: Arc<dyn LogSink>, service_name: impl Into<String>) -> Self {
        Self::with_sink_and_config(sink, service_name, LogClientConfig::default())
    }

    pub fn with_sink_and_config(
        sink: Arc<dyn LogSink>,
        service_name: impl Into<String>,
        config: LogClientConfig,
    ) -> Self {
        LogClient {
            sink,
            service_name: service_name.into(),
            config,
        }
    }

    /// Open a new MongoDB connection at `mongo_url` and write into
    /// collection `service_name` of database [`LOG_DATABASE`].
    ///
    /// The client owns that connection; [`LogClient::close`] shuts it down.
    #[cfg(feature = "mongodb")]
    pub async fn connect(mongo_url: &str, service_name: &str) -> Result<Self, LogClientError> {
        Self::connect_with_config(mongo_url, service_name, LogClientConfig::default()).await
    }

    #[cfg(feature = "mongodb")]
    pub async fn connect_with_config(
        mongo_url: &str,
        service_name: &str,
        config: LogClientConfig,
    ) -> Result<Self, LogClientError> {
        let sink = MongoSink::connect(mongo_url, &config.database, service_name).await?;
        Ok(Self::with_sink_and_config(Arc::new(sink), service_name, config))
    }

    /// Write through an already-open MongoDB client without opening a new
    /// connection. Closing this `LogClient` leaves `client` running.
    #[cfg(feature = "mongodb")]
    pub fn with_mongo_client(client: mongodb::Client, service_name: &str) -> Self {
        Self::with_mongo_client_and_config(client, service_name, LogClientConfig::default())
    }

    #[cfg(feature = "mongodb")]
    pub fn with_mongo_client_and_config(
        client: mongodb::Client,
        service_name: &str,
        config: LogClientConfig,
    ) -> Self {
        let sink = MongoSink::with_client(client, &config.database, service_name);
        Self::with_sink_and_config(Arc::new(sink), service_name, config)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn database(&self) -> &str {
        &self.config.database
    }

    /// Store `message` with `metadata` (empty when `None`), located at the
    /// caller of this method.
    #[track_caller]
    pub fn write_log(
        &self,
        message: &str,
        metadata: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> impl Future<Output = Result<(), LogClientError>> + Send + '_ {
        let site = CallSite::caller();
        let message = message.to_owned();
        async move { self.write_log_at(site, message, metadata).await }
    }

    /// Same as [`LogClient::write_log`] with an explicit call site.
    pub async fn write_log_at(
        &self,
        site: CallSite,
        message: impl Into<String>,
        metadata: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<(), LogClientError> {
        let record = LogRecord {
            message: message.into(),
            location: site.to_string(),
            date: Utc::now(),
            metadata: metadata.unwrap_or_default(),
        };
        self.store(LogEntry::Log(record)).await
    }

    /// Store the `Display` text of `error`, located at the caller of this
    /// method. `metadata` may be any JSON value and defaults to `{}`.
    #[track_caller]
    pub fn write_error(
        &self,
        error: &dyn fmt::Display,
        metadata: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<(), LogClientError>> + Send + '_ {
        let site = CallSite::caller();
        let error = error.to_string();
        async move { self.write_error_at(site, error, metadata).await }
    }

    /// Same as [`LogClient::write_error`] with an explicit call site and
    /// already-rendered error text.
    pub async fn write_error_at(
        &self,
        site: CallSite,
        error: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), LogClientError> {
        let record = ErrorLogRecord {
            error: error.into(),
            location: site.to_string(),
            date: Utc::now(),
            metadata: metadata
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
        };
        self.store(LogEntry::Error(record)).await
    }

    async fn store(&self, entry: LogEntry) -> Result<(), LogClientError> {
        debug!(
            service = %self.service_name,
            kind = entry.kind(),
            location = entry.location(),
            "inserting log entry"
        );
        self.sink.insert(&entry).await.map_err(LogClientError::Insert)?;

        if self.config.echo_stdout {
            println!("{}", entry.console_line());
        }
        Ok(())
    }

    /// Release the underlying sink.
    pub async fn close(self) -> Result<(), LogClientError> {
        self.sink.close().await.map_err(LogClientError::Close)
    }
}
