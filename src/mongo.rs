use crate::{record::LogEntry, sink::LogSink};
use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::error::Error;

/// MongoDB sink inserting one document per log entry.
///
/// Documents live in collection `<service>` of the configured database.
/// Dates are stored as native BSON datetimes, metadata as an embedded
/// document (or any BSON value for error entries).
#[derive(Clone)]
pub struct MongoSink {
    client: Client,
    collection: Collection<Document>,
    /// Whether `close` shuts the client down. False for borrowed clients.
    owns_client: bool,
}

impl MongoSink {
    /// Open a new client from a connection string and select the
    /// collection. The sink owns the client and shuts it down on `close`.
    pub async fn connect(
        url: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, mongodb::error::Error> {
        let options = ClientOptions::parse(url).await?;
        let client = Client::with_options(options)?;
        let collection = client.database(database).collection::<Document>(collection);

        Ok(MongoSink {
            client,
            collection,
            owns_client: true,
        })
    }

    /// Reuse an already-open client. Its lifecycle stays with the caller.
    pub fn with_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        MongoSink {
            client,
            collection,
            owns_client: false,
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    pub fn database_name(&self) -> String {
        self.collection.namespace().db
    }
}

/// Map an entry onto the stored document shape.
fn to_document(entry: &LogEntry) -> Result<Document, bson::ser::Error> {
    let (text_key, metadata) = match entry {
        LogEntry::Log(r) => ("message", bson::to_bson(&r.metadata)?),
        LogEntry::Error(r) => ("error", bson::to_bson(&r.metadata)?),
    };

    let mut document = Document::new();
    document.insert(text_key, entry.text());
    document.insert("location", entry.location());
    document.insert(
        "date",
        Bson::DateTime(bson::DateTime::from_millis(entry.date().timestamp_millis())),
    );
    document.insert("metaData", metadata);
    Ok(document)
}

#[async_trait]
impl LogSink for MongoSink {
    async fn insert(&self, entry: &LogEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        let document = to_document(entry)?;
        self.collection.insert_one(document, None).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.owns_client {
            self.client.clone().shutdown().await;
        }
        Ok(())
    }
}
