use bson::Document;
use mongodb::{Client, Collection, Database};

use crate::error::AppError;
use crate::schema::catalog::ResourceDescriptor;

/// The single process-wide handle to the document store.
///
/// Opened once at startup and shared through `AppState`; the driver
/// pools connections internally, so handles resolved from it are cheap.
#[derive(Clone)]
pub struct DocumentStore {
    client: Client,
}

impl DocumentStore {
    /// Connect and fail fast if the deployment is unreachable.
    ///
    /// The driver connects lazily, so without the ping a bad URI would
    /// only surface on the first request.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        use mongodb::bson::doc;

        let client = Client::with_uri_str(uri).await?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        Ok(Self { client })
    }

    /// Wrap an already-connected client (used by the test suites).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// The collection a resource kind is stored in.
    pub fn collection(&self, desc: &ResourceDescriptor) -> Collection<Document> {
        self.database(desc.database).collection(desc.collection)
    }

    /// The per-database counters collection backing serial allocation.
    pub fn counters(&self, desc: &ResourceDescriptor) -> Collection<Document> {
        self.database(desc.database).collection("counters")
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
