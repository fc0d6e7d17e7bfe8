use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;

use crate::db::serial::next_serial;
use crate::db::store::DocumentStore;
use crate::error::AppError;
use crate::schema::catalog::ResourceKind;

/// Store operations shared by every resource kind.
///
/// One generic store replaces a per-kind handler copy; the kind's
/// descriptor supplies the collection, ordering, search field, serial
/// and timestamp behavior. The trait allows mocking the database layer
/// in tests.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Insert validated fields as a new document; assigns the
    /// identifier, serial number and timestamps where applicable, and
    /// returns the document as stored.
    async fn insert(&self, kind: ResourceKind, fields: Document) -> Result<Document, AppError>;

    /// Find one document by its identifier.
    async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Document, AppError>;

    /// Find the first document whose search field contains `term`,
    /// case-insensitively.
    async fn find_by_search(&self, kind: ResourceKind, term: &str) -> Result<Document, AppError>;

    /// Every document of the kind in its default descending order.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Document>, AppError>;

    /// Like `list`, restricted by an exact-match filter.
    async fn list_filtered(
        &self,
        kind: ResourceKind,
        filter: Document,
    ) -> Result<Vec<Document>, AppError>;

    /// Field-level merge; unnamed fields keep their prior values.
    /// Returns the post-update document.
    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        changes: Document,
    ) -> Result<Document, AppError>;

    /// Remove permanently, returning the document as it was.
    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<Document, AppError>;

    /// Number of stored documents of the kind.
    async fn count(&self, kind: ResourceKind) -> Result<u64, AppError>;

    /// Round-trip to the underlying store.
    async fn ping(&self) -> Result<(), AppError>;
}

fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::malformed("id", "a 24-character hex object id"))
}

/// Escape regex metacharacters so a search term is matched literally.
fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// MongoDB implementation of the ResourceStore.
pub struct MongoResourceStore {
    store: DocumentStore,
}

impl MongoResourceStore {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ResourceStore for MongoResourceStore {
    async fn insert(&self, kind: ResourceKind, fields: Document) -> Result<Document, AppError> {
        let desc = kind.descriptor();

        let mut doc = fields;
        doc.insert("_id", ObjectId::new());
        if desc.serial {
            doc.insert("serialno", next_serial(&self.store, desc).await?);
        }
        if desc.timestamps {
            let now = bson::DateTime::now();
            doc.insert("createdAt", now);
            doc.insert("updatedAt", now);
        }

        self.store.collection(desc).insert_one(&doc).await?;
        Ok(doc)
    }

    async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Document, AppError> {
        use mongodb::bson::doc;

        let oid = parse_object_id(id)?;
        self.store
            .collection(kind.descriptor())
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind, id)))
    }

    async fn find_by_search(&self, kind: ResourceKind, term: &str) -> Result<Document, AppError> {
        use mongodb::bson::doc;

        let desc = kind.descriptor();
        let filter = doc! {
            desc.search_field: { "$regex": escape_regex(term), "$options": "i" }
        };

        self.store
            .collection(desc)
            .find_one(filter)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no {} matching '{}'", kind, term))
            })
    }

    async fn list(&self, kind: ResourceKind) -> Result<Vec<Document>, AppError> {
        use mongodb::bson::doc;

        self.list_filtered(kind, doc! {}).await
    }

    async fn list_filtered(
        &self,
        kind: ResourceKind,
        filter: Document,
    ) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let desc = kind.descriptor();
        let options = FindOptions::builder()
            .sort(doc! { desc.order_by: -1 })
            .build();

        let mut cursor = self
            .store
            .collection(desc)
            .find(filter)
            .with_options(options)
            .await?;

        let mut documents = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            documents.push(doc);
        }

        Ok(documents)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        changes: Document,
    ) -> Result<Document, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

        let desc = kind.descriptor();
        let oid = parse_object_id(id)?;

        let mut changes = changes;
        if desc.timestamps {
            changes.insert("updatedAt", bson::DateTime::now());
        }
        if changes.is_empty() {
            // Nothing to set; $set with an empty document is rejected.
            return self.find_by_id(kind, id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.store
            .collection(desc)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": changes })
            .with_options(options)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind, id)))
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<Document, AppError> {
        use mongodb::bson::doc;

        let oid = parse_object_id(id)?;
        self.store
            .collection(kind.descriptor())
            .find_one_and_delete(doc! { "_id": oid })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind, id)))
    }

    async fn count(&self, kind: ResourceKind) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        Ok(self
            .store
            .collection(kind.descriptor())
            .count_documents(doc! {})
            .await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
