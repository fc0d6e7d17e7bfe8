use crate::db::store::DocumentStore;
use crate::error::AppError;
use crate::schema::catalog::ResourceDescriptor;

/// Allocate the next serial number for a collection.
///
/// Serials are backed by one counter document per collection in the
/// database's `counters` collection. The `$inc` upsert reads and
/// increments in a single store-side operation, so two concurrent
/// creates can never observe the same value. The first allocation for
/// an empty collection yields 1.
pub async fn next_serial(
    store: &DocumentStore,
    desc: &ResourceDescriptor,
) -> Result<i64, AppError> {
    use mongodb::bson::doc;
    use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

    let options = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let counter = store
        .counters(desc)
        .find_one_and_update(
            doc! { "_id": desc.collection },
            doc! { "$inc": { "seq": 1_i64 } },
        )
        .with_options(options)
        .await?
        .ok_or_else(|| {
            AppError::Store(format!(
                "counter upsert for '{}' returned no document",
                desc.collection
            ))
        })?;

    counter
        .get_i64("seq")
        .map_err(|e| AppError::Store(format!("malformed counter document: {}", e)))
}
