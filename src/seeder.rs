use serde_json::{json, Value};

use crate::api::resources::create_resource;
use crate::db::repository::ResourceStore;
use crate::schema::catalog::ResourceKind;

fn demo_records() -> Vec<(ResourceKind, Vec<Value>)> {
    vec![
        (
            ResourceKind::Journal,
            vec![
                json!({
                    "title": "Adaptive Beamforming for Indoor Positioning",
                    "authors": ["S. Rahman", "T. Costa"],
                    "journal": "IEEE Transactions on Signal Processing",
                    "publishedOn": "2024-02-15",
                    "volume": 72,
                    "pages": "1101-1114",
                    "DOI": "10.1109/TSP.2024.001101"
                }),
                json!({
                    "title": "Low-Power Wearable Sensing Fabrics",
                    "authors": ["M. Oduya", "S. Rahman"],
                    "journal": "Nature Communications",
                    "publishedOn": "2023-11-02"
                }),
            ],
        ),
        (
            ResourceKind::Student,
            vec![
                json!({
                    "name": "Priya Nair",
                    "course": "PhD",
                    "enrolledOn": "2022-09-01",
                    "email": "priya@lab.example.edu"
                }),
                json!({
                    "name": "Jonas Weber",
                    "course": "MSc",
                    "enrolledOn": "2024-02-01"
                }),
            ],
        ),
        (
            ResourceKind::Patent,
            vec![
                json!({
                    "title": "Textile-Integrated Antenna Array",
                    "inventors": ["S. Rahman"],
                    "status": "Granted",
                    "filedOn": "2021-06-10",
                    "grantedOn": "2023-08-21"
                }),
                json!({
                    "title": "Self-Calibrating Gait Sensor",
                    "inventors": ["M. Oduya", "P. Nair"],
                    "status": "Filed",
                    "filedOn": "2024-01-30"
                }),
            ],
        ),
        (
            ResourceKind::Project,
            vec![json!({
                "title": "Ambient Sensing for Assisted Living",
                "investigators": ["S. Rahman"],
                "role": "PI",
                "category": "Funded",
                "sponsor": "National Science Agency",
                "startDate": "2023-04-01",
                "amount": 420000
            })],
        ),
        (
            ResourceKind::Announcement,
            vec![json!({
                "title": "Lab seminar series resumes",
                "date": "2024-03-04",
                "content": "Weekly seminars restart on Monday, room B-214."
            })],
        ),
    ]
}

/// Seed demo content for local development.
///
/// Kinds that already hold documents are left untouched; individual
/// failures are logged and skipped, never fatal.
pub async fn seed_demo_data(store: &dyn ResourceStore) {
    tracing::info!("Starting demo data seeding...");

    for (kind, records) in demo_records() {
        match store.count(kind).await {
            Ok(0) => {}
            Ok(n) => {
                tracing::info!("{} already holds {} documents, skipping.", kind, n);
                continue;
            }
            Err(e) => {
                tracing::error!("Failed to check existing {} documents: {}", kind, e);
                continue;
            }
        }

        for record in records {
            match create_resource(store, kind, &record).await {
                Ok(doc) => tracing::info!("Seeded {} {}", kind, doc["_id"]),
                Err(e) => tracing::error!("Failed to seed a {} record: {}", kind, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::MemoryStore;

    #[tokio::test]
    async fn seeding_is_idempotent_per_kind() {
        let store = MemoryStore::new();

        seed_demo_data(&store).await;
        let journals = store.count(ResourceKind::Journal).await.unwrap();
        assert!(journals > 0);

        seed_demo_data(&store).await;
        assert_eq!(store.count(ResourceKind::Journal).await.unwrap(), journals);
    }

    #[tokio::test]
    async fn demo_records_pass_their_schemas() {
        use crate::schema::fields::validate;

        for (kind, records) in demo_records() {
            for record in records {
                let raw = record.as_object().unwrap();
                validate(kind.descriptor().fields, raw)
                    .unwrap_or_else(|e| panic!("seed record for {} invalid: {}", kind, e));
            }
        }
    }
}
