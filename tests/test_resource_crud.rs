mod common;

use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server.get("/api/health").await;
    assert_eq!(response.json::<serde_json::Value>()["status"], json!("ok"));
}

#[tokio::test]
async fn journal_create_applies_serial_and_defaults() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let doc = env
        .create(
            &server,
            "journal",
            json!({
                "title": "X",
                "authors": ["A"],
                "journal": "J",
                "publishedOn": "2024-01-01"
            }),
        )
        .await;

    assert_eq!(doc["serialno"], json!(1));
    assert_eq!(doc["volume"], serde_json::Value::Null);
    assert_eq!(doc["pages"], json!(""));
    assert_eq!(doc["DOI"], json!(""));

    // Round trip through ReadOne
    let id = doc["_id"].as_str().unwrap();
    let fetched = server
        .get(&format!("/api/resources/journal/{}", id))
        .await
        .json::<serde_json::Value>();
    assert_eq!(fetched["data"], doc);
}

#[tokio::test]
async fn sequential_creates_yield_serials_in_creation_order() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    for expected in 1..=3 {
        let doc = env
            .create(
                &server,
                "conference",
                json!({
                    "title": format!("Paper {expected}"),
                    "authors": ["A"],
                    "conference": "C",
                    "publishedOn": "2024-01-01"
                }),
            )
            .await;
        assert_eq!(doc["serialno"], json!(expected));
    }

    // Default listing is serial descending
    let listed = server
        .get("/api/resources/conference")
        .await
        .json::<serde_json::Value>();
    let serials: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["serialno"].as_i64().unwrap())
        .collect();
    assert_eq!(serials, vec![3, 2, 1]);
}

#[tokio::test]
async fn search_matches_case_insensitive_substring() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.create(
        &server,
        "journal",
        json!({
            "title": "Nature Communications",
            "authors": ["A"],
            "journal": "Nature",
            "publishedOn": "2024-01-01"
        }),
    )
    .await;

    let found = server
        .get("/api/resources/journal/search/nature")
        .await
        .json::<serde_json::Value>();
    assert_eq!(found["data"]["title"], json!("Nature Communications"));

    let missing = env
        .server_permissive()
        .get("/api/resources/journal/search/robotics")
        .await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn update_merges_fields_and_bumps_updated_at() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let doc = env
        .create(
            &server,
            "announcement",
            json!({
                "title": "Seminar",
                "date": "2024-05-01",
                "content": "Room 101"
            }),
        )
        .await;
    let id = doc["_id"].as_str().unwrap();
    let before =
        chrono::DateTime::parse_from_rfc3339(doc["updatedAt"].as_str().unwrap()).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let updated = server
        .put(&format!("/api/resources/announcement/{}", id))
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "content": "Room 202" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(updated["data"]["content"], json!("Room 202"));
    assert_eq!(updated["data"]["title"], json!("Seminar"));
    assert_eq!(updated["data"]["date"], json!("2024-05-01"));

    let after =
        chrono::DateTime::parse_from_rfc3339(updated["data"]["updatedAt"].as_str().unwrap())
            .unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn update_never_reassigns_serial_numbers() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let doc = env
        .create(
            &server,
            "journal",
            json!({
                "title": "X",
                "authors": ["A"],
                "journal": "J",
                "publishedOn": "2024-01-01"
            }),
        )
        .await;
    let id = doc["_id"].as_str().unwrap();

    let updated = server
        .put(&format!("/api/resources/journal/{}", id))
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "serialno": 99, "title": "Y" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(updated["data"]["serialno"], json!(1));
    assert_eq!(updated["data"]["title"], json!("Y"));
}

#[tokio::test]
async fn delete_returns_document_and_read_becomes_404() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let doc = env
        .create(
            &server,
            "event",
            json!({ "title": "Open day", "date": "2024-06-10" }),
        )
        .await;
    let id = doc["_id"].as_str().unwrap();

    let deleted = server
        .delete(&format!("/api/resources/event/{}", id))
        .authorization_bearer(common::ADMIN_TOKEN)
        .await
        .json::<serde_json::Value>();
    assert_eq!(deleted["data"]["title"], json!("Open day"));

    let gone = env
        .server_permissive()
        .get(&format!("/api/resources/event/{}", id))
        .await;
    assert_eq!(gone.status_code(), 404);
}

#[tokio::test]
async fn listing_an_empty_collection_returns_empty_array() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let listed = server
        .get("/api/resources/gallery-item")
        .await
        .json::<serde_json::Value>();
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn missing_required_field_is_a_400_with_details() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/resources/journal")
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "authors": ["A"], "journal": "J", "publishedOn": "2024-01-01" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["field"], json!("title"));
    assert_eq!(body["reason"], json!("required"));
}

#[tokio::test]
async fn enum_violation_is_a_400_listing_allowed_values() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/resources/patent")
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({
            "title": "T",
            "inventors": ["I"],
            "status": "Pending",
            "filedOn": "2024-01-01"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["field"], json!("status"));
    assert_eq!(body["reason"], json!("not_in_enum"));
    assert_eq!(body["allowed"], json!(["Granted", "Filed"]));
}

#[tokio::test]
async fn unknown_kind_and_malformed_id_are_rejected() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/resources/blog-post").await;
    assert_eq!(response.status_code(), 404);

    let response = server.get("/api/resources/journal/not-a-hex-id").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn mutations_require_a_bearer_token() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let body = json!({ "title": "Open day", "date": "2024-06-10" });

    let response = server.post("/api/resources/event").json(&body).await;
    assert_eq!(response.status_code(), 401);

    let response = server
        .post("/api/resources/event")
        .authorization_bearer("wrong-token")
        .json(&body)
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn subadmin_may_create_but_not_delete() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/resources/event")
        .authorization_bearer(common::SUBADMIN_TOKEN)
        .json(&json!({ "title": "Open day", "date": "2024-06-10" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let id = response.json::<serde_json::Value>()["data"]["_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .delete(&format!("/api/resources/event/{}", id))
        .authorization_bearer(common::SUBADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), 403);

    let response = server
        .delete(&format!("/api/resources/event/{}", id))
        .authorization_bearer(common::ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), 200);
}
