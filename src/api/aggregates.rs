use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::resources::document_to_json;
use crate::db::repository::ResourceStore;
use crate::error::AppError;
use crate::schema::catalog::ResourceKind;
use crate::state::AppState;

/// Group every document of a kind by the value of one text field.
///
/// Each distinct key maps to the array of matching documents, in the
/// kind's default order. Read-only; an absent key groups under "".
pub async fn group_by_field(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    key: &str,
) -> Result<Value, AppError> {
    let docs = store.list(kind).await?;

    let mut groups: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for doc in docs {
        let group = doc.get_str(key).unwrap_or("").to_string();
        groups.entry(group).or_default().push(document_to_json(&doc));
    }

    Ok(json!(groups))
}

/// Split a kind into two named arrays by the value of an enumerated
/// field: two filtered queries, one response object.
pub async fn merge_by_status(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    field: &str,
    first: (&str, &str),
    second: (&str, &str),
) -> Result<Value, AppError> {
    use mongodb::bson::doc;

    let (first_key, first_value) = first;
    let (second_key, second_value) = second;

    let first_docs = store
        .list_filtered(kind, doc! { field: first_value })
        .await?;
    let second_docs = store
        .list_filtered(kind, doc! { field: second_value })
        .await?;

    Ok(json!({
        first_key: first_docs.iter().map(document_to_json).collect::<Vec<_>>(),
        second_key: second_docs.iter().map(document_to_json).collect::<Vec<_>>(),
    }))
}

// -- Axum handlers --

pub async fn students_by_course_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let data = group_by_field(state.resources.as_ref(), ResourceKind::Student, "course").await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn activities_by_name_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let data = group_by_field(state.resources.as_ref(), ResourceKind::Activity, "name").await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn patents_by_status_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let data = merge_by_status(
        state.resources.as_ref(),
        ResourceKind::Patent,
        "status",
        ("granted", "Granted"),
        ("filed", "Filed"),
    )
    .await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn projects_by_category_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let data = merge_by_status(
        state.resources.as_ref(),
        ResourceKind::Project,
        "category",
        ("ongoing", "Ongoing"),
        ("funded", "Funded"),
    )
    .await?;
    Ok(Json(json!({ "data": data })))
}
