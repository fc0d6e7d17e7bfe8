use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use bson::{Bson, Document};
use serde_json::{json, Value};

use crate::auth::models::Role;
use crate::auth::verifier::authorize;
use crate::db::repository::ResourceStore;
use crate::error::AppError;
use crate::schema::catalog::ResourceKind;
use crate::schema::fields::{validate, validate_partial};
use crate::state::AppState;

/// Resolve a route's kind segment; unknown kinds are a 404, not a 400,
/// since the path itself does not exist.
pub fn parse_kind(segment: &str) -> Result<ResourceKind, AppError> {
    ResourceKind::from_str_ci(segment)
        .ok_or_else(|| AppError::NotFound(format!("unknown resource kind '{}'", segment)))
}

fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => {
            Value::String(dt.try_to_rfc3339_string().unwrap_or_default())
        }
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s.clone()),
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(n) => Value::from(*n),
        Bson::Int64(n) => Value::from(*n),
        Bson::Double(n) => json!(n),
        Bson::Null => Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Render a stored document as plain JSON: ObjectIds become hex
/// strings, datetimes become RFC 3339 strings.
pub fn document_to_json(doc: &Document) -> Value {
    Value::Object(
        doc.iter()
            .map(|(k, v)| (k.clone(), bson_to_json(v)))
            .collect(),
    )
}

fn body_object(raw: &Value) -> Result<&serde_json::Map<String, Value>, AppError> {
    raw.as_object()
        .ok_or_else(|| AppError::malformed("body", "a JSON object"))
}

// -- Core operations, separated from the HTTP layer for testability --

pub async fn create_resource(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    raw: &Value,
) -> Result<Value, AppError> {
    let fields = validate(kind.descriptor().fields, body_object(raw)?)?;
    let stored = store.insert(kind, fields).await?;
    Ok(document_to_json(&stored))
}

pub async fn read_resource(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    id: &str,
) -> Result<Value, AppError> {
    Ok(document_to_json(&store.find_by_id(kind, id).await?))
}

pub async fn search_resource(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    term: &str,
) -> Result<Value, AppError> {
    Ok(document_to_json(&store.find_by_search(kind, term).await?))
}

pub async fn list_resources(
    store: &dyn ResourceStore,
    kind: ResourceKind,
) -> Result<Value, AppError> {
    let docs = store.list(kind).await?;
    Ok(Value::Array(docs.iter().map(document_to_json).collect()))
}

pub async fn update_resource(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    id: &str,
    raw: &Value,
) -> Result<Value, AppError> {
    let changes = validate_partial(kind.descriptor().fields, body_object(raw)?)?;
    let updated = store.update(kind, id, changes).await?;
    Ok(document_to_json(&updated))
}

pub async fn delete_resource(
    store: &dyn ResourceStore,
    kind: ResourceKind,
    id: &str,
) -> Result<Value, AppError> {
    Ok(document_to_json(&store.delete(kind, id).await?))
}

// -- Axum handlers --

pub async fn create_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    authorize(state.verifier.as_ref(), &headers, Role::Subadmin).await?;
    let kind = parse_kind(&kind)?;
    let data = create_resource(state.resources.as_ref(), kind, &body).await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn read_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_kind(&kind)?;
    let data = read_resource(state.resources.as_ref(), kind, &id).await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Path((kind, term)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_kind(&kind)?;
    let data = search_resource(state.resources.as_ref(), kind, &term).await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn list_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_kind(&kind)?;
    let data = list_resources(state.resources.as_ref(), kind).await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn update_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    authorize(state.verifier.as_ref(), &headers, Role::Subadmin).await?;
    let kind = parse_kind(&kind)?;
    let data = update_resource(state.resources.as_ref(), kind, &id, &body).await?;
    Ok(Json(json!({ "data": data })))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    authorize(state.verifier.as_ref(), &headers, Role::Admin).await?;
    let kind = parse_kind(&kind)?;
    let data = delete_resource(state.resources.as_ref(), kind, &id).await?;
    Ok(Json(json!({ "data": data })))
}
