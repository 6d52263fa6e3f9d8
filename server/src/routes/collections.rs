//! Generic CRUD routes over the named collections.
//!
//! Records travel as untyped JSON objects so the frontend owns their shape;
//! the server only requires a string `id`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use transmarin_engine::{
    generate_id, AuthUser, CollectionKind, ListQuery, Page, SortDirection,
};

use crate::auth::{require_module, CurrentUser};
use crate::error::{AppError, Result};
use crate::AppState;

/// Query parameters with a fixed meaning; everything else is a field filter.
const RESERVED_PARAMS: [&str; 5] = ["search", "sort", "order", "page", "pageSize"];

/// Create collection routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/collections/{name}",
            get(list_records).post(create_record),
        )
        .route(
            "/api/collections/{name}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// Resolve `name` and check the user may touch it.
fn authorize(name: &str, user: &AuthUser) -> Result<CollectionKind> {
    let kind = CollectionKind::from_name(name)
        .map_err(|_| AppError::NotFound(format!("unknown collection: {}", name)))?;
    require_module(user, kind.module())?;
    Ok(kind)
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

fn parse_param<T: std::str::FromStr>(params: &HashMap<String, String>, name: &str) -> Result<Option<T>> {
    params
        .get(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid {}: {}", name, raw)))
        })
        .transpose()
}

/// Translate query parameters into a [`ListQuery`].
fn list_query(params: &HashMap<String, String>) -> Result<ListQuery> {
    let mut query = ListQuery::new();

    if let Some(search) = params.get("search") {
        query = query.search(search.as_str());
    }

    if let Some(field) = params.get("sort").filter(|f| !f.is_empty()) {
        let direction = match params.get("order") {
            Some(raw) => raw.parse::<SortDirection>().map_err(AppError::BadRequest)?,
            None => SortDirection::Asc,
        };
        query = query.sort_by(field.as_str(), direction);
    }

    let page = parse_param(params, "page")?.unwrap_or(1);
    let page_size = parse_param(params, "pageSize")?.unwrap_or(10);
    if page == 0 || page_size == 0 {
        return Err(AppError::BadRequest("page and pageSize start at 1".into()));
    }
    query = query.page(page, page_size);

    for (field, value) in params {
        if !RESERVED_PARAMS.contains(&field.as_str()) {
            query = query.filter(field.as_str(), value.as_str());
        }
    }

    Ok(query)
}

fn into_object(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("record must be a JSON object".into())),
    }
}

/// GET /api/collections/{name} - Search, filter, sort and page a collection.
async fn list_records(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<Value>>> {
    let kind = authorize(&name, &user)?;
    let query = list_query(&params)?;

    let store = state.store.lock().await;
    let records: Vec<Value> = store.get_collection(kind.storage_key());
    Ok(Json(query.apply(records)))
}

/// POST /api/collections/{name} - Append a record, generating its id if absent.
async fn create_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let kind = authorize(&name, &user)?;
    let mut record = into_object(body)?;

    let id_missing = record
        .get("id")
        .and_then(Value::as_str)
        .map_or(true, str::is_empty);
    if id_missing {
        record.insert("id".into(), Value::String(generate_id()));
    }
    let record = Value::Object(record);
    kind.validate(&record)?;

    let stored = record.clone();
    state
        .write_store(move |store| {
            store.add_item(kind.storage_key(), stored)?;
            Ok(())
        })
        .await?;
    tracing::debug!(collection = %kind, id = ?record.get("id"), "record created");

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/collections/{name}/{id}
async fn get_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let kind = authorize(&name, &user)?;

    let store = state.store.lock().await;
    let found = store.find_item(kind.storage_key(), |r: &Value| has_id(r, &id));
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind, id)))
}

/// Shallow-merge `patch` into `record`, keeping its id.
fn merge(mut record: Value, patch: &Map<String, Value>) -> Value {
    if let Value::Object(fields) = &mut record {
        for (field, value) in patch {
            if field != "id" {
                fields.insert(field.clone(), value.clone());
            }
        }
    }
    record
}

/// PUT /api/collections/{name}/{id} - Merge fields into a record. The id
/// itself cannot be changed.
async fn update_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((name, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let kind = authorize(&name, &user)?;
    let patch = into_object(body)?;

    let merged = state
        .write_store(move |store| {
            let key = kind.storage_key();
            let current = store
                .find_item(key, |r: &Value| has_id(r, &id))
                .ok_or_else(|| AppError::NotFound(format!("{} {}", kind, id)))?;

            // Nothing is written unless the merged record still fits.
            let merged = merge(current, &patch);
            kind.validate(&merged)?;

            let replacement = merged.clone();
            store.update_item(key, |r: &Value| has_id(r, &id), |_| replacement.clone())?;
            Ok(merged)
        })
        .await?;

    Ok(Json(merged))
}

/// DELETE /api/collections/{name}/{id}
async fn delete_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((name, id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let kind = authorize(&name, &user)?;

    state
        .write_store(move |store| {
            let key = kind.storage_key();
            if store.find_item(key, |r: &Value| has_id(r, &id)).is_none() {
                return Err(AppError::NotFound(format!("{} {}", kind, id)));
            }

            let removed = store.remove_item(key, |r: &Value| has_id(r, &id))?;
            tracing::debug!(collection = %kind, %id, removed, "record deleted");
            Ok(())
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn list_query_from_params() {
        let query = list_query(&params(&[
            ("search", "ion"),
            ("sort", "name"),
            ("order", "desc"),
            ("page", "2"),
            ("pageSize", "20"),
            ("status", "available"),
        ]))
        .unwrap();

        let expected = ListQuery::new()
            .search("ion")
            .sort_by("name", SortDirection::Desc)
            .page(2, 20)
            .filter("status", "available");
        assert_eq!(query, expected);
    }

    #[test]
    fn bad_params_rejected() {
        assert!(matches!(
            list_query(&params(&[("page", "two")])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            list_query(&params(&[("pageSize", "0")])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            list_query(&params(&[("sort", "name"), ("order", "up")])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn merge_keeps_id() {
        let record = serde_json::json!({"id": "d1", "name": "Gheorghe Marin", "status": "available"});
        let patch = into_object(serde_json::json!({"id": "x", "status": "off_duty"})).unwrap();

        let merged = merge(record, &patch);
        assert_eq!(
            merged,
            serde_json::json!({"id": "d1", "name": "Gheorghe Marin", "status": "off_duty"})
        );
    }

    #[test]
    fn unknown_collection_is_not_found() {
        let admin = transmarin_engine::auth::demo_user(transmarin_engine::UserRole::Admin);
        assert!(matches!(
            authorize("widgets", &admin),
            Err(AppError::NotFound(_))
        ));
        assert!(authorize("service-records", &admin).is_ok());
    }
}
