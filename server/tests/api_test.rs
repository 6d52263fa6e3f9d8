//! Integration tests for the HTTP API.
//!
//! Each test builds the router over an in-memory store seeded with the demo
//! data and drives it with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use transmarin_engine::{
    seed_mock_data, CollectionKind, CollectionStore, FileStorage, MemoryStorage, Storage,
};
use transmarin_server::{app, config::Config, AppState};

fn test_app() -> Router {
    let storage: Box<dyn Storage + Send> = Box::new(MemoryStorage::new());
    let mut store = CollectionStore::new(storage);
    seed_mock_data(&mut store).unwrap();
    app(AppState::new(store, Config::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn login_as(app: &Router, role: &str) {
    let (status, _) = send(app, Method::POST, "/auth/login-as", Some(json!({"role": role}))).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_seeded_collections() {
    let app = test_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["collections"], 12);

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Transmarin Server");
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn login_lifecycle() {
    let app = test_app();

    let (status, _) = get(&app, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({"email": "dispecer@transmarin.ro", "password": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ion Popescu");
    assert_eq!(body["role"], "dispecer");

    let (status, body) = get(&app, "/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "dispecer@transmarin.ro");

    let (status, _) = send(&app, Method::POST, "/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_as_rejects_unknown_role() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login-as",
        Some(json!({"role": "pilot"})),
    )
    .await;
    assert!(status.is_client_error());
}

// ============================================================================
// Permissions
// ============================================================================

#[tokio::test]
async fn collections_require_session() {
    let app = test_app();
    let (status, _) = get(&app, "/api/collections/drivers").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_gates_modules() {
    let app = test_app();
    login_as(&app, "hr").await;

    let (status, body) = get(&app, "/api/collections/invoices").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _) = get(&app, "/api/collections/employees").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/reports/orders-by-status").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_collection_is_404() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, _) = get(&app, "/api/collections/widgets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn list_paginates_orders() {
    let app = test_app();
    login_as(&app, "dispecer").await;

    let (status, page) = get(&app, "/api/collections/orders?page=2&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalItems"], 30);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert_eq!(page["hasPrevious"], true);
    assert_eq!(page["hasNext"], true);
    assert_eq!(page["pageNumbers"], json!([1, 2, 3]));
}

#[tokio::test]
async fn list_search_filter_sort() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (_, page) = get(&app, "/api/collections/drivers?search=marin").await;
    assert_eq!(page["totalItems"], 1);
    assert_eq!(page["items"][0]["id"], "d1");

    let (_, page) = get(&app, "/api/collections/drivers?status=on_trip").await;
    assert_eq!(page["totalItems"], 1);
    assert_eq!(page["items"][0]["id"], "d3");

    let (_, page) = get(&app, "/api/collections/drivers?status=all").await;
    assert_eq!(page["totalItems"], 3);

    let (_, page) = get(&app, "/api/collections/drivers?sort=name&order=desc").await;
    assert_eq!(page["items"][0]["name"], "Vasile Popa");
}

#[tokio::test]
async fn list_rejects_bad_paging() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, body) = get(&app, "/api/collections/drivers?page=zero").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("page"));
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
async fn record_lifecycle() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/collections/drivers",
        Some(json!({
            "name": "Mihai Dobre",
            "phone": "0721000009",
            "licenseExpiry": "2028-01-01",
            "status": "available"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let uri = format!("/api/collections/drivers/{}", id);

    let (status, fetched) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"status": "off_duty", "id": "hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "off_duty");
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Mihai Dobre");

    let (_, page) = get(&app, "/api/collections/drivers").await;
    assert_eq!(page["totalItems"], 4);
    assert_eq!(page["items"][3]["id"], id.as_str());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_keeps_client_id() {
    let app = test_app();
    login_as(&app, "contabil").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/collections/suppliers",
        Some(json!({
            "id": "s-client",
            "name": "Anvelope Dobrogea SRL",
            "cui": "RO40000001",
            "address": "Str. Portului 5, Constanța",
            "phone": "0241000001",
            "email": "office@anvelopedobrogea.ro",
            "bankAccount": "RO49AAAA1B31007593840000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "s-client");
}

#[tokio::test]
async fn create_rejects_non_object() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, _) = send(&app, Method::POST, "/api/collections/parts", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_record_of_wrong_shape() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/collections/employees",
        Some(json!({"name": "Nou"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("employees"));

    // Nothing was written, and the typed scans still see every employee
    let (_, page) = get(&app, "/api/collections/employees").await;
    assert_eq!(page["totalItems"], 3);
    let (_, stats) = get(&app, "/api/dashboard").await;
    assert_eq!(stats["employeeCount"], 3);
}

#[tokio::test]
async fn update_rejects_merge_of_wrong_shape() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (_, before) = get(&app, "/api/collections/trucks/t1").await;
    let (_, alerts_before) = get(&app, "/api/alerts?warnDays=100000").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/collections/trucks/t1",
        Some(json!({"itpExpiry": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = get(&app, "/api/collections/trucks/t1").await;
    assert_eq!(after, before);
    let (_, alerts_after) = get(&app, "/api/alerts?warnDays=100000").await;
    assert_eq!(alerts_after, alerts_before);
    assert!(alerts_after
        .as_array()
        .unwrap()
        .iter()
        .any(|alert| alert["subjectId"] == "t1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn file_backed_writes_reach_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transmarin.json");

    let storage: Box<dyn Storage + Send> = Box::new(FileStorage::open(&path).unwrap());
    let mut store = CollectionStore::new(storage);
    seed_mock_data(&mut store).unwrap();
    let app = app(AppState::new(store, Config::default()));
    login_as(&app, "admin").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/collections/drivers/d2",
        Some(json!({"status": "off_duty"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, "/api/collections/drivers/d3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let reopened = CollectionStore::new(FileStorage::open(&path).unwrap());
    let drivers: Vec<Value> = reopened.get_collection(CollectionKind::Drivers.storage_key());
    let ids: Vec<&str> = drivers.iter().filter_map(|d| d["id"].as_str()).collect();
    assert_eq!(ids, ["d1", "d2"]);
    assert_eq!(drivers[1]["status"], "off_duty");
}

#[tokio::test]
async fn update_missing_record_is_404() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/collections/trucks/nope",
        Some(json!({"status": "in_service"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn dashboard_counts_match_collections() {
    let app = test_app();

    let (status, _) = get(&app, "/api/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login_as(&app, "admin").await;
    let (_, employees) = get(&app, "/api/collections/employees?pageSize=50").await;

    let (status, stats) = get(&app, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["employeeCount"], employees["totalItems"]);
    assert!(stats["activeOrders"].as_u64().unwrap() > 0);

    let (status, kpis) = get(&app, "/api/dashboard/kpis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kpis.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn alerts_window() {
    let app = test_app();
    login_as(&app, "admin").await;

    let (status, _) = get(&app, "/api/alerts?warnDays=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wide enough that every seeded expiry date is flagged
    let (status, alerts) = get(&app, "/api/alerts?warnDays=100000").await;
    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap();
    assert!(!alerts.is_empty());
    assert!(alerts
        .windows(2)
        .all(|w| w[0]["expiresOn"].as_str() <= w[1]["expiresOn"].as_str()));
}

#[tokio::test]
async fn report_series() {
    let app = test_app();
    login_as(&app, "contabil").await;

    let (status, series) = get(&app, "/api/reports/orders-by-status").await;
    assert_eq!(status, StatusCode::OK);
    let total: f64 = series
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["value"].as_f64().unwrap())
        .sum();
    assert_eq!(total, 30.0);

    let (status, fuel) = get(&app, "/api/reports/fuel-by-truck?period=month").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fuel, json!([]));
}
