//! Dashboard statistics, expiry alerts and report series.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use transmarin_engine::domain::{ChartData, Driver, Employee, Kpi, ReportFilter, Truck};
use transmarin_engine::{
    collect_alerts, fuel_cost_by_truck, orders_by_status, CollectionKind, DashboardStats,
    ExpiryAlert, Module,
};

use crate::auth::{require_module, CurrentUser};
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsQuery {
    pub warn_days: Option<i64>,
}

/// Create dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/dashboard/kpis", get(kpis))
        .route("/api/alerts", get(alerts))
        .route("/api/reports/orders-by-status", get(orders_report))
        .route("/api/reports/fuel-by-truck", get(fuel_report))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn compute_stats(state: &AppState) -> DashboardStats {
    let store = state.store.lock().await;
    DashboardStats::compute_with(&*store, today(), state.config.alert_warn_days)
}

/// GET /api/dashboard - Headline counters.
async fn dashboard(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Json<DashboardStats> {
    Json(compute_stats(&state).await)
}

/// GET /api/dashboard/kpis - Counters as KPI cards.
async fn kpis(State(state): State<AppState>, _user: CurrentUser) -> Json<Vec<Kpi>> {
    Json(compute_stats(&state).await.kpis())
}

/// GET /api/alerts - Expired and soon-expiring documents.
async fn alerts(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<Vec<ExpiryAlert>>> {
    let warn_days = query.warn_days.unwrap_or(state.config.alert_warn_days);
    if warn_days < 0 {
        return Err(AppError::BadRequest("warnDays must not be negative".into()));
    }

    let store = state.store.lock().await;
    let trucks: Vec<Truck> = store.get_collection(CollectionKind::Trucks.storage_key());
    let drivers: Vec<Driver> = store.get_collection(CollectionKind::Drivers.storage_key());
    let employees: Vec<Employee> = store.get_collection(CollectionKind::Employees.storage_key());

    Ok(Json(collect_alerts(
        &trucks, &drivers, &employees, today(), warn_days,
    )))
}

/// GET /api/reports/orders-by-status
async fn orders_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ChartData>>> {
    require_module(&user, Module::Reports)?;
    let store = state.store.lock().await;
    Ok(Json(orders_by_status(&*store)))
}

/// GET /api/reports/fuel-by-truck - Fuel spend per truck for a period.
async fn fuel_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<ChartData>>> {
    require_module(&user, Module::Reports)?;
    let store = state.store.lock().await;
    Ok(Json(fuel_cost_by_truck(&*store, &filter)))
}
