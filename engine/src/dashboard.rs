//! Headline statistics and chart series computed from the stored collections.

use crate::collection::CollectionStore;
use crate::domain::{
    ChartData, Driver, Employee, FuelRecord, Invoice, Kpi, Order, OrderStatus, Part, ReportFilter,
    Trip, Truck,
};
use crate::expiry::{collect_alerts, parse_date, DEFAULT_WARN_DAYS};
use crate::keys::CollectionKind;
use crate::storage::Storage;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters shown on the dashboard home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_orders: usize,
    pub orders_in_transit: usize,
    pub employee_count: usize,
    pub invoices_this_month: usize,
    pub unpaid_invoices: usize,
    pub km_this_month: f64,
    pub low_stock_parts: usize,
    pub alert_count: usize,
}

fn same_month(date: &str, today: NaiveDate) -> bool {
    parse_date(date).is_ok_and(|d| d.year() == today.year() && d.month() == today.month())
}

impl DashboardStats {
    /// Compute with the default expiry warning window.
    pub fn compute<S: Storage>(store: &CollectionStore<S>, today: NaiveDate) -> Self {
        Self::compute_with(store, today, DEFAULT_WARN_DAYS)
    }

    pub fn compute_with<S: Storage>(
        store: &CollectionStore<S>,
        today: NaiveDate,
        warn_days: i64,
    ) -> Self {
        let orders: Vec<Order> = store.get_collection(CollectionKind::Orders.storage_key());
        let trips: Vec<Trip> = store.get_collection(CollectionKind::Trips.storage_key());
        let employees: Vec<Employee> = store.get_collection(CollectionKind::Employees.storage_key());
        let invoices: Vec<Invoice> = store.get_collection(CollectionKind::Invoices.storage_key());
        let parts: Vec<Part> = store.get_collection(CollectionKind::Parts.storage_key());
        let trucks: Vec<Truck> = store.get_collection(CollectionKind::Trucks.storage_key());
        let drivers: Vec<Driver> = store.get_collection(CollectionKind::Drivers.storage_key());

        let stats = Self {
            active_orders: orders.iter().filter(|o| o.status.is_active()).count(),
            orders_in_transit: orders
                .iter()
                .filter(|o| o.status == OrderStatus::InTransit)
                .count(),
            employee_count: employees.len(),
            invoices_this_month: invoices.iter().filter(|i| same_month(&i.date, today)).count(),
            unpaid_invoices: invoices.iter().filter(|i| i.is_unpaid()).count(),
            km_this_month: trips
                .iter()
                .filter(|t| same_month(&t.date, today))
                .map(Trip::total_km)
                .sum(),
            low_stock_parts: parts.iter().filter(|p| p.is_low_stock()).count(),
            alert_count: collect_alerts(&trucks, &drivers, &employees, today, warn_days).len(),
        };

        tracing::debug!(?stats, %today, "computed dashboard stats");
        stats
    }

    /// The counters as labelled KPI cards.
    pub fn kpis(&self) -> Vec<Kpi> {
        let card = |label: &str, value: f64, unit: &str| Kpi {
            label: label.to_string(),
            value,
            unit: unit.to_string(),
            trend: None,
            change_percent: None,
        };

        vec![
            card("Comenzi active", self.active_orders as f64, ""),
            card("În tranzit", self.orders_in_transit as f64, ""),
            card("Angajați", self.employee_count as f64, ""),
            card("Facturi luna aceasta", self.invoices_this_month as f64, ""),
            card("Facturi neplătite", self.unpaid_invoices as f64, ""),
            card("Km luna aceasta", self.km_this_month, "km"),
            card("Piese stoc redus", self.low_stock_parts as f64, ""),
            card("Alerte expirare", self.alert_count as f64, ""),
        ]
    }
}

fn order_status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "În așteptare",
        OrderStatus::Assigned => "Asignată",
        OrderStatus::InTransit => "În tranzit",
        OrderStatus::Delivered => "Livrată",
        OrderStatus::Cancelled => "Anulată",
    }
}

/// Order counts per status, every status present, in workflow order.
pub fn orders_by_status<S: Storage>(store: &CollectionStore<S>) -> Vec<ChartData> {
    let orders: Vec<Order> = store.get_collection(CollectionKind::Orders.storage_key());

    [
        OrderStatus::Pending,
        OrderStatus::Assigned,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ]
    .into_iter()
    .map(|status| {
        let count = orders.iter().filter(|o| o.status == status).count();
        ChartData::new(order_status_label(status), count as f64)
    })
    .collect()
}

fn within_period(date: &str, filter: &ReportFilter) -> bool {
    let bound = |b: &Option<String>| b.as_deref().and_then(|s| parse_date(s).ok());
    let (start, end) = (bound(&filter.start_date), bound(&filter.end_date));
    if start.is_none() && end.is_none() {
        return true;
    }
    let Ok(date) = parse_date(date) else {
        return false;
    };
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

/// Fuel spend per truck, highest first. Trucks are labelled by plate number
/// when known, by id otherwise. The filter's date range (inclusive) and truck
/// id narrow the records considered.
pub fn fuel_cost_by_truck<S: Storage>(
    store: &CollectionStore<S>,
    filter: &ReportFilter,
) -> Vec<ChartData> {
    let records: Vec<FuelRecord> = store.get_collection(CollectionKind::FuelRecords.storage_key());
    let trucks: Vec<Truck> = store.get_collection(CollectionKind::Trucks.storage_key());

    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for record in records.iter().filter(|r| {
        filter.truck_id.as_deref().map_or(true, |id| r.truck_id == id)
            && within_period(&r.date, filter)
    }) {
        let entry = totals.entry(record.truck_id.as_str()).or_default();
        entry.0 += record.cost;
        entry.1 += record.liters;
    }

    let mut series: Vec<ChartData> = totals
        .into_iter()
        .map(|(truck_id, (cost, liters))| {
            let name = trucks
                .iter()
                .find(|t| t.id == truck_id)
                .map_or(truck_id, |t| t.plate_number.as_str());
            let mut point = ChartData::new(name, cost);
            point.extra.insert("liters".into(), serde_json::json!(liters));
            point
        })
        .collect();

    series.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvoiceStatus, InvoiceType, ReportPeriod, TripStatus, TruckStatus};
    use crate::seed::seed_mock_data;
    use crate::storage::MemoryStorage;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn trip(id: &str, date: &str, loaded: f64, empty: f64) -> Trip {
        Trip {
            id: id.into(),
            order_id: "o1".into(),
            driver_id: "d1".into(),
            truck_id: "t1".into(),
            date: date.into(),
            km_loaded: loaded,
            km_empty: empty,
            fuel_cost: 0.0,
            status: TripStatus::Completed,
        }
    }

    fn invoice(id: &str, date: &str, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: id.into(),
            invoice_type: InvoiceType::Income,
            number: format!("TM-{}", id),
            date: date.into(),
            due_date: date.into(),
            supplier_id: None,
            client_name: "SC Logistica SRL".into(),
            items: Vec::new(),
            total_without_vat: 100.0,
            vat: 19.0,
            total: 119.0,
            status,
            attachment_name: None,
        }
    }

    fn fuel(id: &str, truck_id: &str, date: &str, liters: f64, cost: f64) -> FuelRecord {
        FuelRecord {
            id: id.into(),
            truck_id: truck_id.into(),
            date: date.into(),
            liters,
            cost,
            mileage: 0,
        }
    }

    #[test]
    fn empty_store_is_all_zero() {
        let store = CollectionStore::new(MemoryStorage::new());
        assert_eq!(
            DashboardStats::compute(&store, date("2026-02-21")),
            DashboardStats::default()
        );
    }

    #[test]
    fn stats_over_seed_data() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        seed_mock_data(&mut store).unwrap();

        let orders: Vec<Order> = store.get_collection(CollectionKind::Orders.storage_key());
        let employees: Vec<Employee> =
            store.get_collection(CollectionKind::Employees.storage_key());

        let stats = DashboardStats::compute(&store, date("2026-02-21"));
        assert_eq!(
            stats.active_orders,
            orders.iter().filter(|o| o.status.is_active()).count()
        );
        assert_eq!(stats.employee_count, employees.len());
        assert_eq!(stats.invoices_this_month, 0);
        assert_eq!(stats.km_this_month, 0.0);
        assert_eq!(stats.kpis().len(), 8);
    }

    #[test]
    fn month_scoped_counters() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        store
            .set_collection(
                CollectionKind::Trips.storage_key(),
                &[
                    trip("a", "2026-02-03", 400.0, 50.0),
                    trip("b", "2026-02-19", 300.0, 0.0),
                    trip("c", "2026-01-31", 900.0, 0.0),
                ],
            )
            .unwrap();
        store
            .set_collection(
                CollectionKind::Invoices.storage_key(),
                &[
                    invoice("1", "2026-02-01", InvoiceStatus::Paid),
                    invoice("2", "2026-02-10", InvoiceStatus::Sent),
                    invoice("3", "2025-02-10", InvoiceStatus::Overdue),
                ],
            )
            .unwrap();

        let stats = DashboardStats::compute(&store, date("2026-02-21"));
        assert_eq!(stats.km_this_month, 750.0);
        assert_eq!(stats.invoices_this_month, 2);
        assert_eq!(stats.unpaid_invoices, 2);
    }

    #[test]
    fn order_status_series() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        seed_mock_data(&mut store).unwrap();

        let series = orders_by_status(&store);
        let orders: Vec<Order> = store.get_collection(CollectionKind::Orders.storage_key());
        assert_eq!(series.len(), 5);
        assert_eq!(series[2].name, "În tranzit");
        let total: f64 = series.iter().map(|p| p.value).sum();
        assert_eq!(total, orders.len() as f64);
    }

    #[test]
    fn fuel_series_grouped_and_filtered() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        store
            .set_collection(
                CollectionKind::Trucks.storage_key(),
                &[Truck {
                    id: "t1".into(),
                    plate_number: "CT-01-TML".into(),
                    brand: "Volvo".into(),
                    model: "FH16".into(),
                    year: 2021,
                    mileage: 0,
                    status: TruckStatus::Available,
                    itp_expiry: "2027-01-01".into(),
                    rca_expiry: "2027-01-01".into(),
                    vignette_expiry: "2027-01-01".into(),
                }],
            )
            .unwrap();
        store
            .set_collection(
                CollectionKind::FuelRecords.storage_key(),
                &[
                    fuel("f1", "t1", "2026-02-01", 100.0, 700.0),
                    fuel("f2", "t1", "2026-02-15", 50.0, 350.0),
                    fuel("f3", "t9", "2026-02-10", 200.0, 1400.0),
                    fuel("f4", "t1", "2026-03-01", 10.0, 70.0),
                ],
            )
            .unwrap();

        let filter = ReportFilter {
            period: ReportPeriod::Custom,
            start_date: Some("2026-02-01".into()),
            end_date: Some("2026-02-28".into()),
            truck_id: None,
            client_name: None,
            route: None,
        };
        let series = fuel_cost_by_truck(&store, &filter);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "t9");
        assert_eq!(series[0].value, 1400.0);
        assert_eq!(series[1].name, "CT-01-TML");
        assert_eq!(series[1].value, 1050.0);
        assert_eq!(series[1].extra["liters"], serde_json::json!(150.0));

        let only_t1 = ReportFilter {
            truck_id: Some("t1".into()),
            start_date: None,
            end_date: None,
            ..filter
        };
        let series = fuel_cost_by_truck(&store, &only_t1);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 1120.0);
    }
}
