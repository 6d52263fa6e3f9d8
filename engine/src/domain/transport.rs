//! Transport & dispatch records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order still needs dispatch work.
    pub fn is_active(self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A customer transport order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub status: OrderStatus,
    /// Cargo weight in tonnes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planned,
    Active,
    Completed,
}

/// A truck run fulfilling an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub order_id: String,
    pub driver_id: String,
    pub truck_id: String,
    pub date: String,
    pub km_loaded: f64,
    pub km_empty: f64,
    pub fuel_cost: f64,
    pub status: TripStatus,
}

impl Trip {
    /// Loaded plus empty kilometres.
    pub fn total_km(&self) -> f64 {
        self.km_loaded + self.km_empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub license_expiry: String,
    pub status: DriverStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckStatus {
    Available,
    OnTrip,
    InService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub mileage: u64,
    pub status: TruckStatus,
    /// Technical inspection (ITP)
    pub itp_expiry: String,
    /// Mandatory liability insurance (RCA)
    pub rca_expiry: String,
    pub vignette_expiry: String,
}
