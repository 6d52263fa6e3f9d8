//! Fleet & service records.

use serde::{Deserialize, Serialize};

/// A spare part kept in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub supplier: String,
    pub min_stock: u32,
}

impl Part {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Value of the parts on hand.
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Revision,
    Repair,
    Itp,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUsage {
    pub part_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub truck_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    pub cost: f64,
    #[serde(default)]
    pub parts_used: Vec<PartUsage>,
    pub mileage_at_service: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_service_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub id: String,
    pub truck_id: String,
    pub date: String,
    pub liters: f64,
    pub cost: f64,
    pub mileage: u64,
}

impl FuelRecord {
    /// Cost per litre, or `None` for a zero-litre entry.
    pub fn price_per_liter(&self) -> Option<f64> {
        (self.liters > 0.0).then(|| self.cost / self.liters)
    }
}
