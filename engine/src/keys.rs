//! Storage keys for every collection, and the module each belongs to.

use crate::auth::Module;
use crate::domain::{
    Bonus, Driver, Employee, FuelRecord, Invoice, LeaveRequest, Order, Part, ServiceRecord,
    Supplier, Trip, Truck,
};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key under which the logged-in user is persisted.
pub const AUTH_USER_KEY: &str = "transmarin_auth_user";

/// The collections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    // Transport
    Orders,
    Trips,
    Drivers,
    Trucks,
    // Fleet
    Parts,
    ServiceRecords,
    FuelRecords,
    // Accounting
    Invoices,
    Suppliers,
    // HR
    Employees,
    LeaveRequests,
    Bonuses,
}

impl CollectionKind {
    /// Every collection, in module order.
    pub const ALL: [CollectionKind; 12] = [
        CollectionKind::Orders,
        CollectionKind::Trips,
        CollectionKind::Drivers,
        CollectionKind::Trucks,
        CollectionKind::Parts,
        CollectionKind::ServiceRecords,
        CollectionKind::FuelRecords,
        CollectionKind::Invoices,
        CollectionKind::Suppliers,
        CollectionKind::Employees,
        CollectionKind::LeaveRequests,
        CollectionKind::Bonuses,
    ];

    /// Short name used in URLs.
    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Orders => "orders",
            CollectionKind::Trips => "trips",
            CollectionKind::Drivers => "drivers",
            CollectionKind::Trucks => "trucks",
            CollectionKind::Parts => "parts",
            CollectionKind::ServiceRecords => "service-records",
            CollectionKind::FuelRecords => "fuel-records",
            CollectionKind::Invoices => "invoices",
            CollectionKind::Suppliers => "suppliers",
            CollectionKind::Employees => "employees",
            CollectionKind::LeaveRequests => "leave-requests",
            CollectionKind::Bonuses => "bonuses",
        }
    }

    /// Key the collection is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            CollectionKind::Orders => "transmarin_orders",
            CollectionKind::Trips => "transmarin_trips",
            CollectionKind::Drivers => "transmarin_drivers",
            CollectionKind::Trucks => "transmarin_trucks",
            CollectionKind::Parts => "transmarin_parts",
            CollectionKind::ServiceRecords => "transmarin_service_records",
            CollectionKind::FuelRecords => "transmarin_fuel_records",
            CollectionKind::Invoices => "transmarin_invoices",
            CollectionKind::Suppliers => "transmarin_suppliers",
            CollectionKind::Employees => "transmarin_employees",
            CollectionKind::LeaveRequests => "transmarin_leave_requests",
            CollectionKind::Bonuses => "transmarin_bonuses",
        }
    }

    /// Module whose permission guards this collection.
    pub fn module(self) -> Module {
        match self {
            CollectionKind::Orders
            | CollectionKind::Trips
            | CollectionKind::Drivers
            | CollectionKind::Trucks => Module::Transport,
            CollectionKind::Parts | CollectionKind::ServiceRecords | CollectionKind::FuelRecords => {
                Module::Fleet
            }
            CollectionKind::Invoices | CollectionKind::Suppliers => Module::Accounting,
            CollectionKind::Employees | CollectionKind::LeaveRequests | CollectionKind::Bonuses => {
                Module::Hr
            }
        }
    }

    /// Check that `record` reads back as this collection's record type.
    ///
    /// Typed scans read a collection all-or-nothing, so a single record that
    /// does not fit would hide every other one.
    pub fn validate(self, record: &Value) -> Result<()> {
        match self {
            CollectionKind::Orders => self.fits::<Order>(record),
            CollectionKind::Trips => self.fits::<Trip>(record),
            CollectionKind::Drivers => self.fits::<Driver>(record),
            CollectionKind::Trucks => self.fits::<Truck>(record),
            CollectionKind::Parts => self.fits::<Part>(record),
            CollectionKind::ServiceRecords => self.fits::<ServiceRecord>(record),
            CollectionKind::FuelRecords => self.fits::<FuelRecord>(record),
            CollectionKind::Invoices => self.fits::<Invoice>(record),
            CollectionKind::Suppliers => self.fits::<Supplier>(record),
            CollectionKind::Employees => self.fits::<Employee>(record),
            CollectionKind::LeaveRequests => self.fits::<LeaveRequest>(record),
            CollectionKind::Bonuses => self.fits::<Bonus>(record),
        }
    }

    fn fits<T: DeserializeOwned>(self, record: &Value) -> Result<()> {
        T::deserialize(record)
            .map(drop)
            .map_err(|e| Error::InvalidRecord {
                collection: self.name().to_string(),
                reason: e.to_string(),
            })
    }

    /// Look a collection up by its short name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
