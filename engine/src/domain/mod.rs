//! Record types for the dashboard modules.
//!
//! Field names are camelCase on the wire and enum variants snake_case, so the
//! persisted JSON keeps the shape the dashboard frontend reads. Dates are ISO
//! `YYYY-MM-DD` strings; use [`crate::expiry::parse_date`] to interpret them.

pub mod accounting;
pub mod fleet;
pub mod hr;
pub mod reports;
pub mod transport;

pub use accounting::{Invoice, InvoiceItem, InvoiceStatus, InvoiceType, Supplier};
pub use fleet::{FuelRecord, Part, PartUsage, ServiceRecord, ServiceType};
pub use hr::{
    Bonus, BonusType, DocumentType, Employee, EmployeeDocument, LeaveRequest, LeaveStatus,
    LeaveType,
};
pub use reports::{ChartData, Kpi, ReportFilter, ReportPeriod, Trend};
pub use transport::{Driver, DriverStatus, Order, OrderStatus, Trip, TripStatus, Truck, TruckStatus};
