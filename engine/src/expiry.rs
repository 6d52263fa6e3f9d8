//! Expiry tracking for truck papers, driver licenses and employee documents.

use crate::domain::{Driver, Employee, Truck};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days ahead of expiry at which a date starts being flagged.
pub const DEFAULT_WARN_DAYS: i64 = 30;

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ExpiryStatus {
    Expired,
    #[serde(rename_all = "camelCase")]
    ExpiringSoon { days_left: i64 },
    Valid,
}

/// Classify `expires_on` relative to `today`.
///
/// A date that expires today is still expiring (zero days left), not expired.
pub fn expiry_status(expires_on: NaiveDate, today: NaiveDate, warn_days: i64) -> ExpiryStatus {
    let days_left = (expires_on - today).num_days();
    if days_left < 0 {
        ExpiryStatus::Expired
    } else if days_left <= warn_days {
        ExpiryStatus::ExpiringSoon { days_left }
    } else {
        ExpiryStatus::Valid
    }
}

/// What kind of paper is expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Itp,
    Rca,
    Vignette,
    DriverLicense,
    EmployeeDocument,
}

/// An expired or soon-expiring item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub kind: AlertKind,
    /// Id of the truck, driver or employee
    pub subject_id: String,
    /// Human label: plate number, driver name, or "employee: document"
    pub subject: String,
    pub expires_on: NaiveDate,
    #[serde(flatten)]
    pub status: ExpiryStatus,
}

struct AlertCollector {
    today: NaiveDate,
    warn_days: i64,
    alerts: Vec<ExpiryAlert>,
}

impl AlertCollector {
    fn check(&mut self, kind: AlertKind, subject_id: &str, subject: String, date: &str) {
        let expires_on = match parse_date(date) {
            Ok(d) => d,
            Err(_) => {
                tracing::warn!(subject_id, date, ?kind, "skipping unparsable expiry date");
                return;
            }
        };

        let status = expiry_status(expires_on, self.today, self.warn_days);
        if status != ExpiryStatus::Valid {
            self.alerts.push(ExpiryAlert {
                kind,
                subject_id: subject_id.to_string(),
                subject,
                expires_on,
                status,
            });
        }
    }
}

/// Gather every expired or soon-expiring date, soonest first.
pub fn collect_alerts(
    trucks: &[Truck],
    drivers: &[Driver],
    employees: &[Employee],
    today: NaiveDate,
    warn_days: i64,
) -> Vec<ExpiryAlert> {
    let mut collector = AlertCollector {
        today,
        warn_days,
        alerts: Vec::new(),
    };

    for truck in trucks {
        let plate = &truck.plate_number;
        collector.check(AlertKind::Itp, &truck.id, plate.clone(), &truck.itp_expiry);
        collector.check(AlertKind::Rca, &truck.id, plate.clone(), &truck.rca_expiry);
        collector.check(AlertKind::Vignette, &truck.id, plate.clone(), &truck.vignette_expiry);
    }

    for driver in drivers {
        collector.check(
            AlertKind::DriverLicense,
            &driver.id,
            driver.name.clone(),
            &driver.license_expiry,
        );
    }

    for employee in employees {
        for doc in &employee.documents {
            if let Some(date) = &doc.expiry_date {
                collector.check(
                    AlertKind::EmployeeDocument,
                    &employee.id,
                    format!("{}: {}", employee.name, doc.name),
                    date,
                );
            }
        }
    }

    let mut alerts = collector.alerts;
    alerts.sort_by(|a, b| {
        a.expires_on
            .cmp(&b.expires_on)
            .then_with(|| a.subject.cmp(&b.subject))
            .then_with(|| a.kind.cmp(&b.kind))
    });
    alerts
}

/// Recompute `is_expired` on each of the employee's documents.
///
/// Documents without an expiry date (or with an unparsable one) get `None`.
/// Returns the number of expired documents.
pub fn refresh_document_flags(employee: &mut Employee, today: NaiveDate) -> usize {
    let mut expired = 0;
    for doc in &mut employee.documents {
        doc.is_expired = doc
            .expiry_date
            .as_deref()
            .and_then(|d| parse_date(d).ok())
            .map(|d| d < today);
        if doc.is_expired == Some(true) {
            expired += 1;
        }
    }
    expired
}
