//! Simplified accounting: invoices and suppliers.

use crate::expiry::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl InvoiceItem {
    /// Build a line item, computing its total.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub number: String,
    pub date: String,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    pub client_name: String,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(rename = "totalWithoutVAT")]
    pub total_without_vat: f64,
    pub vat: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    /// Name of a simulated attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
}

impl Invoice {
    /// Sum of the line item totals.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }

    /// Whether the invoice is still owed.
    pub fn is_unpaid(&self) -> bool {
        self.status != InvoiceStatus::Paid
    }

    /// Unpaid and past its due date. An unparsable due date is never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if !self.is_unpaid() {
            return false;
        }
        match parse_date(&self.due_date) {
            Ok(due) => due < today,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Fiscal registration code (CUI)
    pub cui: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub bank_account: String,
}
