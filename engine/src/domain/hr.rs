//! Human resources records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    pub email: String,
    pub hire_date: String,
    pub salary: f64,
    #[serde(default)]
    pub documents: Vec<EmployeeDocument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    License,
    Tachograph,
    Adr,
    Medical,
    Contract,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Cached result of the last expiry check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expired: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub days: u32,
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Payroll adjustments: per diem, bonus, fine, overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    Diurna,
    Bonus,
    Amenda,
    OreSuplimentare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    pub id: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub bonus_type: BonusType,
    pub amount: f64,
    pub date: String,
    pub description: String,
}

impl Bonus {
    /// Amount with fines counted as deductions.
    pub fn signed_amount(&self) -> f64 {
        match self.bonus_type {
            BonusType::Amenda => -self.amount,
            _ => self.amount,
        }
    }
}
