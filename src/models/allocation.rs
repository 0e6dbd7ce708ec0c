use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRODUCTIVITY: f64 = 1.0;

// Allocation models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(alias = "allocation_id")]
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub weekly_hours_allocated: f64,
    pub weekly_tasks_allocated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productivity_override: Option<f64>,
    pub effective_week: NaiveDate,
}

impl Allocation {
    pub fn productivity(&self) -> f64 {
        self.productivity_override.unwrap_or(DEFAULT_PRODUCTIVITY)
    }
}

/// A proposed allocation, before the backend has assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAllocation {
    pub employee_id: i64,
    pub project_id: i64,
    pub weekly_hours_allocated: f64,
    pub weekly_tasks_allocated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productivity_override: Option<f64>,
    pub effective_week: NaiveDate,
}

impl NewAllocation {
    pub fn productivity(&self) -> f64 {
        self.productivity_override.unwrap_or(DEFAULT_PRODUCTIVITY)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_hours_allocated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_tasks_allocated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productivity_override: Option<f64>,
}

impl AllocationUpdate {
    pub fn is_empty(&self) -> bool {
        self.weekly_hours_allocated.is_none()
            && self.weekly_tasks_allocated.is_none()
            && self.productivity_override.is_none()
    }
}
