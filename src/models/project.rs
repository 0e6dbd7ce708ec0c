use super::enums::ProjectType;
use super::null_as_default;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_project_status() -> String {
    "active".to_string()
}

// Project models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "project_id")]
    pub id: i64,
    pub name: String,
    pub client: String,
    #[serde(rename = "type", alias = "project_type")]
    pub project_type: ProjectType,
    pub total_tasks: i64,
    #[serde(default)]
    pub sla_deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_expertise: Vec<String>,
    pub estimated_time_per_task: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_target: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default = "default_project_status")]
    pub project_status: String,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.project_status == "active"
    }
}

// Project API DTOs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub total_tasks: i64,
    pub sla_deadline: NaiveDate,
    pub required_expertise: Vec<String>,
    pub estimated_time_per_task: f64,
    pub weekly_target: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}
