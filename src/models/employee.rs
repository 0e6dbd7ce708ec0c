use super::enums::WorkType;
use super::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(alias = "employee_id")]
    pub id: i64,
    pub name: String,
    pub work_type: WorkType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub work_type: WorkType,
    pub skills: Vec<String>,
}
