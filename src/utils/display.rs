use crate::models::{Employee, Project};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// Name for display; a dangling reference renders as a placeholder.
pub fn project_name(projects: &[Project], project_id: i64) -> &str {
    projects
        .iter()
        .find(|p| p.id == project_id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_PROJECT)
}

pub fn employee_name(employees: &[Employee], employee_id: i64) -> &str {
    employees
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.name.as_str())
        .unwrap_or(UNKNOWN_EMPLOYEE)
}
