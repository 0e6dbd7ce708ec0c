//! Backend REST paths, relative to the configured base URL.

pub const PROJECTS: &str = "/projects";
pub const EMPLOYEES: &str = "/employees";
pub const ALLOCATIONS: &str = "/allocations";
pub const LEAVES: &str = "/leaves";

pub fn project_by_id(id: i64) -> String {
    format!("{}/{}", PROJECTS, id)
}

pub fn employee_by_id(id: i64) -> String {
    format!("{}/{}", EMPLOYEES, id)
}

pub fn allocation_by_id(id: i64) -> String {
    format!("{}/{}", ALLOCATIONS, id)
}

pub fn allocations_by_project(project_id: i64) -> String {
    format!("{}/project/{}", ALLOCATIONS, project_id)
}

pub fn allocations_by_employee(employee_id: i64) -> String {
    format!("{}/employee/{}", ALLOCATIONS, employee_id)
}

pub fn leave_by_id(id: i64) -> String {
    format!("{}/{}", LEAVES, id)
}

pub fn leaves_by_employee(employee_id: i64) -> String {
    format!("{}/employee/{}", LEAVES, employee_id)
}
