pub mod display;

pub use display::{UNKNOWN_EMPLOYEE, UNKNOWN_PROJECT, employee_name, project_name};
