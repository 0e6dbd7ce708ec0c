use validator::{Validate, ValidationErrors};

use super::{FieldErrors, collect_errors, into_result, rules, with_message};
use crate::models::NewAllocation;

impl Validate for NewAllocation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = rules::validate_positive_int(Some(self.employee_id)) {
            errors.add("employee_id", with_message(e, "Employee is required"));
        }
        if let Err(e) = rules::validate_positive_int(Some(self.project_id)) {
            errors.add("project_id", with_message(e, "Project is required"));
        }
        if let Err(e) = rules::validate_non_negative(self.weekly_hours_allocated) {
            errors.add(
                "weekly_hours_allocated",
                with_message(e, "Weekly hours cannot be negative"),
            );
        }
        if self.weekly_tasks_allocated < 0 {
            errors.add(
                "weekly_tasks_allocated",
                with_message(
                    validator::ValidationError::new("negative"),
                    "Weekly tasks cannot be negative",
                ),
            );
        }
        if self.productivity_override.is_some() {
            if let Err(e) = rules::validate_positive_number(self.productivity_override) {
                errors.add(
                    "productivity_override",
                    with_message(e, "Productivity must be greater than 0"),
                );
            }
        }

        into_result(errors)
    }
}

pub fn validate_allocation(allocation: &NewAllocation) -> FieldErrors {
    collect_errors(allocation)
}
