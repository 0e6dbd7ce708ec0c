use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{FieldErrors, collect_errors, into_result, rules, with_message};
use crate::error::{AppError, AppResult};
use crate::models::{LeaveType, NewLeave};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveForm {
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
}

impl Validate for LeaveForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = rules::validate_positive_int(self.employee_id) {
            errors.add("employee_id", with_message(e, "Employee is required"));
        }
        if let Err(e) = rules::validate_required(&self.start_date) {
            errors.add("start_date", with_message(e, "Start date is required"));
        }

        match (self.start_date, self.end_date) {
            (_, None) => errors.add(
                "end_date",
                with_message(ValidationError::new("required"), "End date is required"),
            ),
            // a single-day leave is allowed
            (Some(start), Some(end)) => {
                if let Err(e) = rules::validate_date_order(start, end, true) {
                    errors.add(
                        "end_date",
                        with_message(e, "End date must be after start date"),
                    );
                }
            }
            (None, Some(_)) => {}
        }

        if let Err(e) = rules::validate_required(&self.leave_type) {
            errors.add("leave_type", with_message(e, "Leave type is required"));
        }

        into_result(errors)
    }
}

pub fn validate_leave_form(form: &LeaveForm) -> FieldErrors {
    collect_errors(form)
}

impl LeaveForm {
    pub fn into_new_leave(self) -> AppResult<NewLeave> {
        let errors = validate_leave_form(&self);
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        match (self.employee_id, self.start_date, self.end_date, self.leave_type) {
            (Some(employee_id), Some(start_date), Some(end_date), Some(leave_type)) => {
                Ok(NewLeave {
                    employee_id,
                    start_date,
                    end_date,
                    leave_type,
                })
            }
            _ => Err(AppError::internal("validated leave form is incomplete")),
        }
    }
}
