use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;

pub mod allocation;
pub mod leave;
pub mod project;

pub use allocation::validate_allocation;
pub use leave::{LeaveForm, validate_leave_form};
pub use project::{ProjectForm, validate_project_form};

/// 字段名 -> 错误信息；非空即阻止提交
pub type FieldErrors = BTreeMap<String, String>;

/// 将 validator 的错误结构压平为每个字段一条信息
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, field_errors)| {
            field_errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field));
                (field.to_string(), message)
            })
        })
        .collect()
}

pub fn collect_errors<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    }
}

/// 本地校验，失败时不会发往后端
pub fn ensure_valid<T: Validate>(value: &T) -> Result<(), AppError> {
    let errors = collect_errors(value);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(errors))
    }
}

pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn with_message(mut error: ValidationError, message: &'static str) -> ValidationError {
    error.message = Some(Cow::Borrowed(message));
    error
}

/// 常用验证规则
pub mod rules {
    use chrono::NaiveDate;
    use validator::ValidationError;

    pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("required"));
        }
        Ok(())
    }

    pub fn validate_required<T>(value: &Option<T>) -> Result<(), ValidationError> {
        if value.is_none() {
            return Err(ValidationError::new("required"));
        }
        Ok(())
    }

    /// Missing counts as a failure, like an empty form input.
    pub fn validate_positive_int(value: Option<i64>) -> Result<(), ValidationError> {
        match value {
            Some(v) if v > 0 => Ok(()),
            _ => Err(ValidationError::new("not_positive")),
        }
    }

    pub fn validate_positive_number(value: Option<f64>) -> Result<(), ValidationError> {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => Ok(()),
            _ => Err(ValidationError::new("not_positive")),
        }
    }

    pub fn validate_non_negative(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::new("negative"));
        }
        Ok(())
    }

    /// `allow_same` distinguishes the leave form (single-day leave is fine)
    /// from the project form (end must be strictly later).
    pub fn validate_date_order(
        start: NaiveDate,
        end: NaiveDate,
        allow_same: bool,
    ) -> Result<(), ValidationError> {
        let ok = if allow_same { end >= start } else { end > start };
        if !ok {
            return Err(ValidationError::new("date_order"));
        }
        Ok(())
    }
}
