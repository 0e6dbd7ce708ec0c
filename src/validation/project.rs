use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::{FieldErrors, collect_errors, into_result, rules, with_message};
use crate::error::{AppError, AppResult};
use crate::models::{NewProject, ProjectType};

/// Project creation form as entered by the user. Every field may be missing;
/// [`ProjectForm::into_new_project`] only succeeds once the form is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default, rename = "type", alias = "project_type")]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub total_tasks: Option<i64>,
    #[serde(default)]
    pub sla_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub required_expertise: Vec<String>,
    #[serde(default)]
    pub estimated_time_per_task: Option<f64>,
    #[serde(default)]
    pub weekly_target: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl Validate for ProjectForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = rules::validate_not_blank(&self.name) {
            errors.add("name", with_message(e, "Project name is required"));
        }
        if let Err(e) = rules::validate_not_blank(&self.client) {
            errors.add("client", with_message(e, "Client name is required"));
        }
        if let Err(e) = rules::validate_required(&self.project_type) {
            errors.add("type", with_message(e, "Project type is required"));
        }
        if let Err(e) = rules::validate_positive_int(self.total_tasks) {
            errors.add(
                "total_tasks",
                with_message(e, "Total tasks must be greater than 0"),
            );
        }
        if let Err(e) = rules::validate_required(&self.sla_deadline) {
            errors.add("sla_deadline", with_message(e, "SLA deadline is required"));
        }
        if let Err(e) = rules::validate_positive_number(self.estimated_time_per_task) {
            errors.add(
                "estimated_time_per_task",
                with_message(e, "Time per task must be greater than 0"),
            );
        }
        if let Err(e) = rules::validate_required(&self.start_date) {
            errors.add("start_date", with_message(e, "Start date is required"));
        }

        match (self.start_date, self.end_date) {
            (_, None) => errors.add(
                "end_date",
                with_message(
                    validator::ValidationError::new("required"),
                    "End date is required",
                ),
            ),
            (Some(start), Some(end)) => {
                if let Err(e) = rules::validate_date_order(start, end, false) {
                    errors.add(
                        "end_date",
                        with_message(e, "End date must be after start date"),
                    );
                }
            }
            (None, Some(_)) => {}
        }

        into_result(errors)
    }
}

/// Returns the per-field errors; an empty map means the form may be submitted.
pub fn validate_project_form(form: &ProjectForm) -> FieldErrors {
    collect_errors(form)
}

impl ProjectForm {
    pub fn into_new_project(self) -> AppResult<NewProject> {
        let errors = validate_project_form(&self);
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let (
            Some(project_type),
            Some(total_tasks),
            Some(sla_deadline),
            Some(estimated_time_per_task),
            Some(start_date),
            Some(end_date),
        ) = (
            self.project_type,
            self.total_tasks,
            self.sla_deadline,
            self.estimated_time_per_task,
            self.start_date,
            self.end_date,
        )
        else {
            return Err(AppError::internal("validated project form is incomplete"));
        };

        Ok(NewProject {
            name: self.name.trim().to_string(),
            client: self.client.trim().to_string(),
            project_type,
            total_tasks,
            sla_deadline,
            required_expertise: self.required_expertise,
            estimated_time_per_task,
            weekly_target: self.weekly_target.unwrap_or(0),
            start_date,
            end_date,
            priority: self.priority,
        })
    }
}
