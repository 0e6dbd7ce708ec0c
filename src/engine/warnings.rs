use serde::{Deserialize, Serialize};

use super::calculations::{
    OVERLOAD_THRESHOLD, PRODUCTIVITY_DEVIATION, available_hours, has_leave_conflict,
    has_required_skills, required_hours, total_allocated_hours, weekly_required_hours,
};
use crate::models::{Allocation, Employee, Leave, NewAllocation, Project, Severity, WarningType};

/// A non-blocking advisory about a proposed or existing allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub warning_type: WarningType,
    pub message: String,
    pub severity: Severity,
}

impl Warning {
    pub fn new(warning_type: WarningType, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            warning_type,
            message: message.into(),
            severity,
        }
    }
}

/// Runs the overload, skill and leave checks independently and returns one
/// warning per triggered check, always in that order.
///
/// `existing_allocations` may contain allocations of other employees; only the
/// ones belonging to `employee` are counted. `employee_leaves` is expected to
/// be the employee's own leaves and is not filtered further.
pub fn generate_allocation_warnings(
    employee: &Employee,
    proposed: &NewAllocation,
    project: &Project,
    existing_allocations: &[Allocation],
    employee_leaves: &[Leave],
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let available = available_hours(employee.work_type);
    let total_allocated =
        total_allocated_hours(existing_allocations, employee.id) + proposed.weekly_hours_allocated;

    if total_allocated > available * OVERLOAD_THRESHOLD {
        warnings.push(Warning::new(
            WarningType::Overload,
            format!(
                "Employee overloaded: {}h allocated vs {}h available",
                total_allocated, available
            ),
            Severity::High,
        ));
    }

    if !has_required_skills(
        employee.skills.as_slice(),
        project.required_expertise.as_slice(),
    ) {
        warnings.push(Warning::new(
            WarningType::SkillMismatch,
            format!(
                "Employee lacks required skills: {}",
                project.required_expertise.join(", ")
            ),
            Severity::Medium,
        ));
    }

    if has_leave_conflict(project, employee_leaves) {
        warnings.push(Warning::new(
            WarningType::OnLeave,
            "Employee has scheduled leave during project period",
            Severity::High,
        ));
    }

    warnings
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shortfall {
    pub required: f64,
    pub allocated: f64,
    pub shortage: f64,
}

/// Outcome of [`check_project_under_allocation`]. The shortfall figures are
/// only present when the project is under-allocated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnderAllocationCheck {
    pub is_under_allocated: bool,
    #[serde(flatten)]
    pub shortfall: Option<Shortfall>,
}

/// Compares the project's weekly requirement with the weekly hours committed
/// by allocations that belong to it. Allocations for other projects in the
/// slice are ignored.
pub fn check_project_under_allocation(
    project: &Project,
    allocations: &[Allocation],
) -> UnderAllocationCheck {
    let required = weekly_required_hours(
        required_hours(project.total_tasks, project.estimated_time_per_task),
        project.start_date,
        project.end_date,
    );

    let allocated: f64 = allocations
        .iter()
        .filter(|a| a.project_id == project.id)
        .map(|a| a.weekly_hours_allocated)
        .sum();

    if allocated < required {
        UnderAllocationCheck {
            is_under_allocated: true,
            shortfall: Some(Shortfall {
                required,
                allocated,
                shortage: required - allocated,
            }),
        }
    } else {
        UnderAllocationCheck {
            is_under_allocated: false,
            shortfall: None,
        }
    }
}

pub fn under_allocation_warning(check: &UnderAllocationCheck) -> Option<Warning> {
    let shortfall = check.shortfall.filter(|_| check.is_under_allocated)?;
    Some(Warning::new(
        WarningType::UnderAllocation,
        format!(
            "Project needs {:.2}h/week but only {:.2}h/week allocated. Shortage: {:.2}h/week",
            shortfall.required, shortfall.allocated, shortfall.shortage
        ),
        Severity::High,
    ))
}

/// Flags a task quota that is out of line with the hours given, taking the
/// project's time per task and the allocation's productivity factor into
/// account. Returns `None` when no meaningful expectation can be computed.
pub fn check_productivity_mismatch(proposed: &NewAllocation, project: &Project) -> Option<Warning> {
    if project.estimated_time_per_task <= 0.0 {
        return None;
    }

    let productivity = proposed.productivity();
    let expected =
        proposed.weekly_hours_allocated * productivity / project.estimated_time_per_task;
    if expected <= 0.0 {
        return None;
    }

    let allocated = proposed.weekly_tasks_allocated as f64;
    let deviation = (allocated - expected).abs() / expected;
    if deviation <= PRODUCTIVITY_DEVIATION {
        return None;
    }

    Some(Warning::new(
        WarningType::ProductivityMismatch,
        format!(
            "Task quota of {} tasks/week deviates {:.0}% from the expected {:.2} tasks/week at {}x productivity",
            proposed.weekly_tasks_allocated,
            deviation * 100.0,
            expected,
            productivity
        ),
        Severity::Low,
    ))
}
