use serde::Serialize;

use super::calculations::periods_overlap;
use super::warnings::Warning;
use crate::models::{Allocation, Employee, Leave, Project, Severity, WarningType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectedProject {
    pub project_id: i64,
    pub project_name: String,
}

/// What a leave does to the schedule: which of the employee's projects it
/// cuts into and how many other leaves overlap it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaveImpact {
    pub warnings: Vec<Warning>,
    pub affected_projects: Vec<AffectedProject>,
    pub overlapping_leaves: usize,
}

pub fn leave_impact(
    leave: &Leave,
    employees: &[Employee],
    allocations: &[Allocation],
    projects: &[Project],
    leaves: &[Leave],
) -> LeaveImpact {
    let Some(employee) = employees.iter().find(|e| e.id == leave.employee_id) else {
        return LeaveImpact::default();
    };

    let mut impact = LeaveImpact::default();

    for allocation in allocations.iter().filter(|a| a.employee_id == leave.employee_id) {
        let Some(project) = projects.iter().find(|p| p.id == allocation.project_id) else {
            continue;
        };

        if !periods_overlap(
            leave.start_date,
            leave.end_date,
            project.start_date,
            project.end_date,
        ) {
            continue;
        }

        if !impact
            .affected_projects
            .iter()
            .any(|affected| affected.project_id == project.id)
        {
            impact.affected_projects.push(AffectedProject {
                project_id: project.id,
                project_name: project.name.clone(),
            });
        }

        impact.warnings.push(Warning::new(
            WarningType::OnLeave,
            format!(
                "{} on leave during {} ({}h/week allocated)",
                employee.name, project.name, allocation.weekly_hours_allocated
            ),
            Severity::High,
        ));
    }

    impact.overlapping_leaves = leaves
        .iter()
        .filter(|other| other.id != leave.id)
        .filter(|other| {
            periods_overlap(
                leave.start_date,
                leave.end_date,
                other.start_date,
                other.end_date,
            )
        })
        .count();

    if impact.overlapping_leaves > 0 {
        impact.warnings.push(Warning::new(
            WarningType::MultipleLeaves,
            format!(
                "{} other employee(s) also on leave during this period",
                impact.overlapping_leaves
            ),
            Severity::Medium,
        ));
    }

    impact
}
