use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Allocation, Employee, Leave, Project, WorkType};

pub const HOURS_PER_DAY_FULL_TIME: f64 = 8.0;
pub const HOURS_PER_DAY_PART_TIME: f64 = 4.0;
pub const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// Fraction of available hours above which an employee counts as overloaded.
pub const OVERLOAD_THRESHOLD: f64 = 1.0;
/// Relative deviation between allocated and expected tasks that is flagged.
pub const PRODUCTIVITY_DEVIATION: f64 = 0.3;

/// 每周可用工时：全职 5×8，兼职 5×4；无法识别的类型按兼职计算
pub fn available_hours(work_type: WorkType) -> f64 {
    let hours_per_day = match work_type {
        WorkType::FullTime => HOURS_PER_DAY_FULL_TIME,
        WorkType::PartTime | WorkType::Other => HOURS_PER_DAY_PART_TIME,
    };
    WORKING_DAYS_PER_WEEK * hours_per_day
}

/// Sum of `weekly_hours_allocated` over every allocation of the employee.
///
/// This is not scoped to a week: allocations for different `effective_week`s
/// are all added together.
pub fn total_allocated_hours(allocations: &[Allocation], employee_id: i64) -> f64 {
    allocations
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .map(|a| a.weekly_hours_allocated)
        .sum()
}

pub fn required_hours(total_tasks: i64, estimated_time_per_task: f64) -> f64 {
    total_tasks as f64 * estimated_time_per_task
}

/// Whole weeks spanned by the absolute day distance between the two dates,
/// rounded up. Identical dates give 0.
pub fn project_duration_weeks(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days().abs();
    (days + 6) / 7
}

pub fn weekly_required_hours(required_hours: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    let weeks = project_duration_weeks(start, end);
    if weeks > 0 {
        required_hours / weeks as f64
    } else {
        required_hours
    }
}

/// Every required tag must be present (exact, case-sensitive match). An empty
/// requirement is always satisfied.
pub fn has_required_skills<S, R>(employee_skills: &[S], required_skills: &[R]) -> bool
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    required_skills.iter().all(|required| {
        employee_skills
            .iter()
            .any(|skill| skill.as_ref() == required.as_ref())
    })
}

/// Inclusive interval overlap: touching endpoints count.
pub fn periods_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

pub fn is_on_leave(date: NaiveDate, leaves: &[Leave]) -> bool {
    leaves
        .iter()
        .any(|leave| leave.start_date <= date && date <= leave.end_date)
}

pub fn has_leave_conflict(project: &Project, leaves: &[Leave]) -> bool {
    leaves.iter().any(|leave| {
        periods_overlap(
            leave.start_date,
            leave.end_date,
            project.start_date,
            project.end_date,
        )
    })
}

/// Leaves covering `today`.
pub fn active_leaves(leaves: &[Leave], today: NaiveDate) -> Vec<&Leave> {
    leaves
        .iter()
        .filter(|leave| leave.start_date <= today && leave.end_date >= today)
        .collect()
}

/// Leaves starting within `[today, today + days]`.
pub fn upcoming_leaves(leaves: &[Leave], today: NaiveDate, days: i64) -> Vec<&Leave> {
    let horizon = today + Duration::days(days);
    leaves
        .iter()
        .filter(|leave| leave.start_date >= today && leave.start_date <= horizon)
        .collect()
}

pub fn filter_by_skills<'a, R: AsRef<str>>(
    employees: &'a [Employee],
    required_skills: &[R],
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| has_required_skills(e.skills.as_slice(), required_skills))
        .collect()
}

/// Employees with no leave of their own covering `date`.
pub fn available_on<'a>(
    employees: &'a [Employee],
    leaves: &[Leave],
    date: NaiveDate,
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|employee| {
            !leaves.iter().any(|leave| {
                leave.employee_id == employee.id
                    && leave.start_date <= date
                    && date <= leave.end_date
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectRequirements {
    pub required_hours: f64,
    pub duration_weeks: i64,
    pub weekly_required_hours: f64,
}

pub fn project_requirements(project: &Project) -> ProjectRequirements {
    let required = required_hours(project.total_tasks, project.estimated_time_per_task);
    ProjectRequirements {
        required_hours: required,
        duration_weeks: project_duration_weeks(project.start_date, project.end_date),
        weekly_required_hours: weekly_required_hours(
            required,
            project.start_date,
            project.end_date,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmployeeMetrics {
    pub available_hours: f64,
    pub allocated_hours: f64,
    pub remaining_hours: f64,
    pub utilization_percent: f64,
}

pub fn employee_metrics(employee: &Employee, allocations: &[Allocation]) -> EmployeeMetrics {
    let available = available_hours(employee.work_type);
    let allocated = total_allocated_hours(allocations, employee.id);
    EmployeeMetrics {
        available_hours: available,
        allocated_hours: allocated,
        remaining_hours: available - allocated,
        utilization_percent: allocated / available * 100.0,
    }
}
