use super::support::{allocation_json, date, employee_json, project_json, seeded};
use resource_planner::api::{HttpMethod, endpoints};
use resource_planner::error::AppError;
use resource_planner::models::{LeaveType, ProjectType, Severity, WarningType};
use resource_planner::services::allocations_service::{AllocationEntry, AllocationRequest};
use resource_planner::services::{
    AllocationsService, DashboardService, LeavesService, ProjectsService, RequestContext,
};
use resource_planner::utils::{UNKNOWN_PROJECT, employee_name, project_name};
use resource_planner::validation::{LeaveForm, ProjectForm};
use tokio_test::{assert_err, assert_ok};

fn ctx() -> RequestContext {
    RequestContext::new(date(2024, 1, 11))
}

fn entry(employee_id: i64, hours: f64, tasks: i64) -> AllocationEntry {
    AllocationEntry {
        employee_id,
        weekly_hours_allocated: hours,
        weekly_tasks_allocated: tasks,
        productivity_override: None,
    }
}

#[tokio::test]
async fn preview_reports_warnings_per_employee() {
    let state = seeded().state();
    let request = AllocationRequest {
        project_id: 1,
        effective_week: None,
        entries: vec![entry(11, 15.0, 7), entry(10, 5.0, 2)],
    };

    let preview = AllocationsService::preview(&state, &ctx(), &request)
        .await
        .unwrap();
    assert_eq!(preview.project_name, "Arm calibration");

    let ben = &preview.employees[0];
    assert_eq!(ben.employee_name, "Ben");
    assert_eq!(ben.metrics.allocated_hours, 10.0);
    assert_eq!(ben.metrics.available_hours, 20.0);
    let kinds: Vec<_> = ben.warnings.iter().map(|w| w.warning_type).collect();
    assert_eq!(kinds, vec![WarningType::Overload, WarningType::SkillMismatch]);
    assert_eq!(
        ben.warnings[0].message,
        "Employee overloaded: 25h allocated vs 20h available"
    );
    assert_eq!(
        ben.warnings[1].message,
        "Employee lacks required skills: robotics"
    );

    let ana = &preview.employees[1];
    assert_eq!(ana.warnings.len(), 1);
    assert_eq!(ana.warnings[0].warning_type, WarningType::OnLeave);
    assert_eq!(ana.warnings[0].severity, Severity::High);

    // 40h existing + 20h proposed covers the 50h/week requirement
    assert!(!preview.allocation_check.is_under_allocated);
    assert!(preview.project_warning.is_none());
    assert!(preview.has_warnings());
}

#[tokio::test]
async fn preview_flags_productivity_mismatch_and_shortfall() {
    let state = seeded().state();
    let request = AllocationRequest {
        project_id: 2,
        effective_week: None,
        entries: vec![entry(12, 4.0, 40)],
    };

    let preview = AllocationsService::preview(&state, &ctx(), &request)
        .await
        .unwrap();
    let warnings = &preview.employees[0].warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].warning_type, WarningType::ProductivityMismatch);
    assert_eq!(warnings[0].severity, Severity::Low);

    let warning = preview.project_warning.unwrap();
    assert_eq!(warning.warning_type, WarningType::UnderAllocation);
    assert_eq!(
        warning.message,
        "Project needs 40.00h/week but only 24.00h/week allocated. Shortage: 16.00h/week"
    );
}

#[tokio::test]
async fn preview_skips_employees_missing_from_the_list() {
    let state = seeded().state();

    let request = AllocationRequest {
        project_id: 99,
        effective_week: None,
        entries: vec![entry(10, 1.0, 0)],
    };
    let err = assert_err!(AllocationsService::preview(&state, &ctx(), &request).await);
    assert!(err.is_not_found());

    let request = AllocationRequest {
        project_id: 1,
        effective_week: None,
        entries: vec![entry(10, 5.0, 2), entry(77, 4.0, 2)],
    };
    let preview = AllocationsService::preview(&state, &ctx(), &request)
        .await
        .unwrap();
    assert_eq!(preview.employees.len(), 1);
    assert_eq!(preview.employees[0].employee_id, 10);
    assert_eq!(preview.employees[0].employee_name, "Ana");

    // the unknown entry's hours still count toward the project
    let shortfall = preview.allocation_check.shortfall.unwrap();
    assert_eq!(shortfall.allocated, 49.0);
}

#[tokio::test]
async fn create_defaults_effective_week_to_context_date() {
    let backend = seeded();
    let state = backend.state();
    let request = AllocationRequest {
        project_id: 2,
        effective_week: None,
        entries: vec![entry(10, 5.0, 2), entry(11, 5.0, 2)],
    };

    let created = AllocationsService::create(&state, &ctx(), &request)
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|a| a.effective_week == date(2024, 1, 11)));
    assert_eq!(state.allocations.for_project(2).await.unwrap().len(), 3);

    let empty = AllocationRequest {
        entries: vec![],
        ..request
    };
    let err = assert_err!(AllocationsService::create(&state, &ctx(), &empty).await);
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn project_creation_validates_before_sending() {
    let backend = seeded();
    let state = backend.state();

    let err = assert_err!(ProjectsService::create(&state, &ctx(), ProjectForm::default()).await);
    match err {
        AppError::Validation { errors } => {
            assert_eq!(errors["name"], "Project name is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.count(HttpMethod::Post, endpoints::PROJECTS), 0);

    let form = ProjectForm {
        name: "  Gait study ".into(),
        client: "Ortho Labs".into(),
        project_type: Some(ProjectType::Poc),
        total_tasks: Some(40),
        sla_deadline: Some(date(2024, 6, 30)),
        required_expertise: vec!["medical_imaging".into()],
        estimated_time_per_task: Some(0.5),
        weekly_target: None,
        start_date: Some(date(2024, 6, 1)),
        end_date: Some(date(2024, 6, 29)),
        priority: Some("high".into()),
    };
    let project = ProjectsService::create(&state, &ctx(), form).await.unwrap();
    assert_eq!(project.name, "Gait study");
    assert_eq!(project.weekly_target, 0);
    assert!(project.is_active());

    let pocs = ProjectsService::list(&state, Some(ProjectType::Poc)).await.unwrap();
    assert_eq!(pocs.len(), 1);
    assert_eq!(ProjectsService::list(&state, None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn project_report_shows_shortfall() {
    let state = seeded().state();
    let report = ProjectsService::report(&state, 1).await.unwrap();

    assert_eq!(report.requirements.required_hours, 200.0);
    assert_eq!(report.requirements.duration_weeks, 4);
    assert_eq!(report.requirements.weekly_required_hours, 50.0);
    assert_eq!(report.allocations.len(), 2);

    let shortfall = report.allocation_check.shortfall.unwrap();
    assert_eq!(shortfall.allocated, 40.0);
    assert_eq!(shortfall.shortage, 10.0);
    assert_eq!(
        report.warning.unwrap().message,
        "Project needs 50.00h/week but only 40.00h/week allocated. Shortage: 10.00h/week"
    );
}

#[tokio::test]
async fn project_delete_goes_to_the_backend_even_when_cache_is_stale() {
    let backend = seeded();
    let state = backend.state();
    assert_eq!(state.projects.list().await.unwrap().len(), 2);

    backend.seed(
        "projects",
        vec![
            project_json(1, "Arm calibration", "2024-01-01", "2024-01-29"),
            project_json(2, "Scan labelling", "2024-03-01", "2024-03-31"),
            project_json(3, "Late addition", "2024-05-01", "2024-05-31"),
        ],
    );

    assert_ok!(ProjectsService::delete(&state, 3).await);
    assert_eq!(backend.count(HttpMethod::Delete, "/projects/3"), 1);
    assert_eq!(state.projects.list().await.unwrap().len(), 2);

    let err = assert_err!(ProjectsService::delete(&state, 404).await);
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert_eq!(backend.count(HttpMethod::Delete, "/projects/404"), 1);
}

#[tokio::test]
async fn leave_creation_reports_impact() {
    let backend = seeded();
    let state = backend.state();

    let form = LeaveForm {
        employee_id: Some(11),
        start_date: Some(date(2024, 1, 15)),
        end_date: Some(date(2024, 1, 16)),
        leave_type: Some(LeaveType::Sick),
    };
    let leave = LeavesService::create(&state, &ctx(), form).await.unwrap();
    let impact = LeavesService::impact_of(&state, &leave).await.unwrap();

    assert_eq!(impact.affected_projects.len(), 1);
    assert_eq!(impact.affected_projects[0].project_name, "Arm calibration");
    assert_eq!(impact.overlapping_leaves, 0);
    assert_eq!(
        impact.warnings[0].message,
        "Ben on leave during Arm calibration (10h/week allocated)"
    );
}

#[tokio::test]
async fn leave_impact_counts_overlapping_leaves() {
    let state = seeded().state();
    let impact = LeavesService::impact(&state, 30).await.unwrap();

    assert_eq!(impact.overlapping_leaves, 1);
    let kinds: Vec<_> = impact.warnings.iter().map(|w| w.warning_type).collect();
    assert_eq!(kinds, vec![WarningType::OnLeave, WarningType::MultipleLeaves]);

    assert!(LeavesService::impact(&state, 999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn leave_for_employee_added_after_caching_is_sent() {
    let backend = seeded();
    let state = backend.state();
    assert_eq!(state.employees.list().await.unwrap().len(), 3);

    backend.seed(
        "employees",
        vec![
            employee_json(10, "Ana", "full_time", &["robotics", "coding"]),
            employee_json(11, "Ben", "part_time", &["coding"]),
            employee_json(12, "Chen", "full_time", &["robotics"]),
            employee_json(13, "Dee", "part_time", &[]),
        ],
    );

    let form = LeaveForm {
        employee_id: Some(13),
        start_date: Some(date(2024, 2, 1)),
        end_date: Some(date(2024, 2, 1)),
        leave_type: Some(LeaveType::Casual),
    };
    let leave = LeavesService::create(&state, &ctx(), form).await.unwrap();
    assert_eq!(leave.employee_id, 13);
    assert_eq!(backend.count(HttpMethod::Post, endpoints::LEAVES), 1);

    let form = LeaveForm {
        employee_id: Some(10),
        start_date: Some(date(2024, 2, 3)),
        end_date: Some(date(2024, 2, 1)),
        leave_type: Some(LeaveType::Casual),
    };
    let err = assert_err!(LeavesService::create(&state, &ctx(), form).await);
    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(backend.count(HttpMethod::Post, endpoints::LEAVES), 1);
}
#[tokio::test]
async fn dashboard_summarizes_the_day() {
    let state = seeded().state();
    let summary = DashboardService::summary(&state, &ctx()).await.unwrap();

    assert_eq!(summary.total_projects, 2);
    assert_eq!(summary.active_projects, 2);
    assert_eq!(summary.total_employees, 3);
    assert_eq!(summary.total_allocations, 3);
    assert_eq!(summary.active_leaves.len(), 2);
    assert_eq!(
        summary.upcoming_leaves.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![31]
    );
}

#[tokio::test]
async fn dangling_references_render_placeholders() {
    let backend = seeded();
    backend.seed("allocations", vec![allocation_json(50, 10, 77, 8.0)]);
    let state = backend.state();

    let allocations = state.allocations.list().await.unwrap();
    let projects = state.projects.list().await.unwrap();
    let employees = state.employees.list().await.unwrap();

    assert_eq!(project_name(&projects, allocations[0].project_id), UNKNOWN_PROJECT);
    assert_eq!(employee_name(&employees, allocations[0].employee_id), "Ana");
}
