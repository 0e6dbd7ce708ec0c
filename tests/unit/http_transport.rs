use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use resource_planner::{
    AppState,
    api::REQUEST_ID_HEADER,
    config::Config,
    error::AppError,
    models::{NewAllocation, ProjectType, WorkType},
};
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use super::support::date;

async fn spawn(app: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    format!("http://{}", addr)
}

fn state_for(base_url: String) -> AppState {
    AppState::new(Config {
        api_base_url: base_url,
        api_timeout_secs: 5,
        ..Config::default()
    })
    .unwrap()
}

async fn list_projects() -> Json<Value> {
    Json(json!([
        {
            "project_id": 7,
            "name": "Trajectory review",
            "client": "Acme",
            "project_type": "PoC",
            "total_tasks": 12,
            "sla_deadline": null,
            "required_expertise": null,
            "estimated_time_per_task": 1.5,
            "weekly_target": null,
            "start_date": "2024-02-01",
            "end_date": "2024-02-15"
        }
    ]))
}

async fn list_employees(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok());
    if request_id.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!([
        { "employee_id": 3, "name": "Ana", "work_type": "full_time", "skills": ["coding"] }
    ])))
}

async fn get_project(Path(id): Path<i64>) -> (StatusCode, String) {
    match id {
        404 => (
            StatusCode::NOT_FOUND,
            json!({ "message": "Project not found" }).to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>upstream exploded</html>".to_string(),
        ),
    }
}

async fn create_allocation(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "Allocation already exists" })),
    )
}

async fn delete_leave(Path(id): Path<i64>) -> StatusCode {
    if id == 5 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

fn app() -> Router {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/:id", get(get_project))
        .route("/api/employees", get(list_employees))
        .route("/api/allocations", post(create_allocation))
        .route("/api/leaves/:id", delete(delete_leave))
}

#[tokio::test]
async fn decodes_collections_under_a_path_prefix() {
    let base = spawn(app()).await;
    let state = state_for(format!("{}/api", base));

    let projects = state.projects.list().await.unwrap();
    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.id, 7);
    assert_eq!(project.project_type, ProjectType::Poc);
    assert!(project.required_expertise.is_empty());
    assert_eq!(project.weekly_target, 0);
    assert_eq!(project.sla_deadline, None);
    assert_eq!(project.start_date, date(2024, 2, 1));
}

#[tokio::test]
async fn every_request_carries_a_request_id() {
    let base = spawn(app()).await;
    let state = state_for(format!("{}/api/", base));

    let employees = state.employees.list().await.unwrap();
    assert_eq!(employees[0].id, 3);
    assert_eq!(employees[0].work_type, WorkType::FullTime);
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let base = spawn(app()).await;
    let state = state_for(format!("{}/api", base));

    let draft = NewAllocation {
        employee_id: 3,
        project_id: 7,
        weekly_hours_allocated: 10.0,
        weekly_tasks_allocated: 5,
        productivity_override: None,
        effective_week: date(2024, 2, 5),
    };
    let err = assert_err!(state.allocations.create(&draft).await);
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message(), "Allocation already exists");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let base = spawn(app()).await;
    let state = state_for(format!("{}/api", base));

    let err = assert_err!(state.projects.fetch(1).await);
    assert_eq!(err.user_message(), "HTTP Error: 500");

    // 404 on a single-entity fetch is "absent", not a failure
    assert_eq!(assert_ok!(state.projects.fetch(404).await), None);
}

#[tokio::test]
async fn no_content_delete_succeeds() {
    let base = spawn(app()).await;
    let state = state_for(format!("{}/api", base));

    assert_ok!(state.leaves.delete(5).await);
    let err = assert_err!(state.leaves.delete(6).await);
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "HTTP Error: 404");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let state = state_for(format!("http://{}", addr));

    let err = assert_err!(state.projects.list().await);
    assert!(matches!(err, AppError::Http(_)));
    assert!(state.projects.cache_stats().await.cached_items.is_none());
}
