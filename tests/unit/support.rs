use async_trait::async_trait;
use chrono::NaiveDate;
use resource_planner::{
    AppState,
    api::{ApiRequest, HttpMethod, Transport},
    config::Config,
    error::{AppError, AppResult},
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
struct BackendState {
    collections: BTreeMap<String, Vec<Value>>,
    next_id: i64,
    requests: Vec<ApiRequest>,
    // (collection, field, value) -> rejection message
    rejections: Vec<(String, String, Value, String)>,
}

/// In-memory stand-in for the planning backend, speaking the same REST paths.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 100;
        backend
    }

    pub fn seed(&self, collection: &str, items: Vec<Value>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .collections
            .insert(collection.to_string(), items);
        self
    }

    /// POSTs to `collection` whose body has `field == value` get a 400.
    pub fn reject_when(&self, collection: &str, field: &str, value: Value, message: &str) {
        self.state.lock().unwrap().rejections.push((
            collection.to_string(),
            field.to_string(),
            value,
            message.to_string(),
        ));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn state(&self) -> AppState {
        AppState::with_transport(Config::default(), Arc::new(self.clone()))
    }
}

fn not_found() -> AppError {
    AppError::api(404, "Not found")
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> AppResult<Option<Value>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let segments: Vec<&str> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .collect();
        let collection = segments[0].to_string();

        match (request.method, &segments[1..]) {
            (HttpMethod::Get, []) => Ok(Some(Value::Array(
                state.collections.get(&collection).cloned().unwrap_or_default(),
            ))),
            (HttpMethod::Get, [scope, id]) => {
                let field = format!("{}_id", scope);
                let id: i64 = id.parse().map_err(|_| not_found())?;
                let items: Vec<Value> = state
                    .collections
                    .get(&collection)
                    .map(|items| {
                        items
                            .iter()
                            .filter(|item| item[field.as_str()] == json!(id))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(Some(Value::Array(items)))
            }
            (HttpMethod::Get, [id]) => {
                let id: i64 = id.parse().map_err(|_| not_found())?;
                state
                    .collections
                    .get(&collection)
                    .and_then(|items| items.iter().find(|item| item["id"] == json!(id)))
                    .cloned()
                    .map(Some)
                    .ok_or_else(not_found)
            }
            (HttpMethod::Post, []) => {
                let mut body = request.body.clone().unwrap_or(Value::Null);
                let rejection = state.rejections.iter().find(|(c, field, value, _)| {
                    *c == collection && body.get(field.as_str()) == Some(value)
                });
                if let Some((_, _, _, message)) = rejection {
                    return Err(AppError::api(400, message.clone()));
                }

                state.next_id += 1;
                body["id"] = json!(state.next_id);
                state
                    .collections
                    .entry(collection)
                    .or_default()
                    .push(body.clone());
                Ok(Some(body))
            }
            (HttpMethod::Put, [id]) => {
                let id: i64 = id.parse().map_err(|_| not_found())?;
                let changes = request.body.clone().unwrap_or(Value::Null);
                let item = state
                    .collections
                    .get_mut(&collection)
                    .and_then(|items| items.iter_mut().find(|item| item["id"] == json!(id)))
                    .ok_or_else(not_found)?;
                if let (Some(target), Some(changes)) = (item.as_object_mut(), changes.as_object())
                {
                    for (key, value) in changes {
                        target.insert(key.clone(), value.clone());
                    }
                }
                Ok(Some(item.clone()))
            }
            (HttpMethod::Delete, [id]) => {
                let id: i64 = id.parse().map_err(|_| not_found())?;
                let items = state
                    .collections
                    .get_mut(&collection)
                    .ok_or_else(not_found)?;
                let before = items.len();
                items.retain(|item| item["id"] != json!(id));
                if items.len() == before {
                    return Err(not_found());
                }
                Ok(None)
            }
            _ => Err(not_found()),
        }
    }
}

pub fn project_json(id: i64, name: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "client": "Acme",
        "type": "Full",
        "total_tasks": 100,
        "sla_deadline": end,
        "required_expertise": ["robotics"],
        "estimated_time_per_task": 2.0,
        "weekly_target": 50,
        "start_date": start,
        "end_date": end,
        "project_status": "active"
    })
}

pub fn employee_json(id: i64, name: &str, work_type: &str, skills: &[&str]) -> Value {
    json!({ "id": id, "name": name, "work_type": work_type, "skills": skills })
}

pub fn allocation_json(id: i64, employee_id: i64, project_id: i64, hours: f64) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "project_id": project_id,
        "weekly_hours_allocated": hours,
        "weekly_tasks_allocated": 10,
        "effective_week": "2024-01-01"
    })
}

pub fn leave_json(id: i64, employee_id: i64, start: &str, end: &str, leave_type: &str) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "start_date": start,
        "end_date": end,
        "leave_type": leave_type
    })
}

/// Two projects, three employees, a few allocations and leaves.
pub fn seeded() -> FakeBackend {
    let backend = FakeBackend::new();
    backend
        .seed(
            "projects",
            vec![
                project_json(1, "Arm calibration", "2024-01-01", "2024-01-29"),
                project_json(2, "Scan labelling", "2024-03-01", "2024-03-31"),
            ],
        )
        .seed(
            "employees",
            vec![
                employee_json(10, "Ana", "full_time", &["robotics", "coding"]),
                employee_json(11, "Ben", "part_time", &["coding"]),
                employee_json(12, "Chen", "full_time", &["robotics"]),
            ],
        )
        .seed(
            "allocations",
            vec![
                allocation_json(20, 10, 1, 30.0),
                allocation_json(21, 11, 1, 10.0),
                allocation_json(22, 12, 2, 20.0),
            ],
        )
        .seed(
            "leaves",
            vec![
                leave_json(30, 10, "2024-01-10", "2024-01-12", "vacation"),
                leave_json(31, 12, "2024-01-11", "2024-01-11", "sick"),
            ],
        );
    backend
}
