pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod validation;

use crate::api::{ApiClient, Transport};
use crate::config::Config;
use crate::error::AppResult;
use crate::repositories::{AllocationsRepo, EmployeesRepo, LeavesRepo, ProjectsRepo};
use std::sync::Arc;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub projects: Arc<ProjectsRepo>,
    pub employees: Arc<EmployeesRepo>,
    pub allocations: Arc<AllocationsRepo>,
    pub leaves: Arc<LeavesRepo>,
}

impl AppState {
    /// State backed by the real HTTP backend at `config.api_base_url`.
    pub fn new(config: Config) -> AppResult<Self> {
        let api = ApiClient::http(&config.api()?)?;
        Ok(Self::with_client(config, api))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self::with_client(config, ApiClient::new(transport))
    }

    fn with_client(config: Config, api: ApiClient) -> Self {
        let cache = config.cache();
        Self {
            projects: Arc::new(ProjectsRepo::new(api.clone(), &cache)),
            employees: Arc::new(EmployeesRepo::new(api.clone(), &cache)),
            allocations: Arc::new(AllocationsRepo::new(api.clone(), &cache)),
            leaves: Arc::new(LeavesRepo::new(api.clone(), &cache)),
            api,
            config: Arc::new(config),
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = match logging.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout is reserved for command output
    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
