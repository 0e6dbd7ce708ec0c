pub mod allocations_service;
pub mod context;
pub mod dashboard_service;
pub mod leaves_service;
pub mod projects_service;

pub use allocations_service::AllocationsService;
pub use context::RequestContext;
pub use dashboard_service::DashboardService;
pub use leaves_service::LeavesService;
pub use projects_service::ProjectsService;
