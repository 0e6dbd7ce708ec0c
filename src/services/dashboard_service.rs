use serde::Serialize;

use crate::{
    AppState, error::AppResult, models::Leave, services::context::RequestContext,
};

/// Upcoming leaves are those starting within this many days.
pub const UPCOMING_LEAVE_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_employees: usize,
    pub total_allocations: usize,
    pub active_leaves: Vec<Leave>,
    pub upcoming_leaves: Vec<Leave>,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn summary(state: &AppState, ctx: &RequestContext) -> AppResult<DashboardSummary> {
        let (projects, employees, allocations, leaves) = tokio::try_join!(
            state.projects.list(),
            state.employees.list(),
            state.allocations.list(),
            state.leaves.list(),
        )?;

        Ok(DashboardSummary {
            total_projects: projects.len(),
            active_projects: projects.iter().filter(|p| p.is_active()).count(),
            total_employees: employees.len(),
            total_allocations: allocations.len(),
            active_leaves: crate::engine::active_leaves(&leaves, ctx.today)
                .into_iter()
                .cloned()
                .collect(),
            upcoming_leaves: crate::engine::upcoming_leaves(
                &leaves,
                ctx.today,
                UPCOMING_LEAVE_DAYS,
            )
            .into_iter()
            .cloned()
            .collect(),
        })
    }
}
