use tracing::info;

use crate::{
    AppState,
    engine::{LeaveImpact, leave_impact},
    error::{AppError, AppResult},
    models::Leave,
    services::context::RequestContext,
    validation::LeaveForm,
};

pub struct LeavesService;

impl LeavesService {
    pub async fn list(state: &AppState, employee_id: Option<i64>) -> AppResult<Vec<Leave>> {
        match employee_id {
            Some(id) => state.leaves.by_employee(id).await,
            None => Ok(state.leaves.list().await?.to_vec()),
        }
    }

    pub async fn create(
        state: &AppState,
        ctx: &RequestContext,
        form: LeaveForm,
    ) -> AppResult<Leave> {
        let new_leave = form.into_new_leave()?;
        let leave = state.leaves.create(&new_leave).await?;
        info!(
            correlation_id = %ctx.correlation_id,
            leave_id = leave.id,
            "Leave recorded"
        );
        Ok(leave)
    }

    pub async fn update(
        state: &AppState,
        ctx: &RequestContext,
        leave_id: i64,
        form: LeaveForm,
    ) -> AppResult<Leave> {
        let changes = form.into_new_leave()?;
        let leave = state.leaves.update(leave_id, &changes).await?;
        info!(correlation_id = %ctx.correlation_id, leave_id, "Leave changed");
        Ok(leave)
    }

    pub async fn delete(state: &AppState, leave_id: i64) -> AppResult<()> {
        state.leaves.delete(leave_id).await
    }

    /// Schedule impact of an existing leave.
    pub async fn impact(state: &AppState, leave_id: i64) -> AppResult<LeaveImpact> {
        let leave = state
            .leaves
            .find(leave_id)
            .await?
            .ok_or_else(|| AppError::not_found("leave"))?;
        Self::impact_of(state, &leave).await
    }

    /// Impact of any leave, stored or not.
    pub async fn impact_of(state: &AppState, leave: &Leave) -> AppResult<LeaveImpact> {
        let employees = state.employees.list().await?;
        let allocations = state.allocations.list().await?;
        let projects = state.projects.list().await?;
        let leaves = state.leaves.list().await?;

        Ok(leave_impact(
            leave,
            &employees,
            &allocations,
            &projects,
            &leaves,
        ))
    }
}
