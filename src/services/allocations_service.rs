use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    AppState,
    engine::{
        self, EmployeeMetrics, UnderAllocationCheck, Warning, check_productivity_mismatch,
        check_project_under_allocation, generate_allocation_warnings, under_allocation_warning,
    },
    error::{AppError, AppResult},
    models::{Allocation, NewAllocation},
    services::context::RequestContext,
};

/// One employee line of an allocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub employee_id: i64,
    pub weekly_hours_allocated: f64,
    #[serde(default)]
    pub weekly_tasks_allocated: i64,
    #[serde(default)]
    pub productivity_override: Option<f64>,
}

/// Several employees allocated to one project in a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub project_id: i64,
    /// Defaults to the context date when absent.
    #[serde(default)]
    pub effective_week: Option<NaiveDate>,
    pub entries: Vec<AllocationEntry>,
}

impl AllocationRequest {
    pub fn drafts(&self, ctx: &RequestContext) -> Vec<NewAllocation> {
        let effective_week = self.effective_week.unwrap_or(ctx.today);
        self.entries
            .iter()
            .map(|entry| NewAllocation {
                employee_id: entry.employee_id,
                project_id: self.project_id,
                weekly_hours_allocated: entry.weekly_hours_allocated,
                weekly_tasks_allocated: entry.weekly_tasks_allocated,
                productivity_override: entry.productivity_override,
                effective_week,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeePreview {
    pub employee_id: i64,
    pub employee_name: String,
    /// Current load, before the proposed hours are added.
    pub metrics: EmployeeMetrics,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationPreview {
    pub project_id: i64,
    pub project_name: String,
    /// Entries whose employee is not in the loaded list are left out.
    pub employees: Vec<EmployeePreview>,
    /// Under-allocation check including the proposed hours.
    pub allocation_check: UnderAllocationCheck,
    pub project_warning: Option<Warning>,
}

impl AllocationPreview {
    pub fn has_warnings(&self) -> bool {
        self.project_warning.is_some() || self.employees.iter().any(|e| !e.warnings.is_empty())
    }
}

pub struct AllocationsService;

impl AllocationsService {
    /// Computes every advisory for the request without sending anything.
    /// Warnings never block; the caller decides whether to submit.
    pub async fn preview(
        state: &AppState,
        ctx: &RequestContext,
        request: &AllocationRequest,
    ) -> AppResult<AllocationPreview> {
        let project = state
            .projects
            .find(request.project_id)
            .await?
            .ok_or_else(|| AppError::not_found("project"))?;
        let employees = state.employees.list().await?;
        let allocations = state.allocations.list().await?;
        let leaves = state.leaves.list().await?;

        let drafts = request.drafts(ctx);
        let mut previews = Vec::with_capacity(drafts.len());

        for draft in &drafts {
            // may be missing from a stale list; the backend still gets the draft
            let Some(employee) = employees.iter().find(|e| e.id == draft.employee_id) else {
                debug!(employee_id = draft.employee_id, "Skipping preview of unknown employee");
                continue;
            };
            let employee_leaves: Vec<_> = leaves
                .iter()
                .filter(|l| l.employee_id == employee.id)
                .cloned()
                .collect();

            let mut warnings = generate_allocation_warnings(
                employee,
                draft,
                &project,
                &allocations,
                &employee_leaves,
            );
            warnings.extend(check_productivity_mismatch(draft, &project));

            previews.push(EmployeePreview {
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                metrics: engine::employee_metrics(employee, &allocations),
                warnings,
            });
        }

        let mut combined: Vec<Allocation> = allocations
            .iter()
            .filter(|a| a.project_id == project.id)
            .cloned()
            .collect();
        combined.extend(drafts.iter().map(pending));
        let allocation_check = check_project_under_allocation(&project, &combined);
        let project_warning = under_allocation_warning(&allocation_check);

        Ok(AllocationPreview {
            project_id: project.id,
            project_name: project.name,
            employees: previews,
            allocation_check,
            project_warning,
        })
    }

    pub async fn create(
        state: &AppState,
        ctx: &RequestContext,
        request: &AllocationRequest,
    ) -> AppResult<Vec<Allocation>> {
        if request.entries.is_empty() {
            return Err(AppError::validation(
                [(
                    "entries".to_string(),
                    "Select at least one employee".to_string(),
                )]
                .into_iter()
                .collect(),
            ));
        }

        let drafts = request.drafts(ctx);
        match state.allocations.create_batch(&drafts).await {
            Ok(created) => {
                info!(
                    correlation_id = %ctx.correlation_id,
                    project_id = request.project_id,
                    count = created.len(),
                    "Allocations submitted"
                );
                Ok(created)
            }
            Err(e) => {
                warn!(
                    correlation_id = %ctx.correlation_id,
                    project_id = request.project_id,
                    error = %e,
                    "Allocation submission failed"
                );
                Err(e)
            }
        }
    }

    pub async fn delete(state: &AppState, allocation_id: i64) -> AppResult<()> {
        state.allocations.delete(allocation_id).await
    }
}

// Stand-in for a draft that has no backend id yet.
fn pending(draft: &NewAllocation) -> Allocation {
    Allocation {
        id: 0,
        employee_id: draft.employee_id,
        project_id: draft.project_id,
        weekly_hours_allocated: draft.weekly_hours_allocated,
        weekly_tasks_allocated: draft.weekly_tasks_allocated,
        productivity_override: draft.productivity_override,
        effective_week: draft.effective_week,
    }
}
