use serde::Serialize;
use tracing::info;

use crate::{
    AppState,
    engine::{
        self, ProjectRequirements, UnderAllocationCheck, Warning, check_project_under_allocation,
        under_allocation_warning,
    },
    error::{AppError, AppResult},
    models::{Allocation, Project, ProjectType},
    services::context::RequestContext,
    validation::ProjectForm,
};

/// Staffing overview of a single project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub project: Project,
    pub requirements: ProjectRequirements,
    pub allocation_check: UnderAllocationCheck,
    pub warning: Option<Warning>,
    pub allocations: Vec<Allocation>,
}

pub struct ProjectsService;

impl ProjectsService {
    pub async fn list(
        state: &AppState,
        type_filter: Option<ProjectType>,
    ) -> AppResult<Vec<Project>> {
        match type_filter {
            Some(project_type) => state.projects.list_by_type(project_type).await,
            None => Ok(state.projects.list().await?.to_vec()),
        }
    }

    pub async fn get(state: &AppState, project_id: i64) -> AppResult<Project> {
        state
            .projects
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("project"))
    }

    pub async fn create(
        state: &AppState,
        ctx: &RequestContext,
        form: ProjectForm,
    ) -> AppResult<Project> {
        let new_project = form.into_new_project()?;
        let project = state.projects.create(&new_project).await?;
        info!(
            correlation_id = %ctx.correlation_id,
            project_id = project.id,
            "Project registered"
        );
        Ok(project)
    }

    /// The backend decides whether the project exists; a 404 comes back as
    /// [`AppError::Api`].
    pub async fn delete(state: &AppState, project_id: i64) -> AppResult<()> {
        state.projects.delete(project_id).await?;
        // the backend drops the project's allocations with it
        state.allocations.invalidate().await;
        Ok(())
    }

    pub async fn report(state: &AppState, project_id: i64) -> AppResult<ProjectReport> {
        let project = Self::get(state, project_id).await?;
        let allocations = state.allocations.for_project(project_id).await?;

        let requirements = engine::project_requirements(&project);
        let allocation_check = check_project_under_allocation(&project, &allocations);
        let warning = under_allocation_warning(&allocation_check);

        Ok(ProjectReport {
            project,
            requirements,
            allocation_check,
            warning,
            allocations,
        })
    }
}
