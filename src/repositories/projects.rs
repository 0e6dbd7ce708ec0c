use std::sync::Arc;
use tracing::info;

use super::ResourceStore;
use crate::api::{ApiClient, endpoints};
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::AppResult;
use crate::models::{NewProject, Project, ProjectType};

pub struct ProjectsRepo {
    store: ResourceStore<Project>,
}

impl ProjectsRepo {
    pub fn new(api: ApiClient, config: &CacheConfig) -> Self {
        Self {
            store: ResourceStore::new(api, "projects", endpoints::PROJECTS, config),
        }
    }

    pub async fn list(&self) -> AppResult<Arc<Vec<Project>>> {
        self.store.list().await
    }

    pub async fn refresh(&self) -> AppResult<Arc<Vec<Project>>> {
        self.store.refresh().await
    }

    pub async fn find(&self, project_id: i64) -> AppResult<Option<Project>> {
        self.store.find(project_id).await
    }

    pub async fn fetch(&self, project_id: i64) -> AppResult<Option<Project>> {
        self.store.fetch(&endpoints::project_by_id(project_id)).await
    }

    pub async fn list_by_type(&self, project_type: ProjectType) -> AppResult<Vec<Project>> {
        let projects = self.list().await?;
        Ok(projects
            .iter()
            .filter(|p| p.project_type == project_type)
            .cloned()
            .collect())
    }

    pub async fn create(&self, new_project: &NewProject) -> AppResult<Project> {
        let created: Project = self
            .store
            .api()
            .post(endpoints::PROJECTS, new_project)
            .await?;
        self.store.invalidate().await;
        info!(project_id = created.id, name = %created.name, "Project created");
        Ok(created)
    }

    pub async fn update(&self, project_id: i64, changes: &NewProject) -> AppResult<Project> {
        let updated: Project = self
            .store
            .api()
            .put(&endpoints::project_by_id(project_id), changes)
            .await?;
        self.store.invalidate().await;
        info!(project_id, "Project updated");
        Ok(updated)
    }

    pub async fn delete(&self, project_id: i64) -> AppResult<()> {
        self.store
            .api()
            .delete(&endpoints::project_by_id(project_id))
            .await?;
        self.store.invalidate().await;
        info!(project_id, "Project deleted");
        Ok(())
    }

    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.store.stats().await
    }
}
