use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, warn};

use super::ResourceStore;
use crate::api::{ApiClient, endpoints};
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Allocation, AllocationUpdate, NewAllocation};
use crate::validation::ensure_valid;

pub struct AllocationsRepo {
    store: ResourceStore<Allocation>,
}

impl AllocationsRepo {
    pub fn new(api: ApiClient, config: &CacheConfig) -> Self {
        Self {
            store: ResourceStore::new(api, "allocations", endpoints::ALLOCATIONS, config),
        }
    }

    pub async fn list(&self) -> AppResult<Arc<Vec<Allocation>>> {
        self.store.list().await
    }

    pub async fn refresh(&self) -> AppResult<Arc<Vec<Allocation>>> {
        self.store.refresh().await
    }

    pub async fn find(&self, allocation_id: i64) -> AppResult<Option<Allocation>> {
        self.store.find(allocation_id).await
    }

    pub async fn fetch(&self, allocation_id: i64) -> AppResult<Option<Allocation>> {
        self.store
            .fetch(&endpoints::allocation_by_id(allocation_id))
            .await
    }

    /// Server-side filter, not cached.
    pub async fn by_project(&self, project_id: i64) -> AppResult<Vec<Allocation>> {
        self.store
            .api()
            .get(&endpoints::allocations_by_project(project_id))
            .await
    }

    /// Server-side filter, not cached.
    pub async fn by_employee(&self, employee_id: i64) -> AppResult<Vec<Allocation>> {
        self.store
            .api()
            .get(&endpoints::allocations_by_employee(employee_id))
            .await
    }

    pub async fn for_project(&self, project_id: i64) -> AppResult<Vec<Allocation>> {
        let allocations = self.list().await?;
        Ok(allocations
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }

    pub async fn for_employee(&self, employee_id: i64) -> AppResult<Vec<Allocation>> {
        let allocations = self.list().await?;
        Ok(allocations
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }

    pub async fn create(&self, allocation: &NewAllocation) -> AppResult<Allocation> {
        ensure_valid(allocation)?;
        let created: Allocation = self
            .store
            .api()
            .post(endpoints::ALLOCATIONS, allocation)
            .await?;
        self.store.invalidate().await;
        info!(
            allocation_id = created.id,
            employee_id = created.employee_id,
            project_id = created.project_id,
            "Allocation created"
        );
        Ok(created)
    }

    /// Submits every draft as an independent POST, all in flight at once.
    ///
    /// Drafts are validated first and nothing is sent if any of them fails.
    /// The first backend rejection is returned; allocations that were already
    /// accepted stay in place. The cache is invalidated either way.
    pub async fn create_batch(&self, drafts: &[NewAllocation]) -> AppResult<Vec<Allocation>> {
        for draft in drafts {
            ensure_valid(draft)?;
        }
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let api = self.store.api();
        let result = try_join_all(
            drafts
                .iter()
                .map(|draft| api.post::<_, Allocation>(endpoints::ALLOCATIONS, draft)),
        )
        .await;
        self.store.invalidate().await;

        match result {
            Ok(created) => {
                info!(count = created.len(), "Allocation batch created");
                Ok(created)
            }
            Err(e) => {
                warn!(drafts = drafts.len(), error = %e, "Allocation batch partially rejected");
                Err(e)
            }
        }
    }

    pub async fn update(
        &self,
        allocation_id: i64,
        changes: &AllocationUpdate,
    ) -> AppResult<Allocation> {
        if changes.is_empty() {
            return Err(AppError::internal("No fields to update"));
        }
        let updated: Allocation = self
            .store
            .api()
            .put(&endpoints::allocation_by_id(allocation_id), changes)
            .await?;
        self.store.invalidate().await;
        info!(allocation_id, "Allocation updated");
        Ok(updated)
    }

    pub async fn delete(&self, allocation_id: i64) -> AppResult<()> {
        self.store
            .api()
            .delete(&endpoints::allocation_by_id(allocation_id))
            .await?;
        self.store.invalidate().await;
        info!(allocation_id, "Allocation deleted");
        Ok(())
    }

    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.store.stats().await
    }
}
