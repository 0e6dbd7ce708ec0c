use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::ResourceStore;
use crate::api::{ApiClient, endpoints};
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::engine;
use crate::error::AppResult;
use crate::models::{Leave, NewLeave};

pub struct LeavesRepo {
    store: ResourceStore<Leave>,
}

impl LeavesRepo {
    pub fn new(api: ApiClient, config: &CacheConfig) -> Self {
        Self {
            store: ResourceStore::new(api, "leaves", endpoints::LEAVES, config),
        }
    }

    pub async fn list(&self) -> AppResult<Arc<Vec<Leave>>> {
        self.store.list().await
    }

    pub async fn refresh(&self) -> AppResult<Arc<Vec<Leave>>> {
        self.store.refresh().await
    }

    pub async fn find(&self, leave_id: i64) -> AppResult<Option<Leave>> {
        self.store.find(leave_id).await
    }

    pub async fn fetch(&self, leave_id: i64) -> AppResult<Option<Leave>> {
        self.store.fetch(&endpoints::leave_by_id(leave_id)).await
    }

    pub async fn by_employee(&self, employee_id: i64) -> AppResult<Vec<Leave>> {
        self.store
            .api()
            .get(&endpoints::leaves_by_employee(employee_id))
            .await
    }

    pub async fn active_on(&self, date: NaiveDate) -> AppResult<Vec<Leave>> {
        let leaves = self.list().await?;
        Ok(engine::active_leaves(&leaves, date)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn upcoming(&self, today: NaiveDate, days: i64) -> AppResult<Vec<Leave>> {
        let leaves = self.list().await?;
        Ok(engine::upcoming_leaves(&leaves, today, days)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn is_employee_on_leave(&self, employee_id: i64, date: NaiveDate) -> AppResult<bool> {
        let leaves = self.list().await?;
        Ok(leaves.iter().any(|leave| {
            leave.employee_id == employee_id && leave.start_date <= date && date <= leave.end_date
        }))
    }

    pub async fn create(&self, new_leave: &NewLeave) -> AppResult<Leave> {
        let created: Leave = self.store.api().post(endpoints::LEAVES, new_leave).await?;
        self.store.invalidate().await;
        info!(
            leave_id = created.id,
            employee_id = created.employee_id,
            leave_type = %created.leave_type,
            "Leave created"
        );
        Ok(created)
    }

    pub async fn update(&self, leave_id: i64, changes: &NewLeave) -> AppResult<Leave> {
        let updated: Leave = self
            .store
            .api()
            .put(&endpoints::leave_by_id(leave_id), changes)
            .await?;
        self.store.invalidate().await;
        info!(leave_id, "Leave updated");
        Ok(updated)
    }

    pub async fn delete(&self, leave_id: i64) -> AppResult<()> {
        self.store
            .api()
            .delete(&endpoints::leave_by_id(leave_id))
            .await?;
        self.store.invalidate().await;
        info!(leave_id, "Leave deleted");
        Ok(())
    }

    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.store.stats().await
    }
}
