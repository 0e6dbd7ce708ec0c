use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::ResourceStore;
use crate::api::{ApiClient, endpoints};
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::engine;
use crate::error::AppResult;
use crate::models::{Employee, Leave, NewEmployee};

pub struct EmployeesRepo {
    store: ResourceStore<Employee>,
}

impl EmployeesRepo {
    pub fn new(api: ApiClient, config: &CacheConfig) -> Self {
        Self {
            store: ResourceStore::new(api, "employees", endpoints::EMPLOYEES, config),
        }
    }

    pub async fn list(&self) -> AppResult<Arc<Vec<Employee>>> {
        self.store.list().await
    }

    pub async fn refresh(&self) -> AppResult<Arc<Vec<Employee>>> {
        self.store.refresh().await
    }

    pub async fn find(&self, employee_id: i64) -> AppResult<Option<Employee>> {
        self.store.find(employee_id).await
    }

    pub async fn fetch(&self, employee_id: i64) -> AppResult<Option<Employee>> {
        self.store
            .fetch(&endpoints::employee_by_id(employee_id))
            .await
    }

    pub async fn filter_by_skills<R: AsRef<str>>(
        &self,
        required_skills: &[R],
    ) -> AppResult<Vec<Employee>> {
        let employees = self.list().await?;
        Ok(engine::filter_by_skills(&employees, required_skills)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Employees not on leave on `date`, given the leaves already loaded.
    pub async fn available_on(&self, leaves: &[Leave], date: NaiveDate) -> AppResult<Vec<Employee>> {
        let employees = self.list().await?;
        Ok(engine::available_on(&employees, leaves, date)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn create(&self, new_employee: &NewEmployee) -> AppResult<Employee> {
        let created: Employee = self
            .store
            .api()
            .post(endpoints::EMPLOYEES, new_employee)
            .await?;
        self.store.invalidate().await;
        info!(employee_id = created.id, "Employee created");
        Ok(created)
    }

    pub async fn update(&self, employee_id: i64, changes: &NewEmployee) -> AppResult<Employee> {
        let updated: Employee = self
            .store
            .api()
            .put(&endpoints::employee_by_id(employee_id), changes)
            .await?;
        self.store.invalidate().await;
        Ok(updated)
    }

    pub async fn delete(&self, employee_id: i64) -> AppResult<()> {
        self.store
            .api()
            .delete(&endpoints::employee_by_id(employee_id))
            .await?;
        self.store.invalidate().await;
        info!(employee_id, "Employee deleted");
        Ok(())
    }

    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.store.stats().await
    }
}
