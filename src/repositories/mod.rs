pub mod allocations;
pub mod employees;
pub mod leaves;
pub mod projects;

pub use allocations::AllocationsRepo;
pub use employees::EmployeesRepo;
pub use leaves::LeavesRepo;
pub use projects::ProjectsRepo;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::{CacheStats, CollectionCache};
use crate::config::CacheConfig;
use crate::error::AppResult;
use crate::models::Identified;

/// The cached collection behind one entity repository.
///
/// Reads go through the cache; writes are done by the owning repository,
/// which calls [`ResourceStore::invalidate`] afterwards.
pub struct ResourceStore<T> {
    api: ApiClient,
    collection_path: &'static str,
    cache: CollectionCache<T>,
}

impl<T> ResourceStore<T>
where
    T: DeserializeOwned + Identified + Clone + Send + Sync,
{
    pub fn new(
        api: ApiClient,
        name: &'static str,
        collection_path: &'static str,
        config: &CacheConfig,
    ) -> Self {
        Self {
            api,
            collection_path,
            cache: CollectionCache::new(name, config),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self) -> AppResult<Arc<Vec<T>>> {
        let api = &self.api;
        let path = self.collection_path;
        self.cache.get_or_load(|| api.get::<Vec<T>>(path)).await
    }

    pub async fn refresh(&self) -> AppResult<Arc<Vec<T>>> {
        let api = &self.api;
        let path = self.collection_path;
        self.cache.load(|| api.get::<Vec<T>>(path)).await
    }

    /// Lookup in the cached collection; a missing id is `None`, not an error.
    pub async fn find(&self, id: i64) -> AppResult<Option<T>> {
        let items = self.list().await?;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    /// Direct GET of a single entity, bypassing the cache. 404 maps to `None`.
    pub async fn fetch(&self, path: &str) -> AppResult<Option<T>> {
        match self.api.get::<T>(path).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
