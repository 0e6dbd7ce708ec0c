use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::AppResult;

/// 默认缓存过期时间（秒）
const DEFAULT_TTL: u64 = 300;

struct Snapshot<T> {
    items: Arc<Vec<T>>,
    loaded_at: Instant,
}

/// 集合缓存：缓存某类实体的完整列表
///
/// A snapshot is served until it is older than the TTL or explicitly
/// invalidated. Every invalidation bumps a generation counter, and a load that
/// started before an invalidation is not stored, so a write is never
/// shadowed by a list fetched before it.
pub struct CollectionCache<T> {
    name: &'static str,
    ttl: Duration,
    state: RwLock<Option<Snapshot<T>>>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl<T> CollectionCache<T> {
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        Self {
            name,
            ttl: config.ttl,
            state: RwLock::new(None),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn with_default_ttl(name: &'static str) -> Self {
        Self::new(
            name,
            &CacheConfig {
                ttl: Duration::from_secs(DEFAULT_TTL),
            },
        )
    }

    /// 获取未过期的缓存内容
    pub async fn get(&self) -> Option<Arc<Vec<T>>> {
        let state = self.state.read().await;
        match state.as_ref() {
            Some(snapshot) if snapshot.loaded_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(cache = self.name, items = snapshot.items.len(), "Cache hit");
                Some(Arc::clone(&snapshot.items))
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(cache = self.name, "Cache miss");
                None
            }
        }
    }

    /// Last stored snapshot regardless of age. Does not touch the statistics.
    pub async fn peek(&self) -> Option<Arc<Vec<T>>> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.items))
    }

    pub async fn put(&self, items: Vec<T>) -> Arc<Vec<T>> {
        let items = Arc::new(items);
        *self.state.write().await = Some(Snapshot {
            items: Arc::clone(&items),
            loaded_at: Instant::now(),
        });
        items
    }

    /// Returns the cached collection, loading it through `loader` on a miss.
    pub async fn get_or_load<F, Fut>(&self, loader: F) -> AppResult<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        if let Some(items) = self.get().await {
            return Ok(items);
        }
        self.load(loader).await
    }

    /// Loads unconditionally and stores the result unless an invalidation
    /// happened meanwhile.
    pub async fn load<F, Fut>(&self, loader: F) -> AppResult<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        let generation = self.generation.load(Ordering::Acquire);
        let items = Arc::new(loader().await?);

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::Acquire) == generation {
            *state = Some(Snapshot {
                items: Arc::clone(&items),
                loaded_at: Instant::now(),
            });
        } else {
            debug!(cache = self.name, "Discarding load that raced an invalidation");
        }
        Ok(items)
    }

    /// 删除缓存内容
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        *state = None;
        debug!(cache = self.name, "Cache invalidated");
    }

    /// 获取缓存统计信息
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        CacheStats {
            name: self.name.to_string(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            cached_items: state.as_ref().map(|s| s.items.len()),
            age_secs: state.as_ref().map(|s| s.loaded_at.elapsed().as_secs()),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub name: String,
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub cached_items: Option<usize>,
    pub age_secs: Option<u64>,
}
