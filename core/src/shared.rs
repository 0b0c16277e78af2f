use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};

use crate::filter::{DashboardFilters, FilterUpdate};
use crate::model::Snapshot;
use crate::store::MetricsStore;

/// Cloneable handle to the one store created at bootstrap.
///
/// Every mutation takes the write lock for its whole duration, so readers
/// never see a filter without its recomputed view.
#[derive(Clone, Debug, Default)]
pub struct SharedMetricsStore {
    inner: Arc<RwLock<MetricsStore>>,
}

impl SharedMetricsStore {
    pub fn new(store: MetricsStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_filters(filters: DashboardFilters) -> Self {
        Self::new(MetricsStore::with_filters(filters))
    }

    pub async fn merge_samples(&self, samples: Vec<Snapshot>) -> usize {
        self.inner.write().await.merge_samples(samples)
    }

    pub async fn update_filters(&self, update: FilterUpdate) {
        self.inner.write().await.update_filters(update);
    }

    pub async fn refresh(&self) {
        self.inner.write().await.refresh();
    }

    pub async fn set_loading(&self, loading: bool) {
        self.inner.write().await.set_loading(loading);
    }

    pub async fn set_error(&self, error: Option<String>) {
        self.inner.write().await.set_error(error);
    }

    pub async fn latest_visible(&self) -> Option<Snapshot> {
        self.inner.read().await.latest_visible().cloned()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MetricsStore> {
        self.inner.read().await
    }
}
