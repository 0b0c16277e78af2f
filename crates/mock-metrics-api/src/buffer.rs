use std::collections::VecDeque;
use std::sync::Arc;

use dashboard_core::Snapshot;
use tokio::sync::RwLock;

/// Bounded, insertion-ordered sample history. Once `capacity` samples are
/// held, each push evicts the oldest.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    inner: Arc<RwLock<VecDeque<Snapshot>>>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub async fn push(&self, sample: Snapshot) {
        let mut samples = self.inner.write().await;
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(sample);
    }

    /// Appends `batch` oldest first.
    pub async fn extend(&self, batch: impl IntoIterator<Item = Snapshot>) {
        let mut samples = self.inner.write().await;
        for sample in batch {
            if samples.len() == self.capacity {
                samples.pop_front();
            }
            samples.push_back(sample);
        }
    }

    /// Up to `count` of the most recent samples, newest first.
    pub async fn latest(&self, count: usize) -> Vec<Snapshot> {
        self.inner
            .read()
            .await
            .iter()
            .rev()
            .take(count)
            .cloned()
            .collect()
    }

    pub async fn newest(&self) -> Option<Snapshot> {
        self.inner.read().await.back().cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
