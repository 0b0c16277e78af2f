use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;

use crate::filter::{DashboardFilters, FilterUpdate, visible_prefix_len};
use crate::model::{Snapshot, Timestamp};
use crate::pagination::{Page, paginate};

/// Fetch status as reported by the polling side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Deduplicated, time-ordered sample buffer with a filtered view.
///
/// `samples` is kept sorted descending by instant with unique timestamps.
/// The visible set is the first `visible_len` entries and is recomputed at
/// the end of every mutation.
#[derive(Debug, Clone, Default)]
pub struct MetricsStore {
    samples: Vec<Snapshot>,
    visible_len: usize,
    filters: DashboardFilters,
    status: StoreStatus,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(filters: DashboardFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Merges `incoming` into the store, returning how many samples were new.
    pub fn merge_samples<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Snapshot>,
    {
        self.merge_samples_at(incoming, Utc::now())
    }

    pub fn merge_samples_at<I>(&mut self, incoming: I, now: DateTime<Utc>) -> usize
    where
        I: IntoIterator<Item = Snapshot>,
    {
        let mut seen: HashSet<Timestamp> = self
            .samples
            .iter()
            .map(|sample| sample.timestamp.clone())
            .collect();
        let fresh: Vec<Snapshot> = incoming
            .into_iter()
            .filter(|sample| seen.insert(sample.timestamp.clone()))
            .collect();

        let added = fresh.len();
        if added > 0 {
            self.samples.extend(fresh);
            // Stable: equal instants keep existing-then-arrival order.
            self.samples
                .sort_by(|a, b| b.timestamp.instant().cmp(&a.timestamp.instant()));
        }

        self.recompute_visible(now);
        self.status.last_updated = Some(now);
        self.status.last_error = None;

        debug!(
            "merged {added} new samples (total={}, visible={})",
            self.samples.len(),
            self.visible_len
        );
        added
    }

    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.update_filters_at(update, Utc::now());
    }

    pub fn update_filters_at(&mut self, update: FilterUpdate, now: DateTime<Utc>) {
        self.filters.apply(update);
        self.recompute_visible(now);
    }

    /// Re-evaluates the time window without new data.
    pub fn refresh(&mut self) {
        self.refresh_at(Utc::now());
    }

    pub fn refresh_at(&mut self, now: DateTime<Utc>) {
        self.recompute_visible(now);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.status.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.status.last_error = error;
        self.status.loading = false;
    }

    pub fn latest_visible(&self) -> Option<&Snapshot> {
        self.visible_samples().first()
    }

    pub fn paginate(&self, page: usize, page_size: usize) -> Page<'_, Snapshot> {
        paginate(self.visible_samples(), page, page_size)
    }

    pub fn all_samples(&self) -> &[Snapshot] {
        &self.samples
    }

    pub fn visible_samples(&self) -> &[Snapshot] {
        &self.samples[..self.visible_len]
    }

    pub fn filters(&self) -> &DashboardFilters {
        &self.filters
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn recompute_visible(&mut self, now: DateTime<Utc>) {
        self.visible_len = visible_prefix_len(&self.samples, self.filters.time_range, now);
    }
}
