//! Read-only projections of the store consumed by the KPI cards and the trend chart.

use serde::Serialize;

use crate::filter::{MetricKind, RegionFilter};
use crate::model::{Snapshot, Timestamp};
use crate::store::MetricsStore;

pub const CHURN_RATE_WARNING: f64 = 0.05;
pub const CHURN_RATE_CRITICAL: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

pub fn trend(current: f64, previous: Option<f64>) -> Trend {
    match previous {
        Some(previous) if current > previous => Trend::Up,
        Some(previous) if current < previous => Trend::Down,
        _ => Trend::Neutral,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurnLevel {
    Normal,
    Warning,
    Critical,
}

impl ChurnLevel {
    pub fn classify(churn_rate: f64) -> Self {
        if churn_rate > CHURN_RATE_CRITICAL {
            ChurnLevel::Critical
        } else if churn_rate > CHURN_RATE_WARNING {
            ChurnLevel::Warning
        } else {
            ChurnLevel::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiValue {
    pub value: f64,
    pub trend: Trend,
}

impl KpiValue {
    fn compare(current: f64, previous: Option<f64>) -> Self {
        Self {
            value: current,
            trend: trend(current, previous),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub timestamp: Timestamp,
    pub region: RegionFilter,
    pub active_users: KpiValue,
    pub new_users: KpiValue,
    pub revenue: KpiValue,
    pub churn_rate: KpiValue,
    pub churn_level: ChurnLevel,
}

impl KpiSummary {
    /// Latest visible sample compared against the one before it.
    pub fn from_store(store: &MetricsStore) -> Option<Self> {
        let visible = store.visible_samples();
        let latest = visible.first()?;
        Some(Self::compare(latest, visible.get(1), store.filters().region))
    }

    pub fn compare(latest: &Snapshot, previous: Option<&Snapshot>, region: RegionFilter) -> Self {
        let field = |f: fn(&Snapshot) -> f64| KpiValue::compare(f(latest), previous.map(f));

        Self {
            timestamp: latest.timestamp.clone(),
            region,
            active_users: KpiValue::compare(
                region.active_users(latest) as f64,
                previous.map(|p| region.active_users(p) as f64),
            ),
            new_users: field(|s| s.new_users as f64),
            revenue: field(|s| s.revenue),
            churn_rate: field(|s| s.churn_rate),
            churn_level: ChurnLevel::classify(latest.churn_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

/// Visible samples of the selected metric, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub metric: MetricKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_store(store: &MetricsStore) -> Self {
        let metric = store.filters().metric;
        Self::build(metric, store.visible_samples())
    }

    pub fn build(metric: MetricKind, newest_first: &[Snapshot]) -> Self {
        let points = newest_first
            .iter()
            .rev()
            .map(|sample| ChartPoint {
                timestamp: sample.timestamp.clone(),
                value: chart_value(metric, sample),
            })
            .collect();
        Self { metric, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Churn is charted as a percentage; everything else as-is.
fn chart_value(metric: MetricKind, sample: &Snapshot) -> f64 {
    match metric {
        MetricKind::ChurnRate => sample.churn_rate * 100.0,
        other => other.value_of(sample),
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2} %", value * 100.0)
}
