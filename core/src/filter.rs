use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseFilterError;
use crate::model::{Region, Snapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    LastMinute,
    LastHour,
    LastDay,
    #[default]
    Historical,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::LastMinute,
        TimeRange::LastHour,
        TimeRange::LastDay,
        TimeRange::Historical,
    ];

    /// Width of the window, or `None` for the unbounded historical view.
    pub fn window(self) -> Option<TimeDelta> {
        match self {
            TimeRange::LastMinute => Some(TimeDelta::seconds(60)),
            TimeRange::LastHour => Some(TimeDelta::seconds(3_600)),
            TimeRange::LastDay => Some(TimeDelta::seconds(86_400)),
            TimeRange::Historical => None,
        }
    }

    /// Oldest instant still inside the window when evaluated at `now`.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window()
            .map(|window| now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::LastMinute => "last-minute",
            TimeRange::LastHour => "last-hour",
            TimeRange::LastDay => "last-day",
            TimeRange::Historical => "historical",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s.trim())
            .ok_or_else(|| ParseFilterError::TimeRange(s.to_string()))
    }
}

/// Series rendered by the trend chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    #[default]
    ActiveUsers,
    Revenue,
    ChurnRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::ActiveUsers,
        MetricKind::Revenue,
        MetricKind::ChurnRate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::ActiveUsers => "activeUsers",
            MetricKind::Revenue => "revenue",
            MetricKind::ChurnRate => "churnRate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::ActiveUsers => "Active users",
            MetricKind::Revenue => "Revenue",
            MetricKind::ChurnRate => "Churn rate",
        }
    }

    /// Raw value of this metric in `snapshot`.
    pub fn value_of(self, snapshot: &Snapshot) -> f64 {
        match self {
            MetricKind::ActiveUsers => snapshot.active_users as f64,
            MetricKind::Revenue => snapshot.revenue,
            MetricKind::ChurnRate => snapshot.churn_rate,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s.trim())
            .ok_or_else(|| ParseFilterError::Metric(s.to_string()))
    }
}

/// Region the KPI cards report active users for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn active_users(self, snapshot: &Snapshot) -> u64 {
        match self {
            RegionFilter::All => snapshot.active_users,
            RegionFilter::Only(region) => snapshot.by_region.get(region),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("all"),
            RegionFilter::Only(region) => write!(f, "{region}"),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        s.parse().map(RegionFilter::Only)
    }
}

impl TryFrom<String> for RegionFilter {
    type Error = ParseFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionFilter> for String {
    fn from(value: RegionFilter) -> Self {
        value.to_string()
    }
}

impl From<Region> for RegionFilter {
    fn from(region: Region) -> Self {
        RegionFilter::Only(region)
    }
}

/// Active view configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilters {
    pub time_range: TimeRange,
    pub metric: MetricKind,
    pub region: RegionFilter,
}

impl DashboardFilters {
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(time_range) = update.time_range {
            self.time_range = time_range;
        }
        if let Some(metric) = update.metric {
            self.metric = metric;
        }
        if let Some(region) = update.region {
            self.region = region;
        }
    }
}

/// Partial filter change; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub time_range: Option<TimeRange>,
    pub metric: Option<MetricKind>,
    pub region: Option<RegionFilter>,
}

impl FilterUpdate {
    pub fn time_range(time_range: TimeRange) -> Self {
        Self {
            time_range: Some(time_range),
            ..Self::default()
        }
    }

    pub fn metric(metric: MetricKind) -> Self {
        Self {
            metric: Some(metric),
            ..Self::default()
        }
    }

    pub fn region(region: impl Into<RegionFilter>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }
}

/// Number of leading entries of `samples` that fall inside `range` at `now`.
///
/// `samples` must be sorted descending by instant, which makes the in-window
/// entries a prefix.
pub fn visible_prefix_len(samples: &[Snapshot], range: TimeRange, now: DateTime<Utc>) -> usize {
    match range.cutoff(now) {
        None => samples.len(),
        Some(cutoff) => samples.partition_point(|sample| sample.timestamp.instant() >= cutoff),
    }
}
