pub mod error;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod shared;
pub mod store;
pub mod views;

pub use error::{ParseFilterError, TimestampError};
pub use filter::{DashboardFilters, FilterUpdate, MetricKind, RegionFilter, TimeRange};
pub use model::{Region, RegionBreakdown, Snapshot, Timestamp};
pub use pagination::{Page, paginate};
pub use shared::SharedMetricsStore;
pub use store::{MetricsStore, StoreStatus};
pub use views::{ChartPoint, ChartSeries, ChurnLevel, KpiSummary, KpiValue, Trend};
