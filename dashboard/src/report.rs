use chrono::{DateTime, Utc};
use dashboard_core::{
    ChartSeries, KpiSummary, MetricsStore, StoreStatus, Trend, views::format_percentage,
};
use log::{info, warn};

/// What the dashboard would render for one frame.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub status: StoreStatus,
    pub kpis: Option<KpiSummary>,
    pub chart: ChartSeries,
    pub table: TableSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub rows_on_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl DashboardReport {
    pub fn from_store(store: &MetricsStore, page_size: usize) -> Self {
        let page = store.paginate(1, page_size);
        Self {
            status: store.status().clone(),
            kpis: KpiSummary::from_store(store),
            chart: ChartSeries::from_store(store),
            table: TableSummary {
                rows_on_page: page.items.len(),
                total_pages: page.total_pages,
                total_items: page.total_items,
            },
        }
    }

    pub fn status_line(&self) -> String {
        let updated = self
            .status
            .last_updated
            .map(|at: DateTime<Utc>| at.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        let loading = if self.status.loading { " (loading)" } else { "" };
        format!("last updated {updated}{loading}")
    }

    pub fn kpi_line(&self) -> Option<String> {
        self.kpis.as_ref().map(|kpis| {
            format!(
                "{} | active users [{}] {:.0}{} | new users {:.0}{} | revenue ${:.2}{} | churn {}{} ({:?})",
                kpis.timestamp,
                kpis.region,
                kpis.active_users.value,
                arrow(kpis.active_users.trend),
                kpis.new_users.value,
                arrow(kpis.new_users.trend),
                kpis.revenue.value,
                arrow(kpis.revenue.trend),
                format_percentage(kpis.churn_rate.value),
                arrow(kpis.churn_rate.trend),
                kpis.churn_level,
            )
        })
    }

    pub fn chart_line(&self) -> String {
        match self.chart.min_max() {
            Some((lo, hi)) => format!(
                "{} chart: {} points, range {lo:.2}..{hi:.2}",
                self.chart.metric.label(),
                self.chart.points.len()
            ),
            None => format!("{} chart: no data in window", self.chart.metric.label()),
        }
    }

    pub fn table_line(&self) -> String {
        format!(
            "table: {} rows on page 1 of {} ({} samples)",
            self.table.rows_on_page, self.table.total_pages, self.table.total_items
        )
    }

    pub fn log(&self) {
        info!("{}", self.status_line());
        if let Some(error) = &self.status.last_error {
            warn!("last fetch failed: {error}");
        }
        match self.kpi_line() {
            Some(line) => info!("{line}"),
            None => info!("no samples in the selected window"),
        }
        info!("{}", self.chart_line());
        info!("{}", self.table_line());
    }
}

fn arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => " ↑",
        Trend::Down => " ↓",
        Trend::Neutral => "",
    }
}
