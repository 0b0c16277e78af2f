use chrono::{DateTime, TimeDelta, Utc};
use dashboard_core::{RegionBreakdown, Snapshot, Timestamp};
use rand::random_range;

/// Random sample stamped at `at`, with every field inside the source's
/// documented ranges.
pub fn random_snapshot(at: DateTime<Utc>) -> Snapshot {
    Snapshot {
        timestamp: Timestamp::from_instant(at),
        active_users: random_range(0..5_000),
        new_users: random_range(0..200),
        // Whole cents and tenths of a percent keep the rounding exact.
        revenue: random_range(0..1_000_000u32) as f64 / 100.0,
        churn_rate: random_range(0..150u32) as f64 / 1_000.0,
        by_region: RegionBreakdown {
            us: random_range(0..2_000),
            eu: random_range(0..1_500),
            latam: random_range(0..1_200),
            apac: random_range(0..1_000),
        },
    }
}

/// One sample per hour over the `days` preceding `now`, oldest first and
/// strictly in the past.
pub fn seed_history(now: DateTime<Utc>, days: u32) -> Vec<Snapshot> {
    let hours = i64::from(days) * 24;
    (1..=hours)
        .rev()
        .map(|hours_ago| random_snapshot(now - TimeDelta::hours(hours_ago)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn random_samples_stay_in_range() {
        let at = Utc.with_ymd_and_hms(2025, 10, 23, 12, 0, 0).unwrap();
        for _ in 0..500 {
            let s = random_snapshot(at);
            assert!(s.active_users < 5_000);
            assert!(s.new_users < 200);
            assert!((0.0..10_000.0).contains(&s.revenue));
            assert!((0.0..0.15).contains(&s.churn_rate));
            assert!(s.by_region.us < 2_000);
            assert!(s.by_region.eu < 1_500);
            assert!(s.by_region.latam < 1_200);
            assert!(s.by_region.apac < 1_000);
            s.validate().expect("generated sample is valid");
        }
    }

    #[test]
    fn timestamps_use_millisecond_utc_format() {
        let at = Utc.with_ymd_and_hms(2025, 10, 23, 12, 0, 0).unwrap();
        assert_eq!(random_snapshot(at).timestamp.as_str(), "2025-10-23T12:00:00.000Z");
    }

    #[test]
    fn history_is_hourly_oldest_first_and_in_the_past() {
        let now = Utc.with_ymd_and_hms(2025, 10, 23, 12, 30, 0).unwrap();
        let history = seed_history(now, 2);

        assert_eq!(history.len(), 48);
        assert_eq!(history[0].timestamp.instant(), now - TimeDelta::hours(48));
        assert_eq!(history[47].timestamp.instant(), now - TimeDelta::hours(1));
        assert!(
            history
                .windows(2)
                .all(|w| w[1].timestamp.instant() - w[0].timestamp.instant() == TimeDelta::hours(1))
        );
    }

    #[test]
    fn zero_days_seeds_nothing() {
        assert!(seed_history(Utc::now(), 0).is_empty());
    }
}
