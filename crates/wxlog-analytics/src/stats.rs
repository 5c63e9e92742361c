//! Pure aggregation over readings. Null temperatures never count.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wxlog_weather::Reading;

/// Mean, min and max over a set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeStats {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub count: usize,
}

/// Statistics for one calendar date (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighLow {
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl HighLow {
    pub fn is_empty(&self) -> bool {
        self.high.is_none() || self.low.is_none()
    }
}

/// Running accumulator shared by the range and per-day paths.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl Accumulator {
    fn new(first: f64) -> Self {
        Self {
            sum: first,
            min: first,
            max: first,
            count: 1,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn temperatures(readings: &[Reading]) -> impl Iterator<Item = f64> + '_ {
    readings.iter().filter_map(|r| r.temp_c)
}

fn accumulate(readings: &[Reading]) -> Option<Accumulator> {
    let mut acc: Option<Accumulator> = None;
    for t in temperatures(readings) {
        match acc.as_mut() {
            Some(a) => a.push(t),
            None => acc = Some(Accumulator::new(t)),
        }
    }
    acc
}

/// Aggregate every temperature-bearing reading in `readings`.
pub fn range_stats(readings: &[Reading]) -> RangeStats {
    match accumulate(readings) {
        Some(a) => RangeStats {
            mean: Some(a.mean()),
            min: Some(a.min),
            max: Some(a.max),
            count: a.count,
        },
        None => {
            tracing::warn!("No data to compute stats");
            RangeStats::default()
        }
    }
}

/// Group readings by UTC date, ascending. Dates with only null
/// temperatures produce no entry.
pub fn daily_stats(readings: &[Reading]) -> Vec<DailyStat> {
    let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

    for r in readings {
        let Some(t) = r.temp_c else { continue };
        by_date
            .entry(r.time.date_naive())
            .and_modify(|a| a.push(t))
            .or_insert_with(|| Accumulator::new(t));
    }

    if by_date.is_empty() {
        tracing::warn!("No data for daily stats");
        return Vec::new();
    }

    let stats: Vec<DailyStat> = by_date
        .into_iter()
        .map(|(date, a)| DailyStat {
            date,
            avg_temp_c: a.mean(),
            min_temp_c: a.min,
            max_temp_c: a.max,
            count: a.count,
        })
        .collect();

    tracing::info!("Computed daily stats for {} days", stats.len());
    stats
}

pub fn weekly_high_low(readings: &[Reading]) -> HighLow {
    match accumulate(readings) {
        Some(a) => HighLow {
            high: Some(a.max),
            low: Some(a.min),
        },
        None => {
            tracing::warn!("No data for weekly high/low");
            HighLow::default()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts WARN events emitted while it is the active subscriber.
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn warnings_during(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    fn r(d: u32, h: u32, temp_c: Option<f64>) -> Reading {
        Reading::new(Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap(), temp_c)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_range_stats_skips_nulls() {
        let stats = range_stats(&[r(1, 0, None), r(1, 1, Some(2.0)), r(1, 2, None)]);
        assert_eq!(
            stats,
            RangeStats {
                mean: Some(2.0),
                min: Some(2.0),
                max: Some(2.0),
                count: 1,
            }
        );
    }

    #[test]
    fn test_range_stats_empty() {
        assert_eq!(range_stats(&[]), RangeStats::default());
        assert_eq!(range_stats(&[r(1, 0, None)]).count, 0);
    }

    #[test]
    fn test_range_stats_values() {
        let stats = range_stats(&[r(1, 0, Some(-3.0)), r(1, 1, Some(1.0)), r(1, 2, Some(5.0))]);
        assert_eq!(stats.mean, Some(1.0));
        assert_eq!(stats.min, Some(-3.0));
        assert_eq!(stats.max, Some(5.0));
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_daily_stats_groups_by_date() {
        let stats = daily_stats(&[
            r(1, 0, Some(1.0)),
            r(1, 1, Some(2.5)),
            r(2, 0, Some(-0.5)),
        ]);

        assert_eq!(
            stats,
            vec![
                DailyStat {
                    date: date(1),
                    avg_temp_c: 1.75,
                    min_temp_c: 1.0,
                    max_temp_c: 2.5,
                    count: 2,
                },
                DailyStat {
                    date: date(2),
                    avg_temp_c: -0.5,
                    min_temp_c: -0.5,
                    max_temp_c: -0.5,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_daily_stats_sorted_and_null_days_dropped() {
        let stats = daily_stats(&[
            r(3, 5, Some(4.0)),
            r(2, 0, None),
            r(1, 23, Some(2.0)),
        ]);

        let dates: Vec<_> = stats.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date(1), date(3)]);
    }

    #[test]
    fn test_daily_stats_empty() {
        assert!(daily_stats(&[]).is_empty());
    }

    #[test]
    fn test_empty_input_warns_once_per_call() {
        assert_eq!(warnings_during(|| assert!(weekly_high_low(&[]).is_empty())), 1);
        assert_eq!(warnings_during(|| assert_eq!(range_stats(&[]).count, 0)), 1);
        assert_eq!(warnings_during(|| assert!(daily_stats(&[]).is_empty())), 1);
        assert_eq!(warnings_during(|| assert!(!weekly_high_low(&[r(1, 0, Some(1.0))]).is_empty())), 0);
    }

    #[test]
    fn test_weekly_high_low() {
        let hl = weekly_high_low(&[r(1, 0, Some(3.0)), r(2, 0, None), r(3, 0, Some(-7.5))]);
        assert_eq!(hl.high, Some(3.0));
        assert_eq!(hl.low, Some(-7.5));
        assert!(!hl.is_empty());

        let none = weekly_high_low(&[r(1, 0, None)]);
        assert_eq!(none, HighLow::default());
        assert!(none.is_empty());
    }
}
