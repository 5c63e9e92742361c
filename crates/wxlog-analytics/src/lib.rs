//! Temperature statistics and chart figures built from stored readings.

pub mod charts;
pub mod stats;

pub use charts::{daily_stats_figure, weekly_high_low_figure, Figure, Trace, TraceKind};
pub use stats::{daily_stats, range_stats, weekly_high_low, DailyStat, HighLow, RangeStats};
