//! Stats module - view summaries

mod calculator;

pub use calculator::{IndicatorStats, StatsCalculator, ViewSummary};
