//! Summary Calculator Module
//! Computes the four headline metrics shown above the charts.

use polars::prelude::*;

use crate::data::{unique_markets, DISTANCE_COL};

/// Headline metrics for one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub total_records: usize,
    pub unique_markets: usize,
    /// NaN when the view has no usable distance values.
    pub mean_distance: f64,
    /// NaN when the view has no usable distance values.
    pub max_distance: f64,
}

impl Default for ViewSummary {
    fn default() -> Self {
        Self {
            total_records: 0,
            unique_markets: 0,
            mean_distance: f64::NAN,
            max_distance: f64::NAN,
        }
    }
}

impl ViewSummary {
    /// Metric-card text for a distance value; empty views show a dash.
    pub fn format_distance(value: f64) -> String {
        if value.is_nan() {
            "–".to_string()
        } else {
            format!("{value:.2}")
        }
    }
}

/// Pure aggregation over a view; never panics on empty input.
pub struct SummaryCalculator;

impl SummaryCalculator {
    pub fn summarize(view: &DataFrame) -> ViewSummary {
        let total_records = view.height();
        let n_markets = unique_markets(view).len();

        let (mean_distance, max_distance) = view
            .column(DISTANCE_COL)
            .ok()
            .and_then(|col| col.f64().ok())
            .map(|ca| {
                (
                    ca.mean().unwrap_or(f64::NAN),
                    ca.max().unwrap_or(f64::NAN),
                )
            })
            .unwrap_or((f64::NAN, f64::NAN));

        ViewSummary {
            total_records,
            unique_markets: n_markets,
            mean_distance,
            max_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MARKET_COL;

    /// Scenario from the dashboard walkthrough: rows (1.0,A), (5.0,B) after
    /// filtering give count 2, two markets, mean 3.0, max 5.0.
    #[test]
    fn summarize_filtered_scenario() {
        let view = df!(
            DISTANCE_COL => &[1.0, 5.0],
            MARKET_COL => &["A", "B"],
        )
        .unwrap();

        let s = SummaryCalculator::summarize(&view);
        assert_eq!(s.total_records, 2);
        assert_eq!(s.unique_markets, 2);
        assert!((s.mean_distance - 3.0).abs() < 1e-12);
        assert!((s.max_distance - 5.0).abs() < 1e-12);
    }

    /// An empty view must produce zeros and NaNs, never a panic.
    #[test]
    fn summarize_empty_view() {
        let view = df!(
            DISTANCE_COL => &Vec::<f64>::new(),
            MARKET_COL => &Vec::<String>::new(),
        )
        .unwrap();

        let s = SummaryCalculator::summarize(&view);
        assert_eq!(s.total_records, 0);
        assert_eq!(s.unique_markets, 0);
        assert!(s.mean_distance.is_nan());
        assert!(s.max_distance.is_nan());
    }

    /// Null distances are skipped by mean/max but still count as rows.
    #[test]
    fn nulls_do_not_poison_aggregates() {
        let view = df!(
            DISTANCE_COL => &[Some(2.0), None, Some(6.0)],
            MARKET_COL => &["A", "A", "C"],
        )
        .unwrap();

        let s = SummaryCalculator::summarize(&view);
        assert_eq!(s.total_records, 3);
        assert_eq!(s.unique_markets, 2);
        assert!((s.mean_distance - 4.0).abs() < 1e-12);
        assert!((s.max_distance - 6.0).abs() < 1e-12);
    }

    #[test]
    fn nan_metrics_render_as_dash() {
        assert_eq!(ViewSummary::format_distance(f64::NAN), "–");
        assert_eq!(ViewSummary::format_distance(3.25), "3.25");
    }
}
