//! Filter Stage Module
//! Turns the current widget state into a filtered view of the dataset.

use polars::prelude::*;
use std::collections::BTreeSet;

use super::loader::{DISTANCE_COL, MARKET_COL};

/// Current filter widget state: a closed distance interval plus the set of
/// selected markets. Invariant: `distance_range.0 <= distance_range.1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub distance_range: (f64, f64),
    pub selected_markets: BTreeSet<String>,
    /// Market chosen for the targeted full-dataset export.
    pub export_market: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            distance_range: (0.0, 0.0),
            selected_markets: BTreeSet::new(),
            export_market: String::new(),
        }
    }
}

impl FilterState {
    /// Widget defaults for a freshly loaded dataset: the full distance range
    /// and every market selected.
    pub fn for_dataset(markets: &[String], bounds: Option<(f64, f64)>) -> Self {
        Self {
            distance_range: bounds.unwrap_or((0.0, 0.0)),
            selected_markets: markets.iter().cloned().collect(),
            export_market: markets.first().cloned().unwrap_or_default(),
        }
    }

    /// Clamp the range into `bounds` and restore `min <= max`.
    pub fn clamp_range(&mut self, bounds: (f64, f64)) {
        let (lo, hi) = bounds;
        self.distance_range.0 = self.distance_range.0.clamp(lo, hi);
        self.distance_range.1 = self.distance_range.1.clamp(lo, hi);
        if self.distance_range.0 > self.distance_range.1 {
            self.distance_range.1 = self.distance_range.0;
        }
    }

    /// Apply the filter, producing a fresh view. The source frame is never
    /// mutated. Null distances fail the closed interval and drop out; an
    /// empty market selection selects nothing (not everything).
    pub fn apply(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        let (lo, hi) = self.distance_range;
        let in_range = col(DISTANCE_COL)
            .gt_eq(lit(lo))
            .and(col(DISTANCE_COL).lt_eq(lit(hi)));

        let in_markets = self
            .selected_markets
            .iter()
            .fold(lit(false), |acc, market| {
                acc.or(col(MARKET_COL).eq(lit(market.as_str())))
            });

        df.clone().lazy().filter(in_range.and(in_markets)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> DataFrame {
        df!(
            DISTANCE_COL => &[1.0, 5.0, 9.0],
            MARKET_COL => &["A", "B", "A"],
        )
        .unwrap()
    }

    fn state(range: (f64, f64), markets: &[&str]) -> FilterState {
        FilterState {
            distance_range: range,
            selected_markets: markets.iter().map(|m| m.to_string()).collect(),
            export_market: String::new(),
        }
    }

    /// Range [0,6] with both markets keeps the first two rows.
    #[test]
    fn range_and_market_predicates_combine() {
        let view = state((0.0, 6.0), &["A", "B"]).apply(&anchors()).unwrap();
        assert_eq!(view.height(), 2);

        let ca = view.column(DISTANCE_COL).unwrap().f64().unwrap();
        assert_eq!(ca.get(0), Some(1.0));
        assert_eq!(ca.get(1), Some(5.0));
    }

    /// The interval is closed on both ends.
    #[test]
    fn range_bounds_are_inclusive() {
        let view = state((1.0, 9.0), &["A", "B"]).apply(&anchors()).unwrap();
        assert_eq!(view.height(), 3);
    }

    #[test]
    fn single_market_selection() {
        let view = state((0.0, 10.0), &["B"]).apply(&anchors()).unwrap();
        assert_eq!(view.height(), 1);
        let ca = view.column(DISTANCE_COL).unwrap().f64().unwrap();
        assert_eq!(ca.get(0), Some(5.0));
    }

    /// Deselecting every market hides everything rather than showing all.
    #[test]
    fn empty_selection_yields_empty_view() {
        let view = state((0.0, 10.0), &[]).apply(&anchors()).unwrap();
        assert_eq!(view.height(), 0);
    }

    /// Null distances (coercion failures) never pass the range predicate.
    #[test]
    fn null_distances_are_excluded() {
        let df = df!(
            DISTANCE_COL => &[Some(2.0), None, Some(4.0)],
            MARKET_COL => &["A", "A", "A"],
        )
        .unwrap();
        let view = state((0.0, 10.0), &["A"]).apply(&df).unwrap();
        assert_eq!(view.height(), 2);
    }

    #[test]
    fn clamp_restores_ordering() {
        let mut s = state((8.0, 3.0), &["A"]);
        s.clamp_range((0.0, 10.0));
        assert_eq!(s.distance_range, (8.0, 8.0));

        let mut s = state((-5.0, 99.0), &["A"]);
        s.clamp_range((0.0, 10.0));
        assert_eq!(s.distance_range, (0.0, 10.0));
    }

    #[test]
    fn defaults_select_everything() {
        let markets = vec!["A".to_string(), "B".to_string()];
        let s = FilterState::for_dataset(&markets, Some((1.0, 9.0)));
        assert_eq!(s.distance_range, (1.0, 9.0));
        assert_eq!(s.selected_markets.len(), 2);
        assert_eq!(s.export_market, "A");
    }
}
