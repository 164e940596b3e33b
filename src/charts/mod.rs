//! Charts module - chart projections and rendering

mod plotter;

pub use plotter::{
    distance_histogram, market_counts, ChartData, ChartPlotter, HistogramBin, MarketCount,
    HISTOGRAM_BINS,
};
