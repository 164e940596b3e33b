//! Stats module - summary metrics over the filtered view

mod calculator;

pub use calculator::{SummaryCalculator, ViewSummary};
