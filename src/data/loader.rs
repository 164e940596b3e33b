//! Dataset Loader Module
//! Loads `nrdc_missing_anchors.csv` into a Polars DataFrame, coercing the
//! Distance column to Float64 (unparseable cells become null).

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File the dashboard monitors, resolved against the working directory.
pub const DATASET_FILE: &str = "nrdc_missing_anchors.csv";
/// Numeric source-to-target offset column.
pub const DISTANCE_COL: &str = "Distance";
/// Categorical market label column.
pub const MARKET_COL: &str = "Market";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Dataset '{DATASET_FILE}' not found at {0}")]
    FileMissing(PathBuf),
}

/// Resolve the dataset path: working directory first, then the directory the
/// executable lives in. Returns the first candidate that exists, or the
/// working-directory candidate so the caller can report where it looked.
pub fn resolve_dataset_path() -> PathBuf {
    let cwd_candidate = PathBuf::from(DATASET_FILE);
    if cwd_candidate.exists() {
        return cwd_candidate;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let exe_candidate = dir.join(DATASET_FILE);
            if exe_candidate.exists() {
                return exe_candidate;
            }
        }
    }

    cwd_candidate
}

/// Read and parse the dataset from `path`.
///
/// The Distance column is cast to Float64 non-strictly, so malformed cells
/// turn into nulls instead of aborting the load.
pub fn read_dataset(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileMissing(path.to_path_buf()));
    }

    let path_str = path.to_string_lossy().to_string();
    let df = LazyCsvReader::new(&path_str)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    let df = coerce_distance(df)?;
    log::info!("Loaded {} rows from {}", df.height(), path.display());
    Ok(df)
}

/// Cast the Distance column to Float64, mapping unparseable values to null.
pub fn coerce_distance(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .with_column(col(DISTANCE_COL).cast(DataType::Float64))
        .collect()
}

/// Names of the entries sitting next to `path`, for the troubleshooting
/// message shown when the dataset is missing.
pub fn sibling_listing(path: &Path) -> Vec<String> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Holds the dataset for the lifetime of the process. The file is read at
/// most once; once cached the frame is only ever handed out by reference.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Whether a dataset has been cached already.
    pub fn is_loaded(&self) -> bool {
        self.df.is_some()
    }

    /// Seed the cache directly (used by the background load thread).
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }

    /// Sorted distinct market labels present in the dataset.
    pub fn markets(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };
        unique_markets(df)
    }

    /// Min and max of the Distance column, skipping nulls.
    pub fn distance_bounds(&self) -> Option<(f64, f64)> {
        let df = self.df.as_ref()?;
        let ca = df.column(DISTANCE_COL).ok()?.f64().ok()?;
        match (ca.min(), ca.max()) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        }
    }
}

/// Sorted distinct non-null market labels of a frame.
pub fn unique_markets(df: &DataFrame) -> Vec<String> {
    let mut markets: Vec<String> = df
        .column(MARKET_COL)
        .ok()
        .and_then(|col| col.unique().ok())
        .map(|unique| {
            let series = unique.as_materialized_series();
            (0..series.len())
                .filter_map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        None
                    } else {
                        Some(val.to_string().trim_matches('"').to_string())
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    markets.sort();
    markets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_distance_frame() -> DataFrame {
        df!(
            DISTANCE_COL => &["1.5", "not-a-number", "9.25", ""],
            MARKET_COL => &["Vegas", "Reno", "Vegas", "Dallas"],
        )
        .unwrap()
    }

    /// Malformed Distance cells become null, valid ones parse.
    #[test]
    fn coerce_maps_bad_cells_to_null() {
        let df = coerce_distance(mixed_distance_frame()).unwrap();
        let ca = df.column(DISTANCE_COL).unwrap().f64().unwrap();

        assert_eq!(ca.len(), 4);
        assert_eq!(ca.null_count(), 2);
        assert_eq!(ca.get(0), Some(1.5));
        assert_eq!(ca.get(2), Some(9.25));
    }

    #[test]
    fn markets_are_sorted_and_distinct() {
        let df = coerce_distance(mixed_distance_frame()).unwrap();
        assert_eq!(unique_markets(&df), vec!["Dallas", "Reno", "Vegas"]);
    }

    #[test]
    fn bounds_skip_nulls() {
        let mut loader = DataLoader::new();
        let df = coerce_distance(mixed_distance_frame()).unwrap();
        loader.set_dataframe(df);
        assert_eq!(loader.distance_bounds(), Some((1.5, 9.25)));
    }

    #[test]
    fn missing_file_is_reported_not_panicked() {
        let err = read_dataset(Path::new("definitely/absent/anchors.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileMissing(_)));
    }
}
