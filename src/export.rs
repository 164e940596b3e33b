//! CSV Export Module
//! Serializes the filtered view or a single-market slice of the full dataset
//! into downloadable CSV bytes.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::MARKET_COL;

/// Download name for the filtered-view export.
pub const FILTERED_VIEW_FILE: &str = "nrdc_filtered_view.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Download name for a targeted market report.
pub fn market_report_name(market: &str) -> String {
    format!("market_{market}_report.csv")
}

/// Serialize a frame to CSV bytes: header row, source column order, no index
/// column. An empty frame yields a header-only CSV.
pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(buf)
}

/// CSV bytes of the current filtered view, all columns.
pub fn filtered_view_csv(view: &DataFrame) -> Result<Vec<u8>, ExportError> {
    to_csv_bytes(view)
}

/// CSV bytes of the **unfiltered** dataset restricted to one market.
pub fn market_report_csv(dataset: &DataFrame, market: &str) -> Result<Vec<u8>, ExportError> {
    let subset = dataset
        .clone()
        .lazy()
        .filter(col(MARKET_COL).eq(lit(market)))
        .collect()?;
    to_csv_bytes(&subset)
}

/// Write export bytes to the path the user picked in the save dialog.
pub fn write_report(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DISTANCE_COL;
    use std::io::Cursor;

    fn dataset() -> DataFrame {
        df!(
            DISTANCE_COL => &[1.0, 5.0, 9.0],
            MARKET_COL => &["A", "B", "A"],
            "Site" => &["s1", "s2", "s3"],
        )
        .unwrap()
    }

    fn parse_csv(bytes: Vec<u8>) -> DataFrame {
        CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .unwrap()
    }

    /// Export then re-parse gives back the same rows and columns.
    #[test]
    fn round_trip_preserves_rows_and_columns() {
        let df = dataset();
        let parsed = parse_csv(filtered_view_csv(&df).unwrap());

        assert_eq!(parsed.height(), 3);
        assert_eq!(
            parsed
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
            vec![DISTANCE_COL, MARKET_COL, "Site"]
        );
        assert!(df.equals(&parsed));
    }

    /// Targeted export slices the full dataset, one header + one row for a
    /// single-row market.
    #[test]
    fn market_report_is_full_rows_of_one_market() {
        let bytes = market_report_csv(&dataset(), "B").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Distance,Market,Site");
        assert_eq!(lines[1], "5.0,B,s2");
    }

    /// Empty input still produces the header row.
    #[test]
    fn empty_view_exports_header_only() {
        let empty = dataset().head(Some(0));
        let text = String::from_utf8(filtered_view_csv(&empty).unwrap()).unwrap();
        assert_eq!(text.trim_end(), "Distance,Market,Site");
    }

    #[test]
    fn report_names() {
        assert_eq!(market_report_name("Vegas"), "market_Vegas_report.csv");
        assert_eq!(FILTERED_VIEW_FILE, "nrdc_filtered_view.csv");
    }
}
