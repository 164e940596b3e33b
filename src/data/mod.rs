//! Data module - dataset loading and filtering

mod filter;
mod loader;

pub use filter::FilterState;
pub use loader::{
    read_dataset, resolve_dataset_path, sibling_listing, unique_markets, DataLoader, LoaderError,
    DATASET_FILE, DISTANCE_COL, MARKET_COL,
};
