//! GUI module - user interface components

mod app;
mod control_panel;
mod dashboard;

pub use app::AnchorApp;
pub use control_panel::{FilterPanel, FilterPanelAction};
pub use dashboard::{Dashboard, DashboardData};
